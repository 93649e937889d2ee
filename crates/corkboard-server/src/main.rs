use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use corkboard_api::session::SessionStore;
use corkboard_api::{AppConfig, AppStateInner};
use corkboard_server::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "corkboard=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let secret_key =
        std::env::var("CORKBOARD_SECRET_KEY").unwrap_or_else(|_| "dev-secret-change-me".into());
    let db_path = std::env::var("CORKBOARD_DB_PATH").unwrap_or_else(|_| "corkboard.db".into());
    let host = std::env::var("CORKBOARD_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("CORKBOARD_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;
    let session_ttl_hours: i64 = std::env::var("CORKBOARD_SESSION_TTL_HOURS")
        .unwrap_or_else(|_| "720".into())
        .parse()?;
    // The CSRF window is long (12 h) to tolerate slow form submission, and
    // configured independently of the session lifetime.
    let csrf_ttl_secs: i64 = std::env::var("CORKBOARD_CSRF_TTL_SECS")
        .unwrap_or_else(|_| "43200".into())
        .parse()?;

    // Init database
    let db = corkboard_db::Database::open(&PathBuf::from(&db_path))?;

    // Shared state
    let state = Arc::new(AppStateInner {
        db,
        sessions: SessionStore::new(),
        config: AppConfig {
            secret_key,
            session_ttl: chrono::Duration::hours(session_ttl_hours),
            csrf_ttl: chrono::Duration::seconds(csrf_ttl_secs),
        },
    });

    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Corkboard server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
