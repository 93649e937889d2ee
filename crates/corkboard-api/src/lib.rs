pub mod auth;
pub mod boards;
pub mod cards;
pub mod csrf;
pub mod error;
pub mod flash;
pub mod guard;
pub mod lists;
pub mod middleware;
pub mod session;

use std::sync::Arc;

use corkboard_db::Database;

use crate::session::SessionStore;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub sessions: SessionStore,
    pub config: AppConfig,
}

/// Runtime configuration, assembled by the binary from the environment and
/// handed to every handler through [`AppState`]. Session and CSRF lifetimes
/// are independent knobs: the CSRF window is deliberately long (12 hours by
/// default) to tolerate slow form submission.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub secret_key: String,
    pub session_ttl: chrono::Duration,
    pub csrf_ttl: chrono::Duration,
}
