use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use tracing::error;

use crate::AppState;
use crate::session::SESSION_COOKIE;

/// The authenticated identity, injected into request extensions by
/// [`require_auth`].
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
}

/// Resolve the session cookie to a user, or bounce to the login page,
/// remembering where the request was headed.
pub async fn require_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let target = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string());
    let login = Redirect::to(&format!("/login?next={}", target));

    let Some(token) = jar.get(SESSION_COOKIE).map(|c| c.value().to_string()) else {
        return login.into_response();
    };
    let Some(session) = state.sessions.get(&token) else {
        return login.into_response();
    };

    match state.db.user_by_id(session.user_id) {
        Ok(Some(user)) => {
            req.extensions_mut().insert(CurrentUser {
                id: user.id,
                username: user.username,
            });
            next.run(req).await
        }
        Ok(None) => {
            // Session outlived its user
            state.sessions.remove(&token);
            login.into_response()
        }
        Err(e) => {
            error!("identity lookup failed: {}", e);
            login.into_response()
        }
    }
}
