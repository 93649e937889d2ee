use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use thiserror::Error;
use tracing::error;

use corkboard_db::StoreError;

use crate::flash;

/// Request-boundary failure taxonomy. Every variant resolves to a safe
/// response; none of them leaks internals or crashes the process.
/// Unauthenticated requests never reach handlers: the auth middleware
/// redirects them to the login page first.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Authenticated, but not the owner of the target entity.
    #[error("unauthorized")]
    Unauthorized,
    #[error("not found")]
    NotFound,
    #[error("{message}")]
    Validation { message: String, redirect_to: String },
    #[error("username or email already in use")]
    DuplicateIdentity,
    #[error("storage failure: {detail}")]
    Storage { detail: String, redirect_to: String },
}

impl ApiError {
    pub fn validation(message: impl Into<String>, redirect_to: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            redirect_to: redirect_to.into(),
        }
    }

    pub fn storage(err: impl std::fmt::Display, redirect_to: impl Into<String>) -> Self {
        Self::Storage {
            detail: err.to_string(),
            redirect_to: redirect_to.into(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::storage(err, "/")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            // Same notice whether the entity exists or not, so a non-owner
            // learns nothing they could not learn from a missing id.
            ApiError::Unauthorized => flash_redirect("/", "danger", "Unauthorized action."),
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::Validation {
                message,
                redirect_to,
            } => flash_redirect(&redirect_to, "danger", &message),
            ApiError::DuplicateIdentity => flash_redirect(
                "/register",
                "danger",
                "Username or email is already in use.",
            ),
            ApiError::Storage {
                detail,
                redirect_to,
            } => {
                // Detail stays in the server log; the user sees a generic notice.
                error!("storage failure: {}", detail);
                flash_redirect(&redirect_to, "danger", "Something went wrong. Please try again.")
            }
        }
    }
}

fn flash_redirect(to: &str, category: &str, message: &str) -> Response {
    let jar = flash::set(CookieJar::new(), category, message);
    (jar, Redirect::to(to)).into_response()
}
