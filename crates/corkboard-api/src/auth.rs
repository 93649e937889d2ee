use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect};
use axum::{Extension, Form, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;

use corkboard_db::StoreError;
use corkboard_types::api::{FormPage, LoginForm, RegisterForm};

use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::session::SESSION_COOKIE;
use crate::{AppState, csrf, flash};

#[derive(Debug, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

// ── Pages ───────────────────────────────────────────────────────────────
// Rendering is the frontend's job; these return the form context a
// template would receive.

pub async fn login_page(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    form_page(&state, jar)
}

pub async fn register_page(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    form_page(&state, jar)
}

fn form_page(state: &AppState, jar: CookieJar) -> (CookieJar, Json<FormPage>) {
    let (jar, notice) = flash::take(jar);
    (
        jar,
        Json(FormPage {
            csrf_token: csrf::issue(&state.config.secret_key),
            notice,
        }),
    )
}

// ── Registration ────────────────────────────────────────────────────────

pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<impl IntoResponse, ApiError> {
    csrf::require_valid(&state, &form.csrf_token, "/register")?;

    let username = form.username.trim();
    let email = form.email.trim();
    if username.is_empty() || email.is_empty() || form.password.is_empty() {
        return Err(ApiError::validation("All fields are required.", "/register"));
    }
    if !email.contains('@') {
        return Err(ApiError::validation(
            "A valid email address is required.",
            "/register",
        ));
    }

    // Argon2id with a fresh random salt; the plaintext never leaves this scope.
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(form.password.as_bytes(), &salt)
        .map_err(|e| ApiError::storage(e, "/register"))?
        .to_string();

    match state.db.create_user(username, email, &password_hash) {
        Ok(_) => {}
        Err(StoreError::Duplicate) => return Err(ApiError::DuplicateIdentity),
        Err(e) => return Err(ApiError::storage(e, "/register")),
    }

    let jar = flash::set(jar, "success", "Registration successful! Please log in.");
    Ok((jar, Redirect::to("/login")))
}

// ── Login / logout ──────────────────────────────────────────────────────

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<NextQuery>,
    Form(form): Form<LoginForm>,
) -> Result<impl IntoResponse, ApiError> {
    let back = match query.next.as_deref() {
        Some(next) => format!("/login?next={}", next),
        None => "/login".to_string(),
    };
    csrf::require_valid(&state, &form.csrf_token, &back)?;

    let user = state
        .db
        .user_by_username(form.username.trim())
        .map_err(|e| ApiError::storage(e, back.as_str()))?
        .filter(|u| verify_password(&u.password_hash, &form.password));

    let Some(user) = user else {
        return Err(ApiError::validation(
            "Login Unsuccessful. Check username and password.",
            back,
        ));
    };

    let token = state.sessions.create(user.id, state.config.session_ttl);
    let jar = jar.add(
        Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .build(),
    );
    let jar = flash::set(
        jar,
        "success",
        format!("Logged in successfully as {}.", user.username),
    );

    let target = query
        .next
        .as_deref()
        .filter(|next| is_safe_path(next))
        .unwrap_or("/");
    Ok((jar, Redirect::to(target)))
}

pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    Extension(_user): Extension<CurrentUser>,
) -> impl IntoResponse {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.remove(cookie.value());
    }

    let mut removal = Cookie::from(SESSION_COOKIE);
    removal.set_path("/");
    let jar = flash::set(jar.remove(removal), "info", "You have been logged out.");
    (jar, Redirect::to("/"))
}

fn verify_password(hash: &str, password: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

/// Post-login redirects only go to local paths: no scheme, no
/// protocol-relative tricks.
fn is_safe_path(next: &str) -> bool {
    next.starts_with('/') && !next.starts_with("//") && !next.contains("://") && !next.contains('\\')
}
