#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Request, Response, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use corkboard_api::session::SessionStore;
use corkboard_api::{AppConfig, AppState, AppStateInner};
use corkboard_db::Database;
use corkboard_server::build_router;

pub fn test_app() -> (Router, AppState) {
    let state: AppState = Arc::new(AppStateInner {
        db: Database::open_in_memory().expect("in-memory db"),
        sessions: SessionStore::new(),
        config: AppConfig {
            secret_key: "test-secret".into(),
            session_ttl: chrono::Duration::hours(1),
            csrf_ttl: chrono::Duration::seconds(43200),
        },
    });
    (build_router(state.clone()), state)
}

pub async fn get(app: &Router, path: &str, cookies: &str) -> Response<Body> {
    let mut builder = Request::builder().uri(path);
    if !cookies.is_empty() {
        builder = builder.header(COOKIE, cookies);
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_form(app: &Router, path: &str, form: &str, cookies: &str) -> Response<Body> {
    post_form_with(app, path, form, cookies, false).await
}

pub async fn post_form_with(
    app: &Router,
    path: &str,
    form: &str,
    cookies: &str,
    background: bool,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
    if !cookies.is_empty() {
        builder = builder.header(COOKIE, cookies);
    }
    if background {
        builder = builder.header("x-requested-with", "XMLHttpRequest");
    }
    app.clone()
        .oneshot(builder.body(Body::from(form.to_string())).unwrap())
        .await
        .unwrap()
}

pub async fn body_json(resp: Response<Body>) -> serde_json::Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn location(resp: &Response<Body>) -> &str {
    resp.headers().get(LOCATION).unwrap().to_str().unwrap()
}

/// Every Set-Cookie pair from a response, as one Cookie header value.
pub fn set_cookies(resp: &Response<Body>) -> String {
    resp.headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn session_cookie(resp: &Response<Body>) -> String {
    resp.headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("corkboard_session="))
        .and_then(|v| v.split(';').next())
        .expect("no session cookie in response")
        .to_string()
}

/// Fetch a form page and pull its CSRF token out of the payload.
pub async fn csrf_token(app: &Router, path: &str, cookies: &str) -> String {
    let json = body_json(get(app, path, cookies).await).await;
    json["csrf_token"].as_str().unwrap().to_string()
}

/// Register and log in, returning the session Cookie header value.
pub async fn register_and_login(
    app: &Router,
    username: &str,
    email: &str,
    password: &str,
) -> String {
    let token = csrf_token(app, "/register", "").await;
    let form = format!(
        "username={}&email={}&password={}&csrf_token={}",
        username,
        email.replace('@', "%40"),
        password,
        token
    );
    let resp = post_form(app, "/register", &form, "").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");

    let token = csrf_token(app, "/login", "").await;
    let form = format!(
        "username={}&password={}&csrf_token={}",
        username, password, token
    );
    let resp = post_form(app, "/login", &form, "").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    session_cookie(&resp)
}

/// Row count, for asserting that failed operations mutate nothing.
pub fn count(state: &AppState, table: &str) -> i64 {
    state
        .db
        .with_conn(|conn| {
            Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))?)
        })
        .unwrap()
}
