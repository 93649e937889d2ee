//! One-shot notices carried across a redirect in a cookie. The payload is
//! hex-encoded JSON so user-supplied titles cannot break the cookie value
//! or smuggle attributes into it.

use axum_extra::extract::cookie::{Cookie, CookieJar};

use corkboard_types::models::Notice;

pub const FLASH_COOKIE: &str = "corkboard_flash";

/// Queue a notice for the next page view.
pub fn set(jar: CookieJar, category: &str, message: impl Into<String>) -> CookieJar {
    let notice = Notice::new(category, message);
    let encoded = hex::encode(serde_json::to_vec(&notice).unwrap_or_default());
    jar.add(
        Cookie::build((FLASH_COOKIE, encoded))
            .path("/")
            .http_only(true)
            .build(),
    )
}

/// Take the pending notice, if any, clearing the cookie.
pub fn take(jar: CookieJar) -> (CookieJar, Option<Notice>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };

    let notice = hex::decode(cookie.value())
        .ok()
        .and_then(|bytes| serde_json::from_slice(&bytes).ok());

    let mut removal = Cookie::from(FLASH_COOKIE);
    removal.set_path("/");
    (jar.remove(removal), notice)
}
