//! Stateless CSRF tokens: a unix timestamp signed with the app secret,
//! `<ts>.<hex hmac-sha256>`. No server-side state, so anonymous forms
//! (login, registration) work without a pre-existing session.

use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::AppStateInner;
use crate::error::ApiError;

type HmacSha256 = Hmac<Sha256>;

pub fn issue(secret: &str) -> String {
    let ts = Utc::now().timestamp();
    format!("{}.{}", ts, sign(secret, ts))
}

/// Constant-time signature check plus an age window. Tokens from the
/// future are rejected along with stale ones.
pub fn verify(secret: &str, token: &str, ttl: Duration) -> bool {
    let Some((ts_raw, sig_hex)) = token.split_once('.') else {
        return false;
    };
    let Ok(ts) = ts_raw.parse::<i64>() else {
        return false;
    };
    let Ok(sig) = hex::decode(sig_hex) else {
        return false;
    };

    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(ts_raw.as_bytes());
    if mac.verify_slice(&sig).is_err() {
        return false;
    }

    let age = Utc::now().timestamp() - ts;
    (0..=ttl.num_seconds()).contains(&age)
}

/// Guard clause for form handlers: abort with a validation notice when the
/// submitted token is missing, forged, or outside the acceptance window.
pub fn require_valid(
    state: &AppStateInner,
    token: &str,
    redirect_to: &str,
) -> Result<(), ApiError> {
    if verify(&state.config.secret_key, token, state.config.csrf_ttl) {
        Ok(())
    } else {
        Err(ApiError::validation(
            "Invalid or expired form token.",
            redirect_to,
        ))
    }
}

fn sign(secret: &str, ts: i64) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(ts.to_string().as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
