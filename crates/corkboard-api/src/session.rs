use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

pub const SESSION_COOKIE: &str = "corkboard_session";

#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// In-process session store keyed by opaque token. The only long-lived
/// state besides the database connection.
#[derive(Default)]
pub struct SessionStore {
    inner: Mutex<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a session bound to `user_id`, returning the opaque token.
    pub fn create(&self, user_id: i64, ttl: Duration) -> String {
        let token = new_token();
        let now = Utc::now();
        self.lock().insert(
            token.clone(),
            Session {
                user_id,
                created_at: now,
                expires_at: now + ttl,
            },
        );
        token
    }

    /// Look up a live session. Expired entries are dropped on access.
    pub fn get(&self, token: &str) -> Option<Session> {
        let mut inner = self.lock();
        match inner.get(token) {
            Some(session) if session.expires_at > Utc::now() => Some(session.clone()),
            Some(_) => {
                inner.remove(token);
                None
            }
            None => None,
        }
    }

    /// Invalidate a session. Removing an unknown token is a no-op.
    pub fn remove(&self, token: &str) {
        self.lock().remove(token);
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Session>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn new_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    hex::encode(bytes)
}
