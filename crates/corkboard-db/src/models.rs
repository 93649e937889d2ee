//! Row types mapping directly to SQLite rows. The corkboard-types view
//! models are built from these so the DB layer stays independent.

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::warn;

pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: String,
}

pub struct BoardRow {
    pub id: i64,
    pub title: String,
    pub user_id: i64,
}

/// Index-page projection: a board plus how many lists it holds.
pub struct BoardSummaryRow {
    pub id: i64,
    pub title: String,
    pub list_count: i64,
}

pub struct ListRow {
    pub id: i64,
    pub title: String,
    pub board_id: i64,
}

pub struct CardRow {
    pub id: i64,
    pub content: String,
    pub list_id: i64,
    pub created_at: String,
}

/// A list resolved up its ownership chain: the root owner and the enclosing
/// board (needed for redirects after list operations).
pub struct ListContext {
    pub id: i64,
    pub title: String,
    pub board_id: i64,
    pub owner_id: i64,
}

/// A card resolved up its ownership chain (Card → List → Board → User).
pub struct CardContext {
    pub id: i64,
    pub board_id: i64,
    pub owner_id: i64,
}

/// SQLite stores timestamps as "YYYY-MM-DD HH:MM:SS" without timezone.
/// Try RFC 3339 first, then parse as naive UTC and convert.
pub fn parse_sqlite_datetime(raw: &str) -> DateTime<Utc> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            warn!("Corrupt datetime '{}': {}", raw, e);
            DateTime::default()
        })
}
