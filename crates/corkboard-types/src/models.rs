use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One-shot notice surfaced to the user on the next page view.
/// Categories follow the usual flash conventions: "success", "danger", "info".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub category: String,
    pub message: String,
}

impl Notice {
    pub fn new(category: &str, message: impl Into<String>) -> Self {
        Self {
            category: category.to_string(),
            message: message.into(),
        }
    }
}

/// A board as shown on the index page: title plus how many lists it holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSummary {
    pub id: i64,
    pub title: String,
    pub list_count: i64,
}

/// A board with its lists and cards eagerly loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardDetail {
    pub id: i64,
    pub title: String,
    pub lists: Vec<ListView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListView {
    pub id: i64,
    pub title: String,
    pub cards: Vec<CardView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardView {
    pub id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
