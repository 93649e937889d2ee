use serde::{Deserialize, Serialize};

use crate::models::{BoardDetail, BoardSummary, Notice};

// -- Auth forms --

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub csrf_token: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub csrf_token: String,
}

// -- Entity forms --

#[derive(Debug, Deserialize)]
pub struct NewBoardForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub csrf_token: String,
}

#[derive(Debug, Deserialize)]
pub struct NewListForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub csrf_token: String,
}

#[derive(Debug, Deserialize)]
pub struct NewCardForm {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub csrf_token: String,
}

/// Delete forms carry nothing but the CSRF token.
#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    #[serde(default)]
    pub csrf_token: String,
}

// -- Page payloads --
// Rendering is the frontend's job; these are the full view contexts a
// template would receive.

/// Login and registration pages: just a form token and any pending notice.
#[derive(Debug, Serialize, Deserialize)]
pub struct FormPage {
    pub csrf_token: String,
    pub notice: Option<Notice>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IndexPage {
    pub username: String,
    pub boards: Vec<BoardSummary>,
    pub csrf_token: String,
    pub notice: Option<Notice>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BoardPage {
    pub board: BoardDetail,
    pub csrf_token: String,
    pub notice: Option<Notice>,
}

// -- Board creation (programmatic) --

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedBoard {
    pub id: i64,
    pub title: String,
    pub list_count: i64,
}

/// Payload for `POST /boards/new` when issued as a background request.
#[derive(Debug, Serialize, Deserialize)]
pub struct BoardCreateResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board: Option<CreatedBoard>,
}
