use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect};
use axum::{Extension, Form};
use axum_extra::extract::cookie::CookieJar;

use corkboard_types::api::{DeleteForm, NewListForm};

use crate::error::ApiError;
use crate::guard::require_owner;
use crate::middleware::CurrentUser;
use crate::{AppState, csrf, flash};

/// POST /board/{id}/list/new — add a list to a board.
pub async fn create_list(
    State(state): State<AppState>,
    jar: CookieJar,
    Extension(user): Extension<CurrentUser>,
    Path(board_id): Path<i64>,
    Form(form): Form<NewListForm>,
) -> Result<impl IntoResponse, ApiError> {
    let board_path = format!("/board/{}", board_id);
    csrf::require_valid(&state, &form.csrf_token, &board_path)?;

    let board = state.db.board_by_id(board_id)?.ok_or(ApiError::NotFound)?;
    require_owner(&user, board.user_id)?;

    let title = form.title.trim();
    if title.is_empty() {
        return Err(ApiError::validation("List title cannot be empty.", board_path));
    }

    state
        .db
        .create_list(board.id, title)
        .map_err(|e| ApiError::storage(e, board_path.as_str()))?;

    let jar = flash::set(jar, "success", format!("List \"{}\" added.", title));
    Ok((jar, Redirect::to(&board_path)))
}

/// POST /list/{id}/delete — delete a list with all of its cards. Ownership
/// is resolved through the enclosing board.
pub async fn delete_list(
    State(state): State<AppState>,
    jar: CookieJar,
    Extension(user): Extension<CurrentUser>,
    Path(list_id): Path<i64>,
    Form(form): Form<DeleteForm>,
) -> Result<impl IntoResponse, ApiError> {
    csrf::require_valid(&state, &form.csrf_token, "/")?;

    let list = state.db.list_context(list_id)?.ok_or(ApiError::NotFound)?;
    require_owner(&user, list.owner_id)?;

    let board_path = format!("/board/{}", list.board_id);
    state
        .db
        .delete_list(list.id)
        .map_err(|e| ApiError::storage(e, board_path.as_str()))?;

    let jar = flash::set(
        jar,
        "success",
        format!("List \"{}\" successfully deleted.", list.title),
    );
    Ok((jar, Redirect::to(&board_path)))
}
