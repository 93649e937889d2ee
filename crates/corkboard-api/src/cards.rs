use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect};
use axum::{Extension, Form};
use axum_extra::extract::cookie::CookieJar;

use corkboard_types::api::{DeleteForm, NewCardForm};

use crate::error::ApiError;
use crate::guard::require_owner;
use crate::middleware::CurrentUser;
use crate::{AppState, csrf, flash};

/// POST /list/{id}/card/new — add a card to a list. Ownership is resolved
/// through the enclosing board.
pub async fn create_card(
    State(state): State<AppState>,
    jar: CookieJar,
    Extension(user): Extension<CurrentUser>,
    Path(list_id): Path<i64>,
    Form(form): Form<NewCardForm>,
) -> Result<impl IntoResponse, ApiError> {
    csrf::require_valid(&state, &form.csrf_token, "/")?;

    let list = state.db.list_context(list_id)?.ok_or(ApiError::NotFound)?;
    require_owner(&user, list.owner_id)?;

    let board_path = format!("/board/{}", list.board_id);
    let content = form.content.trim();
    if content.is_empty() {
        return Err(ApiError::validation("Card content cannot be empty.", board_path));
    }

    state
        .db
        .create_card(list.id, content)
        .map_err(|e| ApiError::storage(e, board_path.as_str()))?;

    let jar = flash::set(jar, "success", "Card created successfully!");
    Ok((jar, Redirect::to(&board_path)))
}

/// POST /card/{id}/delete — delete a single card.
pub async fn delete_card(
    State(state): State<AppState>,
    jar: CookieJar,
    Extension(user): Extension<CurrentUser>,
    Path(card_id): Path<i64>,
    Form(form): Form<DeleteForm>,
) -> Result<impl IntoResponse, ApiError> {
    csrf::require_valid(&state, &form.csrf_token, "/")?;

    let card = state.db.card_context(card_id)?.ok_or(ApiError::NotFound)?;
    require_owner(&user, card.owner_id)?;

    let board_path = format!("/board/{}", card.board_id);
    state
        .db
        .delete_card(card.id)
        .map_err(|e| ApiError::storage(e, board_path.as_str()))?;

    let jar = flash::set(jar, "success", "Card successfully deleted.");
    Ok((jar, Redirect::to(&board_path)))
}
