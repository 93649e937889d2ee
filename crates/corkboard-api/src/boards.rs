use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Extension, Form, Json};
use axum_extra::extract::cookie::CookieJar;
use tracing::error;

use corkboard_db::models::parse_sqlite_datetime;
use corkboard_types::api::{
    BoardCreateResponse, BoardPage, CreatedBoard, DeleteForm, IndexPage, NewBoardForm,
};
use corkboard_types::models::{BoardDetail, BoardSummary, CardView, ListView};

use crate::error::ApiError;
use crate::guard::require_owner;
use crate::middleware::CurrentUser;
use crate::{AppState, csrf, flash};

/// GET / — the current user's boards, most recent first.
pub async fn index(
    State(state): State<AppState>,
    jar: CookieJar,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ApiError> {
    let boards = state
        .db
        .boards_for_user(user.id)?
        .into_iter()
        .map(|b| BoardSummary {
            id: b.id,
            title: b.title,
            list_count: b.list_count,
        })
        .collect();

    let (jar, notice) = flash::take(jar);
    Ok((
        jar,
        Json(IndexPage {
            username: user.username,
            boards,
            csrf_token: csrf::issue(&state.config.secret_key),
            notice,
        }),
    ))
}

/// POST /boards/new — create a board. A background request (the
/// `X-Requested-With: XMLHttpRequest` header) gets a JSON payload; a full
/// page navigation gets the usual flash-and-redirect.
pub async fn create_board(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
    Extension(user): Extension<CurrentUser>,
    Form(form): Form<NewBoardForm>,
) -> Response {
    let background = headers
        .get("x-requested-with")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("XMLHttpRequest"));

    if !csrf::verify(
        &state.config.secret_key,
        &form.csrf_token,
        state.config.csrf_ttl,
    ) {
        if background {
            return failure_json(StatusCode::BAD_REQUEST, "Invalid or expired form token.");
        }
        return ApiError::validation("Invalid or expired form token.", "/").into_response();
    }

    let title = form.title.trim();
    if title.is_empty() {
        if background {
            return failure_json(StatusCode::BAD_REQUEST, "Board title cannot be empty.");
        }
        return ApiError::validation("Board title cannot be empty.", "/").into_response();
    }

    match state.db.create_board(user.id, title) {
        Ok(id) => {
            let message = format!("Board \"{}\" created successfully!", title);
            if background {
                (
                    StatusCode::CREATED,
                    Json(BoardCreateResponse {
                        success: true,
                        message,
                        board: Some(CreatedBoard {
                            id,
                            title: title.to_string(),
                            // New boards have no lists yet
                            list_count: 0,
                        }),
                    }),
                )
                    .into_response()
            } else {
                (flash::set(jar, "success", message), Redirect::to("/")).into_response()
            }
        }
        Err(e) if background => {
            error!("storage failure: {}", e);
            failure_json(
                StatusCode::INTERNAL_SERVER_ERROR,
                "There was an issue creating the board.",
            )
        }
        Err(e) => ApiError::storage(e, "/").into_response(),
    }
}

/// GET /board/{id} — board detail with lists and cards eagerly loaded:
/// one query for the lists, one batched query for all their cards.
pub async fn view_board(
    State(state): State<AppState>,
    jar: CookieJar,
    Extension(user): Extension<CurrentUser>,
    Path(board_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let board = state.db.board_by_id(board_id)?.ok_or(ApiError::NotFound)?;
    require_owner(&user, board.user_id)?;

    let lists = state.db.lists_for_board(board.id)?;
    let list_ids: Vec<i64> = lists.iter().map(|l| l.id).collect();
    let cards = state.db.cards_for_lists(&list_ids)?;

    let mut views: Vec<ListView> = lists
        .into_iter()
        .map(|l| ListView {
            id: l.id,
            title: l.title,
            cards: vec![],
        })
        .collect();
    for card in cards {
        if let Some(list) = views.iter_mut().find(|v| v.id == card.list_id) {
            list.cards.push(CardView {
                id: card.id,
                content: card.content,
                created_at: parse_sqlite_datetime(&card.created_at),
            });
        }
    }

    let (jar, notice) = flash::take(jar);
    Ok((
        jar,
        Json(BoardPage {
            board: BoardDetail {
                id: board.id,
                title: board.title,
                lists: views,
            },
            csrf_token: csrf::issue(&state.config.secret_key),
            notice,
        }),
    ))
}

/// POST /board/{id}/delete — cascade-delete a board with all of its lists
/// and cards.
pub async fn delete_board(
    State(state): State<AppState>,
    jar: CookieJar,
    Extension(user): Extension<CurrentUser>,
    Path(board_id): Path<i64>,
    Form(form): Form<DeleteForm>,
) -> Result<impl IntoResponse, ApiError> {
    csrf::require_valid(&state, &form.csrf_token, "/")?;

    let board = state.db.board_by_id(board_id)?.ok_or(ApiError::NotFound)?;
    require_owner(&user, board.user_id)?;

    state.db.delete_board(board.id)?;

    let jar = flash::set(
        jar,
        "success",
        format!("Board \"{}\" successfully deleted.", board.title),
    );
    Ok((jar, Redirect::to("/")))
}

fn failure_json(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(BoardCreateResponse {
            success: false,
            message: message.to_string(),
            board: None,
        }),
    )
        .into_response()
}
