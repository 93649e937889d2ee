use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use corkboard_api::middleware::require_auth;
use corkboard_api::{AppState, auth, boards, cards, lists};

/// Assemble the full application router: anonymous auth routes, then the
/// session-guarded board/list/card routes.
pub fn build_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .with_state(state.clone());

    let protected = Router::new()
        .route("/", get(boards::index))
        .route("/boards/new", post(boards::create_board))
        .route("/board/{board_id}", get(boards::view_board))
        .route("/board/{board_id}/list/new", post(lists::create_list))
        .route("/board/{board_id}/delete", post(boards::delete_board))
        .route("/list/{list_id}/card/new", post(cards::create_card))
        .route("/list/{list_id}/delete", post(lists::delete_list))
        .route("/card/{card_id}/delete", post(cards::delete_card))
        .route("/logout", get(auth::logout))
        .layer(from_fn_with_state(state.clone(), require_auth))
        .with_state(state);

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(TraceLayer::new_for_http())
}
