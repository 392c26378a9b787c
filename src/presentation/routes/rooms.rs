use crate::presentation::handlers::rooms;
use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::infrastructure::state::AppState;

/// Room routes - membership of an existing room
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(rooms::get_room))
        .route("/{room_code}/members", post(rooms::join_room))
}

/// Member routes - kept apart from `/rooms` so any join code stays routable
pub fn member_routes() -> Router<AppState> {
    Router::new().route("/{target_user_code}", delete(rooms::delete_member))
}
