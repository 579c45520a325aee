//! Riddle resource routes under /api/riddles.

use crate::handlers::riddle::{create_riddle, delete_riddle, get_riddle, list_riddles, update_riddle};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn riddle_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/riddles",
            get(list_riddles).post(create_riddle).put(update_riddle),
        )
        .route("/api/riddles/:id", get(get_riddle).delete(delete_riddle))
        .with_state(state)
}
