//! Router assembly: common, riddle, and API doc routes behind a body limit.

mod common;
mod riddle;

pub use common::common_routes;
pub use riddle::riddle_routes;

use crate::openapi::api_docs;
use crate::state::AppState;
use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Full application router.
pub fn app(state: AppState) -> Router {
    let body_limit = state.config.body_limit;
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(riddle_routes(state))
        .route("/v3/api-docs", get(api_docs))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(body_limit)),
        )
}
