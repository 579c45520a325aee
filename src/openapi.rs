//! OpenAPI document for the riddle resource.

use crate::error::{FieldError, Problem};
use crate::handlers::riddle;
use crate::model::{Riddle, RiddleDto};
use axum::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        riddle::create_riddle,
        riddle::update_riddle,
        riddle::list_riddles,
        riddle::get_riddle,
        riddle::delete_riddle
    ),
    components(schemas(Riddle, RiddleDto, Problem, FieldError)),
    tags((name = "riddle", description = "Riddle CRUD resource"))
)]
pub struct ApiDoc;

pub async fn api_docs() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
