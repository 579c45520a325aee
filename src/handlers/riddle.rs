//! Riddle resource handlers: create, update, list, read, delete.

use crate::error::{AppError, Problem};
use crate::model::{Riddle, RiddleDto, ENTITY_NAME};
use crate::pagination::{pagination_headers, PageRequest};
use crate::response::{entity_creation_alert, entity_deletion_alert, entity_update_alert};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, OriginalUri, Path, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};

pub const RESOURCE_PATH: &str = "/api/riddles";

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id '{}'", id_str)))
}

/// Create a riddle. The body must not carry an id.
#[utoipa::path(
    post,
    path = "/api/riddles",
    tag = "riddle",
    request_body = RiddleDto,
    responses(
        (status = 201, description = "Riddle created", body = Riddle),
        (status = 400, description = "Id present or name missing", body = Problem)
    )
)]
pub async fn create_riddle(
    State(state): State<AppState>,
    body: Result<Json<RiddleDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    tracing::debug!(riddle = ?body, "REST request to save Riddle");
    let riddle = RequestValidator::validate(body)?;
    if riddle.id.is_some() {
        return Err(AppError::bad_request_alert(
            &state.config.app_name,
            "A new riddle cannot already have an ID",
            ENTITY_NAME,
            "idexists",
        ));
    }
    let saved = state.store.save(&riddle).await?;
    let id = saved
        .id
        .ok_or_else(|| AppError::Internal("store returned a riddle without id".into()))?;
    let mut headers = entity_creation_alert(&state.config.app_name, ENTITY_NAME, &id.to_string())?;
    let location = HeaderValue::try_from(format!("{}/{}", RESOURCE_PATH, id))
        .map_err(|e| AppError::Internal(format!("invalid location: {}", e)))?;
    headers.insert(header::LOCATION, location);
    Ok((StatusCode::CREATED, headers, Json(saved)))
}

/// Replace an existing riddle. The body must carry the id of a stored riddle.
#[utoipa::path(
    put,
    path = "/api/riddles",
    tag = "riddle",
    request_body = RiddleDto,
    responses(
        (status = 200, description = "Riddle updated", body = Riddle),
        (status = 400, description = "Id absent or name missing", body = Problem),
        (status = 404, description = "No riddle with that id", body = Problem)
    )
)]
pub async fn update_riddle(
    State(state): State<AppState>,
    body: Result<Json<RiddleDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    tracing::debug!(riddle = ?body, "REST request to update Riddle");
    let riddle = RequestValidator::validate(body)?;
    let Some(id) = riddle.id else {
        return Err(AppError::bad_request_alert(
            &state.config.app_name,
            "Invalid id",
            ENTITY_NAME,
            "idnull",
        ));
    };
    let saved = state.store.save(&riddle).await?;
    let headers = entity_update_alert(&state.config.app_name, ENTITY_NAME, &id.to_string())?;
    Ok((StatusCode::OK, headers, Json(saved)))
}

#[utoipa::path(
    get,
    path = "/api/riddles",
    tag = "riddle",
    params(
        ("page" = Option<u32>, Query, description = "Zero-based page index"),
        ("size" = Option<u32>, Query, description = "Page size"),
        ("sort" = Option<String>, Query, description = "property[,asc|desc]; repeatable")
    ),
    responses(
        (status = 200, description = "One page of riddles", body = [Riddle]),
        (status = 400, description = "Unknown sort property", body = Problem)
    )
)]
pub async fn list_riddles(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!("REST request to get a page of Riddles");
    let request = PageRequest::from_query(&params, state.config.default_page_size)?;
    let page = state.store.find_all(&request).await?;
    let headers = pagination_headers(&uri, &page)?;
    Ok((StatusCode::OK, headers, Json(page.content)))
}

#[utoipa::path(
    get,
    path = "/api/riddles/{id}",
    tag = "riddle",
    params(("id" = i64, Path, description = "Riddle id")),
    responses(
        (status = 200, description = "The riddle", body = Riddle),
        (status = 404, description = "No riddle with that id", body = Problem)
    )
)]
pub async fn get_riddle(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    tracing::debug!(id, "REST request to get Riddle");
    let riddle = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("riddle {}", id)))?;
    Ok((StatusCode::OK, Json(riddle)))
}

/// Delete a riddle. Deleting an absent id is not an error.
#[utoipa::path(
    delete,
    path = "/api/riddles/{id}",
    tag = "riddle",
    params(("id" = i64, Path, description = "Riddle id")),
    responses((status = 204, description = "Riddle deleted or already absent"))
)]
pub async fn delete_riddle(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    tracing::debug!(id, "REST request to delete Riddle");
    let removed = state.store.delete_by_id(id).await?;
    if !removed {
        tracing::debug!(id, "riddle already absent");
    }
    let headers = entity_deletion_alert(&state.config.app_name, ENTITY_NAME, &id.to_string())?;
    Ok((StatusCode::NO_CONTENT, headers))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_integers_only() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id(&i64::MAX.to_string()).unwrap(), i64::MAX);
        assert!(matches!(parse_id("abc"), Err(AppError::BadRequest(_))));
        assert!(parse_id("1.5").is_err());
    }
}
