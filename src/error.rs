//! Typed errors and HTTP mapping to problem JSON.

use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

pub const PROBLEM_WITH_MESSAGE: &str = "/problem/problem-with-message";
pub const CONSTRAINT_VIOLATION: &str = "/problem/constraint-violation";
pub const DEFAULT_PROBLEM_TYPE: &str = "about:blank";
pub const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
    #[error("invalid identifier for {key}: '{value}'")]
    InvalidIdentifier { key: &'static str, value: String },
    #[error("config load: {0}")]
    Load(String),
}

/// One rejected field of a request body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub object_name: String,
    pub field: String,
    pub message: String,
}

/// Client error tied to an entity, rendered with `error.{error_key}` and alert headers.
#[derive(Debug)]
pub struct BadRequestAlert {
    pub application: String,
    pub entity_name: &'static str,
    pub error_key: &'static str,
    pub title: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation failed for {object_name}")]
    Validation {
        object_name: &'static str,
        field_errors: Vec<FieldError>,
    },
    #[error("{}", .0.title)]
    BadRequestAlert(Box<BadRequestAlert>),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("rejected body: {message}")]
    Rejected { status: StatusCode, message: String },
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("internal: {0}")]
    Internal(String),
}

impl AppError {
    pub fn bad_request_alert(
        application: &str,
        title: impl Into<String>,
        entity_name: &'static str,
        error_key: &'static str,
    ) -> Self {
        AppError::BadRequestAlert(Box::new(BadRequestAlert {
            application: application.to_string(),
            entity_name,
            error_key,
            title: title.into(),
        }))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation { .. } | AppError::BadRequestAlert(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Rejected { status, .. } => *status,
            AppError::Db(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            AppError::Config(_) | AppError::Db(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let status = match rejection {
            JsonRejection::JsonDataError(_) => StatusCode::BAD_REQUEST,
            ref other => other.status(),
        };
        AppError::Rejected {
            status,
            message: rejection.body_text(),
        }
    }
}

/// Problem JSON body returned for every error response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<Vec<FieldError>>,
}

impl Problem {
    fn http(status: StatusCode, title: String) -> Self {
        Problem {
            type_: DEFAULT_PROBLEM_TYPE.to_string(),
            title,
            status: status.as_u16(),
            message: format!("error.http.{}", status.as_u16()),
            params: None,
            entity_name: None,
            error_key: None,
            field_errors: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static(PROBLEM_CONTENT_TYPE),
        );
        let body = match self {
            AppError::Validation {
                object_name,
                field_errors,
            } => Problem {
                type_: CONSTRAINT_VIOLATION.to_string(),
                title: "Method argument not valid".into(),
                status: status.as_u16(),
                message: "error.validation".into(),
                params: Some(object_name.to_string()),
                entity_name: None,
                error_key: None,
                field_errors: Some(field_errors),
            },
            AppError::BadRequestAlert(alert) => {
                if let Ok(alert_headers) = crate::response::failure_alert(
                    &alert.application,
                    alert.entity_name,
                    alert.error_key,
                ) {
                    headers.extend(alert_headers);
                }
                Problem {
                    type_: PROBLEM_WITH_MESSAGE.to_string(),
                    title: alert.title,
                    status: status.as_u16(),
                    message: format!("error.{}", alert.error_key),
                    params: Some(alert.entity_name.to_string()),
                    entity_name: Some(alert.entity_name.to_string()),
                    error_key: Some(alert.error_key.to_string()),
                    field_errors: None,
                }
            }
            AppError::NotFound(what) => Problem::http(status, format!("Not Found: {}", what)),
            AppError::BadRequest(msg) => Problem::http(status, msg),
            AppError::Rejected { message, .. } => Problem::http(status, message),
            other => {
                tracing::error!(error = %other, "request failed");
                Problem::http(status, "Internal Server Error".into())
            }
        };
        (status, headers, Json(body)).into_response()
    }
}
