//! Alert header helpers for mutating operations and failures.

use crate::error::AppError;
use axum::http::{HeaderMap, HeaderName, HeaderValue};

fn header_name(application: &str, suffix: &str) -> Result<HeaderName, AppError> {
    HeaderName::from_bytes(format!("x-{}-{}", application, suffix).as_bytes())
        .map_err(|e| AppError::Internal(format!("invalid header name for '{}': {}", application, e)))
}

fn header_value(value: &str) -> Result<HeaderValue, AppError> {
    HeaderValue::from_str(value).map_err(|e| AppError::Internal(format!("invalid header value '{}': {}", value, e)))
}

/// `X-{app}-alert: {app}.{entity}.{action}` and `X-{app}-params: {param}`.
pub fn alert(application: &str, message: &str, param: &str) -> Result<HeaderMap, AppError> {
    let mut headers = HeaderMap::new();
    headers.insert(header_name(application, "alert")?, header_value(message)?);
    headers.insert(header_name(application, "params")?, header_value(param)?);
    Ok(headers)
}

pub fn entity_creation_alert(application: &str, entity_name: &str, id: &str) -> Result<HeaderMap, AppError> {
    alert(application, &format!("{}.{}.created", application, entity_name), id)
}

pub fn entity_update_alert(application: &str, entity_name: &str, id: &str) -> Result<HeaderMap, AppError> {
    alert(application, &format!("{}.{}.updated", application, entity_name), id)
}

pub fn entity_deletion_alert(application: &str, entity_name: &str, id: &str) -> Result<HeaderMap, AppError> {
    alert(application, &format!("{}.{}.deleted", application, entity_name), id)
}

/// `X-{app}-error: error.{key}` and `X-{app}-params: {entity}`.
pub fn failure_alert(application: &str, entity_name: &str, error_key: &str) -> Result<HeaderMap, AppError> {
    let mut headers = HeaderMap::new();
    headers.insert(header_name(application, "error")?, header_value(&format!("error.{}", error_key))?);
    headers.insert(header_name(application, "params")?, header_value(entity_name)?);
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creation_alert_headers() {
        let h = entity_creation_alert("riddleApp", "riddle", "7").unwrap();
        assert_eq!(h.get("x-riddleapp-alert").unwrap(), "riddleApp.riddle.created");
        assert_eq!(h.get("x-riddleapp-params").unwrap(), "7");
    }

    #[test]
    fn update_and_deletion_alerts() {
        let h = entity_update_alert("app", "riddle", "1").unwrap();
        assert_eq!(h.get("x-app-alert").unwrap(), "app.riddle.updated");
        let h = entity_deletion_alert("app", "riddle", "1").unwrap();
        assert_eq!(h.get("x-app-alert").unwrap(), "app.riddle.deleted");
    }

    #[test]
    fn invalid_application_name_is_an_error() {
        assert!(alert("bad name", "m", "p").is_err());
    }
}
