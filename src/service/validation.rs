//! Request validation for riddle bodies.

use crate::error::{AppError, FieldError};
use crate::model::{Riddle, RiddleDto, ENTITY_NAME};

pub struct RequestValidator;

impl RequestValidator {
    /// `name` must be present and not blank. Returns the entity with the body's id untouched.
    pub fn validate(body: RiddleDto) -> Result<Riddle, AppError> {
        let mut field_errors = Vec::new();
        let name = match body.name {
            None => {
                field_errors.push(field_error("name", "NotNull"));
                None
            }
            Some(s) if s.trim().is_empty() => {
                field_errors.push(field_error("name", "NotBlank"));
                None
            }
            Some(s) => Some(s),
        };
        match name {
            Some(name) if field_errors.is_empty() => Ok(Riddle { id: body.id, name }),
            _ => Err(AppError::Validation {
                object_name: ENTITY_NAME,
                field_errors,
            }),
        }
    }
}

fn field_error(field: &str, message: &str) -> FieldError {
    FieldError {
        object_name: ENTITY_NAME.to_string(),
        field: field.to_string(),
        message: message.to_string(),
    }
}
