//! Riddle entity and its inbound wire shape.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const ENTITY_NAME: &str = "riddle";

/// A Riddle row. `id` is absent until the store assigns one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Riddle {
    pub id: Option<i64>,
    pub name: String,
}

impl Riddle {
    pub fn new(name: impl Into<String>) -> Self {
        Riddle {
            id: None,
            name: name.into(),
        }
    }

    pub fn with_id(id: i64, name: impl Into<String>) -> Self {
        Riddle {
            id: Some(id),
            name: name.into(),
        }
    }
}

/// Request body for create and update. Fields are optional so that a missing
/// `name` surfaces as a field error instead of a decoding failure.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct RiddleDto {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Properties a riddle listing can be sorted by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RiddleProperty {
    Id,
    Name,
}

impl RiddleProperty {
    pub fn column(self) -> &'static str {
        match self {
            RiddleProperty::Id => "id",
            RiddleProperty::Name => "name",
        }
    }
}

impl std::str::FromStr for RiddleProperty {
    type Err = crate::error::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(RiddleProperty::Id),
            "name" => Ok(RiddleProperty::Name),
            _ => Err(crate::error::AppError::BadRequest(format!(
                "no property '{}' found for type {}",
                s, ENTITY_NAME
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_null_id_before_persistence() {
        let v = serde_json::to_value(Riddle::new("AAAAAAAAAA")).unwrap();
        assert_eq!(v, serde_json::json!({"id": null, "name": "AAAAAAAAAA"}));
    }

    #[test]
    fn dto_accepts_missing_fields() {
        let dto: RiddleDto = serde_json::from_str("{}").unwrap();
        assert!(dto.id.is_none());
        assert!(dto.name.is_none());
    }

    #[test]
    fn property_parsing() {
        assert_eq!("id".parse::<RiddleProperty>().unwrap(), RiddleProperty::Id);
        assert_eq!("name".parse::<RiddleProperty>().unwrap().column(), "name");
        assert!("answer".parse::<RiddleProperty>().is_err());
    }
}
