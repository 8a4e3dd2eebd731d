//! Common types used throughout the proxy
//!
//! Records are pass-through payloads: the proxy never inspects their fields.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Records
// ============================================================================

/// One upstream record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Upstream record identifier
    pub id: String,
    /// Field name to value mapping
    #[serde(default)]
    pub fields: JsonObject,
    /// Creation timestamp as reported upstream
    #[serde(
        rename = "createdTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_time: Option<String>,
    /// Any other upstream keys, passed through untouched
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl Record {
    /// Create a record with no fields
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: JsonObject::new(),
            created_time: None,
            extra: JsonObject::new(),
        }
    }

    /// Add a field
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}

// ============================================================================
// Sorting
// ============================================================================

/// Sort direction understood by the upstream list endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Wire representation
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            other => Err(Error::invalid_value(
                "sort direction",
                format!("expected 'asc' or 'desc', got '{other}'"),
            )),
        }
    }
}

/// Single-field sort specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_deserialize_full() {
        let record: Record = serde_json::from_value(json!({
            "id": "rec1",
            "createdTime": "2024-01-01T00:00:00.000Z",
            "fields": {"Name": "A", "Count": 3}
        }))
        .unwrap();

        assert_eq!(record.id, "rec1");
        assert_eq!(record.fields["Name"], "A");
        assert_eq!(
            record.created_time.as_deref(),
            Some("2024-01-01T00:00:00.000Z")
        );
    }

    #[test]
    fn test_record_without_fields() {
        let record: Record = serde_json::from_value(json!({"id": "r2"})).unwrap();
        assert!(record.fields.is_empty());

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, json!({"id": "r2", "fields": {}}));
    }

    #[test]
    fn test_record_keeps_unknown_keys() {
        let input = json!({
            "id": "r1",
            "fields": {},
            "commentCount": 3,
            "createdTime": "2024-01-01T00:00:00.000Z"
        });
        let record: Record = serde_json::from_value(input.clone()).unwrap();

        assert_eq!(record.extra["commentCount"], 3);
        assert!(!record.extra.contains_key("id"));
        assert_eq!(serde_json::to_value(&record).unwrap(), input);
    }

    #[test]
    fn test_record_builder() {
        let record = Record::new("r1").with_field("Name", "A");
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"id": "r1", "fields": {"Name": "A"}})
        );
    }

    #[test]
    fn test_sort_direction_parse() {
        assert_eq!("asc".parse::<SortDirection>().unwrap(), SortDirection::Asc);
        assert_eq!("DESC".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert_eq!(
            " descending ".parse::<SortDirection>().unwrap(),
            SortDirection::Desc
        );
        assert!("sideways".parse::<SortDirection>().is_err());
    }

    #[test]
    fn test_sort_spec_serialize() {
        let sort = SortSpec::new("Date", SortDirection::Desc);
        assert_eq!(
            serde_json::to_value(&sort).unwrap(),
            json!({"field": "Date", "direction": "desc"})
        );
    }
}
