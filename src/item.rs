//! Host item validation
//!
//! The host hands over loosely-typed records. They are checked and converted
//! into [`Item`] here, and nowhere else.

use std::path::PathBuf;

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::error::{ExportError, Result};
use crate::util;

/// A validated host record
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Folder {
        id: String,
        title: String,
        parent_id: String,
    },
    Note {
        id: String,
        parent_id: String,
        title: String,
        created: DateTime<Utc>,
        body: String,
    },
    Resource {
        id: String,
        location: PathBuf,
    },
}

/// Kinds of host record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Note,
    Folder,
    Resource,
}

impl ItemKind {
    /// Parse a `type` name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "note" => Some(ItemKind::Note),
            "folder" | "notebook" => Some(ItemKind::Folder),
            "resource" => Some(ItemKind::Resource),
            _ => None,
        }
    }

    /// Parse a numeric `type_` code (1 note, 2 folder, 4 resource)
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(ItemKind::Note),
            2 => Some(ItemKind::Folder),
            4 => Some(ItemKind::Resource),
            _ => None,
        }
    }
}

impl Item {
    /// Validate a host record.
    ///
    /// Returns `Ok(None)` for record kinds that take no part in an export.
    pub fn from_value(index: usize, value: &Value) -> Result<Option<Item>> {
        let obj = value
            .as_object()
            .ok_or_else(|| ExportError::invalid_item(index, "record is not an object"))?;

        let kind = match (obj.get("type"), obj.get("type_")) {
            (Some(Value::String(name)), _) => ItemKind::from_name(name),
            (_, Some(code)) => code.as_i64().and_then(ItemKind::from_code),
            (Some(other), None) => other.as_i64().and_then(ItemKind::from_code),
            (None, None) => return Err(ExportError::invalid_item(index, "missing item type")),
        };
        let Some(kind) = kind else {
            return Ok(None);
        };

        let id = str_field(obj, "id");
        if !util::is_safe_id(id) {
            return Err(ExportError::invalid_item(index, format!("unusable id {:?}", id)));
        }
        let id = id.to_string();

        let item = match kind {
            ItemKind::Folder => Item::Folder {
                id,
                title: str_field(obj, "title").to_string(),
                parent_id: str_field(obj, "parent_id").to_string(),
            },
            ItemKind::Note => {
                let millis = obj
                    .get("created_time")
                    .and_then(Value::as_i64)
                    .ok_or_else(|| ExportError::invalid_item(index, "created_time is not an integer"))?;
                let created = Utc
                    .timestamp_millis_opt(millis)
                    .single()
                    .ok_or_else(|| ExportError::invalid_item(index, format!("created_time {} out of range", millis)))?;
                Item::Note {
                    id,
                    parent_id: str_field(obj, "parent_id").to_string(),
                    title: str_field(obj, "title").to_string(),
                    created,
                    body: str_field(obj, "body").to_string(),
                }
            }
            ItemKind::Resource => {
                let location = str_field(obj, "location");
                if location.is_empty() {
                    return Err(ExportError::invalid_item(index, "resource without location"));
                }
                Item::Resource {
                    id,
                    location: PathBuf::from(location),
                }
            }
        };

        Ok(Some(item))
    }
}

/// String field or empty; `null` counts as empty
fn str_field<'v>(obj: &'v serde_json::Map<String, Value>, key: &str) -> &'v str {
    obj.get(key).and_then(Value::as_str).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_folder_by_name() {
        let item = Item::from_value(0, &json!({"type": "folder", "id": "f1", "title": "Notes", "parent_id": null}))
            .unwrap()
            .unwrap();
        assert_eq!(
            item,
            Item::Folder { id: "f1".into(), title: "Notes".into(), parent_id: "".into() }
        );
    }

    #[test]
    fn test_note_by_code() {
        let item = Item::from_value(
            0,
            &json!({"type_": 1, "id": "n1", "title": "T", "parent_id": "f1", "created_time": 1700000000000i64, "body": "b"}),
        )
        .unwrap()
        .unwrap();
        match item {
            Item::Note { created, parent_id, .. } => {
                assert_eq!(created.timestamp_millis(), 1_700_000_000_000);
                assert_eq!(parent_id, "f1");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_resource_requires_location() {
        let err = Item::from_value(2, &json!({"type": "resource", "id": "r1"})).unwrap_err();
        assert!(matches!(err, ExportError::InvalidItem { index: 2, .. }));
    }

    #[test]
    fn test_unknown_kind_is_skipped() {
        assert_eq!(Item::from_value(0, &json!({"type_": 5, "id": "t1"})).unwrap(), None);
        assert_eq!(Item::from_value(0, &json!({"type": "tag", "id": "t1"})).unwrap(), None);
    }

    #[test]
    fn test_invalid_records() {
        assert!(Item::from_value(0, &json!("folder")).is_err());
        assert!(Item::from_value(0, &json!({"id": "x"})).is_err());
        assert!(Item::from_value(0, &json!({"type": "folder", "id": "../etc"})).is_err());
        assert!(Item::from_value(0, &json!({"type": "note", "id": "n", "created_time": "yesterday"})).is_err());
    }
}
