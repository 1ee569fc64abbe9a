//! Resolution of raw admin update requests into typed mutations.
//!
//! An update request names its table as a string and carries an untyped
//! payload. [`Mutation::resolve`] turns that into a closed variant once, at
//! the boundary, so stores only ever match on known tables.

use crate::error::ContentError;
use crate::model::{DeleteAck, PortfolioProject, SiteSettings, Skill};
use crate::payload::{ProjectPatch, SiteSettingsPatch, SkillPatch};
use crate::table::ContentTable;
use folio_core::RecordId;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::str::FromStr;

/// Value of the `operation` payload field that marks a delete.
pub const DELETE_OPERATION: &str = "delete";

/// A payload bound to the table it targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPayload {
    SiteSettings(SiteSettingsPatch),
    Skill(SkillPatch),
    Project(ProjectPatch),
}

impl ContentPayload {
    /// Returns the table this payload targets.
    #[must_use]
    pub fn table(&self) -> ContentTable {
        match self {
            Self::SiteSettings(_) => ContentTable::SiteSettings,
            Self::Skill(_) => ContentTable::Skills,
            Self::Project(_) => ContentTable::PortfolioProjects,
        }
    }

    /// Parses `data` as the patch type of `table`.
    pub fn parse(table: ContentTable, data: Value) -> Result<Self, ContentError> {
        let data = match data {
            Value::Null => Value::Object(Default::default()),
            other => other,
        };
        Ok(match table {
            ContentTable::SiteSettings => Self::SiteSettings(parse_patch(data)?),
            ContentTable::Skills => Self::Skill(parse_patch(data)?),
            ContentTable::PortfolioProjects => Self::Project(parse_patch(data)?),
        })
    }

    /// Validates the payload as an update.
    pub fn validate(&self) -> Result<(), ContentError> {
        match self {
            Self::SiteSettings(patch) => patch.validate(),
            Self::Skill(patch) => patch.validate(),
            Self::Project(patch) => patch.validate(),
        }
    }
}

fn parse_patch<T: DeserializeOwned>(data: Value) -> Result<T, ContentError> {
    serde_json::from_value(data).map_err(|e| ContentError::InvalidPayload {
        reason: e.to_string(),
    })
}

/// A single atomic store operation requested by an admin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Create a new row.
    Insert(ContentPayload),
    /// Change the columns present in the payload on an existing row.
    Update { id: RecordId, payload: ContentPayload },
    /// Remove a row.
    Delete { table: ContentTable, id: RecordId },
}

impl Mutation {
    /// Resolves a raw request into a mutation.
    ///
    /// The branch is chosen in this order: a payload with
    /// `"operation": "delete"` deletes `id`; otherwise a present `id`
    /// updates that row; otherwise the payload is inserted.
    ///
    /// # Errors
    ///
    /// - [`ContentError::InvalidTable`] when `table` is not a content table
    /// - [`ContentError::InvalidRecordId`] when `id` is not a record id
    /// - [`ContentError::MissingRecordId`] for a delete without `id`
    /// - [`ContentError::InvalidPayload`] when `data` does not fit the table
    pub fn resolve(table: &str, data: Value, id: Option<&str>) -> Result<Self, ContentError> {
        let table = ContentTable::from_str(table)?;
        let id = id
            .map(|raw| {
                RecordId::from_str(raw).map_err(|_| ContentError::InvalidRecordId {
                    id: raw.to_string(),
                })
            })
            .transpose()?;

        let (operation, data) = split_operation(data)?;
        if let Some(operation) = operation {
            if operation != DELETE_OPERATION {
                return Err(ContentError::InvalidPayload {
                    reason: format!("unsupported operation '{operation}'"),
                });
            }
            let id = id.ok_or(ContentError::MissingRecordId)?;
            return Ok(Self::Delete { table, id });
        }

        let payload = ContentPayload::parse(table, data)?;
        Ok(match id {
            Some(id) => Self::Update { id, payload },
            None => Self::Insert(payload),
        })
    }

    /// Returns the table this mutation targets.
    #[must_use]
    pub fn table(&self) -> ContentTable {
        match self {
            Self::Insert(payload) | Self::Update { payload, .. } => payload.table(),
            Self::Delete { table, .. } => *table,
        }
    }

    /// Short name of the operation, for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Insert(_) => "insert",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
        }
    }
}

/// Removes the `operation` field from an object payload.
fn split_operation(data: Value) -> Result<(Option<String>, Value), ContentError> {
    match data {
        Value::Object(mut map) => match map.remove("operation") {
            None => Ok((None, Value::Object(map))),
            Some(Value::String(op)) => Ok((Some(op), Value::Object(map))),
            Some(other) => Err(ContentError::InvalidPayload {
                reason: format!("operation must be a string, got {other}"),
            }),
        },
        Value::Null => Ok((None, Value::Null)),
        other => Err(ContentError::InvalidPayload {
            reason: format!("expected an object, got {other}"),
        }),
    }
}

/// Result of an applied mutation, serialized as the response `data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MutationOutcome {
    Deleted(DeleteAck),
    SiteSettings(SiteSettings),
    Skill(Skill),
    Project(PortfolioProject),
}

impl MutationOutcome {
    /// Returns the id of the written row, if the mutation produced one.
    #[must_use]
    pub fn record_id(&self) -> Option<RecordId> {
        match self {
            Self::Deleted(_) => None,
            Self::SiteSettings(row) => Some(row.id),
            Self::Skill(row) => Some(row.id),
            Self::Project(row) => Some(row.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn insert_without_id() {
        let mutation = Mutation::resolve(
            "skills",
            json!({ "name": "Rust", "icon_name": "Code" }),
            None,
        )
        .expect("resolve");

        let Mutation::Insert(ContentPayload::Skill(patch)) = mutation else {
            panic!("expected skill insert");
        };
        assert_eq!(patch.name.as_deref(), Some("Rust"));
        assert_eq!(patch.icon_name.as_deref(), Some("Code"));
    }

    #[test]
    fn update_with_id() {
        let id = RecordId::new();
        let raw = id.as_ulid().to_string();
        let mutation = Mutation::resolve(
            "portfolio_projects",
            json!({ "display_order": 3 }),
            Some(raw.as_str()),
        )
        .expect("resolve");

        assert_eq!(mutation.kind(), "update");
        assert_eq!(mutation.table(), ContentTable::PortfolioProjects);
        let Mutation::Update { id: got, .. } = mutation else {
            panic!("expected update");
        };
        assert_eq!(got, id);
    }

    #[test]
    fn delete_marker_wins_over_update() {
        let id = RecordId::new();
        let mutation = Mutation::resolve(
            "skills",
            json!({ "operation": "delete" }),
            Some(id.to_string().as_str()),
        )
        .expect("resolve");
        assert_eq!(
            mutation,
            Mutation::Delete {
                table: ContentTable::Skills,
                id
            }
        );
    }

    #[test]
    fn delete_requires_id() {
        let err = Mutation::resolve("skills", json!({ "operation": "delete" }), None).unwrap_err();
        assert_eq!(err, ContentError::MissingRecordId);
    }

    #[test]
    fn unsupported_operation_is_rejected() {
        let err =
            Mutation::resolve("skills", json!({ "operation": "truncate" }), None).unwrap_err();
        assert!(matches!(err, ContentError::InvalidPayload { .. }));
    }

    #[test]
    fn invalid_table_wins_over_payload_errors() {
        let err = Mutation::resolve("users", json!("garbage"), Some("nope")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid table");
    }

    #[test]
    fn payload_must_fit_table() {
        let err = Mutation::resolve("site_settings", json!({ "name": "x" }), None).unwrap_err();
        assert!(err.to_string().starts_with("Invalid payload"));
    }

    #[test]
    fn null_payload_is_an_empty_patch() {
        let id = RecordId::new();
        let mutation =
            Mutation::resolve("site_settings", Value::Null, Some(id.to_string().as_str()))
                .expect("resolve");
        assert_eq!(
            mutation,
            Mutation::Update {
                id,
                payload: ContentPayload::SiteSettings(SiteSettingsPatch::default()),
            }
        );
    }

    #[test]
    fn bad_record_id() {
        let err = Mutation::resolve("skills", json!({}), Some("42")).unwrap_err();
        assert_eq!(
            err,
            ContentError::InvalidRecordId {
                id: "42".to_string()
            }
        );
    }

    #[test]
    fn deleted_outcome_serializes_as_ack() {
        let json = serde_json::to_value(MutationOutcome::Deleted(DeleteAck::deleted()))
            .expect("serialize");
        assert_eq!(json, json!({ "success": true }));
    }
}
