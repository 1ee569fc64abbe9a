//! Error types for content operations.
//!
//! The `Display` text of every variant is safe to hand back to the admin
//! client; storage details are included verbatim.

use crate::table::ContentTable;
use folio_core::RecordId;
use std::fmt;

/// Errors from resolving or applying a content mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    /// The target table is not one of the content tables.
    InvalidTable { table: String },
    /// The payload does not fit the target table.
    InvalidPayload { reason: String },
    /// The record id could not be parsed.
    InvalidRecordId { id: String },
    /// A required column was absent or blank.
    MissingField { field: &'static str },
    /// A delete was requested without a record id.
    MissingRecordId,
    /// No row with the given id exists.
    NotFound { table: ContentTable, id: RecordId },
    /// The table's highest display order leaves no room for a default one.
    DisplayOrderExhausted { table: ContentTable },
    /// The backing store failed.
    Storage { details: String },
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTable { .. } => write!(f, "Invalid table"),
            Self::InvalidPayload { reason } => write!(f, "Invalid payload: {reason}"),
            Self::InvalidRecordId { id } => write!(f, "Invalid record id: {id}"),
            Self::MissingField { field } => write!(f, "missing required field '{field}'"),
            Self::MissingRecordId => write!(f, "Record id is required for delete"),
            Self::NotFound { .. } => write!(f, "Record not found"),
            Self::DisplayOrderExhausted { table } => write!(
                f,
                "No display order left in {table}; pass display_order explicitly"
            ),
            Self::Storage { details } => write!(f, "{details}"),
        }
    }
}

impl std::error::Error for ContentError {}

impl ContentError {
    /// Returns true for the not-found class of failures.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Wraps a storage-layer failure.
    pub fn storage(details: impl fmt::Display) -> Self {
        Self::Storage {
            details: details.to_string(),
        }
    }
}
