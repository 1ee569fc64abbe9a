//! Postgres repositories.
//!
//! - `admin_users`: read-only allow-list lookups
//! - `site_settings`, `skills`, `portfolio_projects`: content reads and
//!   single-row mutations

pub mod admin;
pub mod content;

pub use admin::AdminUserRepository;
pub use content::ContentRepository;

use folio_core::RecordId;
use std::str::FromStr;

/// Parses a stored record id, reporting corruption as a decode error.
fn decode_record_id(raw: &str) -> Result<RecordId, sqlx::Error> {
    RecordId::from_str(raw).map_err(|e| {
        sqlx::Error::Decode(Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("invalid record id '{raw}': {e}"),
        )))
    })
}

/// Formats a record id for storage.
fn encode_record_id(id: RecordId) -> String {
    id.as_ulid().to_string()
}
