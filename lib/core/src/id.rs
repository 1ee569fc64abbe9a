//! Strongly-typed identifiers.
//!
//! Two kinds of id flow through the system:
//! - [`DiscordId`]: assigned by Discord, opaque to us, the allow-list key
//! - [`RecordId`]: a ULID we mint for every content row we insert

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Error returned when parsing an ID from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// The type of ID that failed to parse.
    pub id_type: &'static str,
    /// The reason for the parse failure.
    pub reason: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {}: {}", self.id_type, self.reason)
    }
}

impl std::error::Error for ParseIdError {}

/// A Discord user id (a snowflake, carried as a string).
///
/// Discord ids are provider-assigned and never generated locally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscordId(String);

impl DiscordId {
    /// Creates a Discord id from a string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the id is empty or whitespace only.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for DiscordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for DiscordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for DiscordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Unique identifier for a content row (skill, project, site settings).
///
/// Serializes as the bare ULID; displays with a `rec_` prefix. Parsing
/// accepts both forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Ulid);

impl RecordId {
    const PREFIX: &'static str = "rec";

    /// Creates a new id with a randomly generated ULID.
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Creates an id from a ULID.
    #[must_use]
    pub const fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }

    /// Returns the underlying ULID.
    #[must_use]
    pub const fn as_ulid(&self) -> Ulid {
        self.0
    }

    /// Returns the prefix used for display formatting.
    #[must_use]
    pub const fn prefix() -> &'static str {
        Self::PREFIX
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", Self::PREFIX, self.0)
    }
}

impl FromStr for RecordId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ulid_str = s
            .strip_prefix(Self::PREFIX)
            .and_then(|rest| rest.strip_prefix('_'))
            .unwrap_or(s);

        Ulid::from_str(ulid_str)
            .map(Self)
            .map_err(|e| ParseIdError {
                id_type: "RecordId",
                reason: e.to_string(),
            })
    }
}

impl From<Ulid> for RecordId {
    fn from(ulid: Ulid) -> Self {
        Self(ulid)
    }
}

impl From<RecordId> for Ulid {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_display_format() {
        let id = RecordId::new();
        assert!(id.to_string().starts_with("rec_"));
    }

    #[test]
    fn parse_with_prefix() {
        let id = RecordId::new();
        let parsed: RecordId = id.to_string().parse().expect("should parse");
        assert_eq!(id, parsed);
    }

    #[test]
    fn parse_without_prefix() {
        let ulid = Ulid::new();
        let id: RecordId = ulid.to_string().parse().expect("should parse");
        assert_eq!(id.as_ulid(), ulid);
    }

    #[test]
    fn parse_invalid_ulid() {
        let err = "not_a_ulid".parse::<RecordId>().unwrap_err();
        assert_eq!(err.id_type, "RecordId");
    }

    #[test]
    fn record_id_serializes_as_bare_ulid() {
        let id = RecordId::new();
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, format!("\"{}\"", id.as_ulid()));
    }

    #[test]
    fn discord_id_is_transparent() {
        let id: DiscordId = serde_json::from_str("\"80351110224678912\"").expect("deserialize");
        assert_eq!(id.as_str(), "80351110224678912");
        assert_eq!(serde_json::to_string(&id).expect("serialize"), "\"80351110224678912\"");
    }

    #[test]
    fn blank_discord_id() {
        assert!(DiscordId::new("  ").is_blank());
        assert!(!DiscordId::new("42").is_blank());
    }
}
