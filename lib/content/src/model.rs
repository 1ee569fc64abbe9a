//! Content rows as stored and returned to clients.

use chrono::{DateTime, Utc};
use folio_core::RecordId;
use serde::{Deserialize, Serialize};

/// Texts shown in the hero and about sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSettings {
    pub id: RecordId,
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub hero_description: Option<String>,
    pub about_text: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One entry of the skills grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: RecordId,
    pub name: String,
    pub description: Option<String>,
    /// Name of the icon the front-end renders for this skill.
    pub icon_name: Option<String>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One entry of the portfolio grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioProject {
    pub id: RecordId,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body returned in place of a row after a successful delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAck {
    pub success: bool,
}

impl DeleteAck {
    /// The acknowledgement for a completed delete.
    #[must_use]
    pub const fn deleted() -> Self {
        Self { success: true }
    }
}
