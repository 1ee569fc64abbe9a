//! The fixed set of tables the admin panel may write to.

use crate::error::ContentError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A content table writable through the admin update function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentTable {
    /// Hero and about texts.
    SiteSettings,
    /// The skills grid.
    Skills,
    /// The portfolio grid.
    PortfolioProjects,
}

impl ContentTable {
    /// All content tables.
    pub const ALL: [Self; 3] = [Self::SiteSettings, Self::Skills, Self::PortfolioProjects];

    /// Returns the table name as it appears on the wire and in the database.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SiteSettings => "site_settings",
            Self::Skills => "skills",
            Self::PortfolioProjects => "portfolio_projects",
        }
    }

    /// Returns true if rows of this table carry a `display_order`.
    #[must_use]
    pub const fn is_ordered(&self) -> bool {
        matches!(self, Self::Skills | Self::PortfolioProjects)
    }
}

impl fmt::Display for ContentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentTable {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|table| table.as_str() == s)
            .ok_or_else(|| ContentError::InvalidTable {
                table: s.to_string(),
            })
    }
}
