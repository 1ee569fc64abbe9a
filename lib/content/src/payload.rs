//! Patch payloads accepted by the admin update function.
//!
//! Every column is optional: an update only touches the columns present in
//! the patch. Inserts additionally require the table's mandatory column.

use crate::error::ContentError;
use crate::model::{PortfolioProject, SiteSettings, Skill};
use chrono::{DateTime, Utc};
use folio_core::RecordId;
use serde::{Deserialize, Serialize};

/// Columns of `site_settings` that an admin may change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteSettingsPatch {
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub hero_description: Option<String>,
    pub about_text: Option<String>,
}

/// Columns of `skills` that an admin may change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkillPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon_name: Option<String>,
    pub display_order: Option<i32>,
}

/// Columns of `portfolio_projects` that an admin may change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub display_order: Option<i32>,
}

/// Rejects a required column that is present but blank.
fn check_not_blank(value: Option<&str>, field: &'static str) -> Result<(), ContentError> {
    match value {
        Some(v) if v.trim().is_empty() => Err(ContentError::MissingField { field }),
        _ => Ok(()),
    }
}

/// Returns a required column, rejecting absent or blank values.
fn require(value: Option<String>, field: &'static str) -> Result<String, ContentError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ContentError::MissingField { field }),
    }
}

fn replace<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn replace_opt<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

impl SiteSettingsPatch {
    /// Validates the patch for an update.
    pub fn validate(&self) -> Result<(), ContentError> {
        Ok(())
    }

    /// Builds a new row from the patch.
    pub fn into_row(self, id: RecordId, now: DateTime<Utc>) -> Result<SiteSettings, ContentError> {
        Ok(SiteSettings {
            id,
            hero_title: self.hero_title,
            hero_subtitle: self.hero_subtitle,
            hero_description: self.hero_description,
            about_text: self.about_text,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies the patch to an existing row.
    pub fn apply_to(self, row: &mut SiteSettings, now: DateTime<Utc>) {
        replace_opt(&mut row.hero_title, self.hero_title);
        replace_opt(&mut row.hero_subtitle, self.hero_subtitle);
        replace_opt(&mut row.hero_description, self.hero_description);
        replace_opt(&mut row.about_text, self.about_text);
        row.updated_at = now;
    }
}

impl SkillPatch {
    /// Validates the patch for an update.
    pub fn validate(&self) -> Result<(), ContentError> {
        check_not_blank(self.name.as_deref(), "name")
    }

    /// Builds a new row from the patch.
    ///
    /// `next_order` is used when the patch carries no `display_order`.
    pub fn into_row(
        self,
        id: RecordId,
        next_order: i32,
        now: DateTime<Utc>,
    ) -> Result<Skill, ContentError> {
        Ok(Skill {
            id,
            name: require(self.name, "name")?,
            description: self.description,
            icon_name: self.icon_name,
            display_order: self.display_order.unwrap_or(next_order),
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies the patch to an existing row.
    pub fn apply_to(self, row: &mut Skill, now: DateTime<Utc>) {
        replace(&mut row.name, self.name);
        replace_opt(&mut row.description, self.description);
        replace_opt(&mut row.icon_name, self.icon_name);
        replace(&mut row.display_order, self.display_order);
        row.updated_at = now;
    }
}

impl ProjectPatch {
    /// Validates the patch for an update.
    pub fn validate(&self) -> Result<(), ContentError> {
        check_not_blank(self.title.as_deref(), "title")
    }

    /// Builds a new row from the patch.
    ///
    /// `next_order` is used when the patch carries no `display_order`.
    pub fn into_row(
        self,
        id: RecordId,
        next_order: i32,
        now: DateTime<Utc>,
    ) -> Result<PortfolioProject, ContentError> {
        Ok(PortfolioProject {
            id,
            title: require(self.title, "title")?,
            description: self.description,
            image_url: self.image_url,
            display_order: self.display_order.unwrap_or(next_order),
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies the patch to an existing row.
    pub fn apply_to(self, row: &mut PortfolioProject, now: DateTime<Utc>) {
        replace(&mut row.title, self.title);
        replace_opt(&mut row.description, self.description);
        replace_opt(&mut row.image_url, self.image_url);
        replace(&mut row.display_order, self.display_order);
        row.updated_at = now;
    }
}
