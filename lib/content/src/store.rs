//! Storage abstraction for content tables.

use crate::error::ContentError;
use crate::model::{PortfolioProject, SiteSettings, Skill};
use crate::mutation::{Mutation, MutationOutcome};
use async_trait::async_trait;
use rootcause::prelude::Report;

/// Backing store for the content tables.
///
/// Each call is one independent store operation. There is no way to group
/// several mutations into a transaction.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Applies a single mutation and returns the written row.
    ///
    /// Updates and deletes of a missing id fail with
    /// [`ContentError::NotFound`].
    async fn apply(&self, mutation: Mutation) -> Result<MutationOutcome, Report<ContentError>>;

    /// Returns the site settings row, if one exists.
    ///
    /// When several rows exist the oldest one wins.
    async fn site_settings(&self) -> Result<Option<SiteSettings>, Report<ContentError>>;

    /// Returns all skills ordered for display.
    async fn skills(&self) -> Result<Vec<Skill>, Report<ContentError>>;

    /// Returns all portfolio projects ordered for display.
    async fn projects(&self) -> Result<Vec<PortfolioProject>, Report<ContentError>>;
}
