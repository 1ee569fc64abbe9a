//! In-memory content store.
//!
//! Mirrors the Postgres repository's semantics closely enough to run the
//! admin functions without a database (tests, local demos).

use crate::error::ContentError;
use crate::model::{DeleteAck, PortfolioProject, SiteSettings, Skill};
use crate::mutation::{ContentPayload, Mutation, MutationOutcome};
use crate::store::ContentStore;
use crate::table::ContentTable;
use async_trait::async_trait;
use chrono::Utc;
use folio_core::RecordId;
use rootcause::prelude::Report;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

#[derive(Debug, Default)]
struct Tables {
    site_settings: Vec<SiteSettings>,
    skills: Vec<Skill>,
    projects: Vec<PortfolioProject>,
}

/// A [`ContentStore`] holding rows in memory.
#[derive(Debug, Default)]
pub struct MemoryContentStore {
    tables: RwLock<Tables>,
}

impl MemoryContentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// The explicit order if given, otherwise one past the current maximum.
fn insert_order<'a>(
    explicit: Option<i32>,
    orders: impl Iterator<Item = &'a i32>,
    table: ContentTable,
) -> Result<i32, ContentError> {
    if let Some(order) = explicit {
        return Ok(order);
    }
    match orders.max() {
        None => Ok(0),
        Some(max) => max
            .checked_add(1)
            .ok_or(ContentError::DisplayOrderExhausted { table }),
    }
}

fn not_found(table: ContentTable, id: RecordId) -> Report<ContentError> {
    ContentError::NotFound { table, id }.into()
}

fn remove_by_id<T>(
    rows: &mut Vec<T>,
    id: RecordId,
    table: ContentTable,
    row_id: impl Fn(&T) -> RecordId,
) -> Result<(), Report<ContentError>> {
    let before = rows.len();
    rows.retain(|row| row_id(row) != id);
    if rows.len() == before {
        return Err(not_found(table, id));
    }
    Ok(())
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    #[instrument(skip(self, mutation), fields(table = %mutation.table(), kind = mutation.kind()))]
    async fn apply(&self, mutation: Mutation) -> Result<MutationOutcome, Report<ContentError>> {
        let now = Utc::now();
        let mut tables = self.tables.write().await;

        let outcome = match mutation {
            Mutation::Insert(ContentPayload::SiteSettings(patch)) => {
                let row = patch.into_row(RecordId::new(), now)?;
                tables.site_settings.push(row.clone());
                MutationOutcome::SiteSettings(row)
            }
            Mutation::Insert(ContentPayload::Skill(patch)) => {
                let order = insert_order(
                    patch.display_order,
                    tables.skills.iter().map(|s| &s.display_order),
                    ContentTable::Skills,
                )?;
                let row = patch.into_row(RecordId::new(), order, now)?;
                tables.skills.push(row.clone());
                MutationOutcome::Skill(row)
            }
            Mutation::Insert(ContentPayload::Project(patch)) => {
                let order = insert_order(
                    patch.display_order,
                    tables.projects.iter().map(|p| &p.display_order),
                    ContentTable::PortfolioProjects,
                )?;
                let row = patch.into_row(RecordId::new(), order, now)?;
                tables.projects.push(row.clone());
                MutationOutcome::Project(row)
            }
            Mutation::Update { id, payload } => {
                payload.validate()?;
                let table = payload.table();
                match payload {
                    ContentPayload::SiteSettings(patch) => {
                        let row = tables
                            .site_settings
                            .iter_mut()
                            .find(|r| r.id == id)
                            .ok_or_else(|| not_found(table, id))?;
                        patch.apply_to(row, now);
                        MutationOutcome::SiteSettings(row.clone())
                    }
                    ContentPayload::Skill(patch) => {
                        let row = tables
                            .skills
                            .iter_mut()
                            .find(|r| r.id == id)
                            .ok_or_else(|| not_found(table, id))?;
                        patch.apply_to(row, now);
                        MutationOutcome::Skill(row.clone())
                    }
                    ContentPayload::Project(patch) => {
                        let row = tables
                            .projects
                            .iter_mut()
                            .find(|r| r.id == id)
                            .ok_or_else(|| not_found(table, id))?;
                        patch.apply_to(row, now);
                        MutationOutcome::Project(row.clone())
                    }
                }
            }
            Mutation::Delete { table, id } => {
                match table {
                    ContentTable::SiteSettings => {
                        remove_by_id(&mut tables.site_settings, id, table, |r| r.id)?
                    }
                    ContentTable::Skills => remove_by_id(&mut tables.skills, id, table, |r| r.id)?,
                    ContentTable::PortfolioProjects => {
                        remove_by_id(&mut tables.projects, id, table, |r| r.id)?
                    }
                }
                MutationOutcome::Deleted(DeleteAck::deleted())
            }
        };

        debug!(record_id = ?outcome.record_id(), "mutation applied");
        Ok(outcome)
    }

    async fn site_settings(&self) -> Result<Option<SiteSettings>, Report<ContentError>> {
        let tables = self.tables.read().await;
        Ok(tables
            .site_settings
            .iter()
            .min_by_key(|row| row.created_at)
            .cloned())
    }

    async fn skills(&self) -> Result<Vec<Skill>, Report<ContentError>> {
        let mut rows = self.tables.read().await.skills.clone();
        rows.sort_by_key(|row| (row.display_order, row.created_at));
        Ok(rows)
    }

    async fn projects(&self) -> Result<Vec<PortfolioProject>, Report<ContentError>> {
        let mut rows = self.tables.read().await.projects.clone();
        rows.sort_by_key(|row| (row.display_order, row.created_at));
        Ok(rows)
    }
}
