//! Repository for the content tables.

use super::{decode_record_id, encode_record_id};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use folio_content::{
    ContentError, ContentPayload, ContentStore, ContentTable, DeleteAck, Mutation,
    MutationOutcome, PortfolioProject, ProjectPatch, SiteSettings, SiteSettingsPatch, Skill,
    SkillPatch,
};
use folio_core::RecordId;
use rootcause::prelude::Report;
use sqlx::{FromRow, PgPool};
use tracing::{debug, instrument};

/// Row type for `site_settings` queries.
#[derive(FromRow)]
struct SiteSettingsRow {
    id: String,
    hero_title: Option<String>,
    hero_subtitle: Option<String>,
    hero_description: Option<String>,
    about_text: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SiteSettingsRow {
    fn try_into_settings(self) -> Result<SiteSettings, sqlx::Error> {
        Ok(SiteSettings {
            id: decode_record_id(&self.id)?,
            hero_title: self.hero_title,
            hero_subtitle: self.hero_subtitle,
            hero_description: self.hero_description,
            about_text: self.about_text,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Row type for `skills` queries.
#[derive(FromRow)]
struct SkillRow {
    id: String,
    name: String,
    description: Option<String>,
    icon_name: Option<String>,
    display_order: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SkillRow {
    fn try_into_skill(self) -> Result<Skill, sqlx::Error> {
        Ok(Skill {
            id: decode_record_id(&self.id)?,
            name: self.name,
            description: self.description,
            icon_name: self.icon_name,
            display_order: self.display_order,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Row type for `portfolio_projects` queries.
#[derive(FromRow)]
struct ProjectRow {
    id: String,
    title: String,
    description: Option<String>,
    image_url: Option<String>,
    display_order: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProjectRow {
    fn try_into_project(self) -> Result<PortfolioProject, sqlx::Error> {
        Ok(PortfolioProject {
            id: decode_record_id(&self.id)?,
            title: self.title,
            description: self.description,
            image_url: self.image_url,
            display_order: self.display_order,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const SETTINGS_COLUMNS: &str =
    "id, hero_title, hero_subtitle, hero_description, about_text, created_at, updated_at";
const SKILL_COLUMNS: &str =
    "id, name, description, icon_name, display_order, created_at, updated_at";
const PROJECT_COLUMNS: &str =
    "id, title, description, image_url, display_order, created_at, updated_at";

fn storage(err: sqlx::Error) -> Report<ContentError> {
    ContentError::storage(err).into()
}

/// Maps an insert failure, recognising an overflowing default display order.
fn insert_failed(table: ContentTable, err: sqlx::Error) -> Report<ContentError> {
    if is_numeric_overflow(&err) {
        return ContentError::DisplayOrderExhausted { table }.into();
    }
    storage(err)
}

/// SQLSTATE 22003, `numeric_value_out_of_range`.
fn is_numeric_overflow(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == "22003")
}

fn not_found(table: ContentTable, id: RecordId) -> Report<ContentError> {
    ContentError::NotFound { table, id }.into()
}

/// Content reads and single-row mutations over Postgres.
///
/// Each mutation is one statement, including the default display order of
/// an insert. Updates only touch the columns present
/// in the patch; a column cannot be cleared back to `NULL` through a patch.
#[derive(Clone)]
pub struct ContentRepository {
    pool: PgPool,
}

impl ContentRepository {
    /// Creates a new content repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_settings(
        &self,
        patch: SiteSettingsPatch,
        now: DateTime<Utc>,
    ) -> Result<SiteSettings, Report<ContentError>> {
        let row = patch.into_row(RecordId::new(), now)?;
        let stored: SiteSettingsRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO site_settings ({SETTINGS_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {SETTINGS_COLUMNS}
            "#
        ))
        .bind(encode_record_id(row.id))
        .bind(&row.hero_title)
        .bind(&row.hero_subtitle)
        .bind(&row.hero_description)
        .bind(&row.about_text)
        .bind(row.created_at)
        .bind(row.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(storage)?;
        stored.try_into_settings().map_err(storage)
    }

    async fn insert_skill(
        &self,
        patch: SkillPatch,
        now: DateTime<Utc>,
    ) -> Result<Skill, Report<ContentError>> {
        // The default order is resolved inside the INSERT; the 0 is a placeholder.
        let display_order = patch.display_order;
        let row = patch.into_row(RecordId::new(), 0, now)?;
        let stored: SkillRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO skills ({SKILL_COLUMNS})
            VALUES (
                $1, $2, $3, $4,
                COALESCE($5, (SELECT MAX(display_order) + 1 FROM skills), 0),
                $6, $7
            )
            RETURNING {SKILL_COLUMNS}
            "#
        ))
        .bind(encode_record_id(row.id))
        .bind(&row.name)
        .bind(&row.description)
        .bind(&row.icon_name)
        .bind(display_order)
        .bind(row.created_at)
        .bind(row.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| insert_failed(ContentTable::Skills, e))?;
        stored.try_into_skill().map_err(storage)
    }

    async fn insert_project(
        &self,
        patch: ProjectPatch,
        now: DateTime<Utc>,
    ) -> Result<PortfolioProject, Report<ContentError>> {
        // The default order is resolved inside the INSERT; the 0 is a placeholder.
        let display_order = patch.display_order;
        let row = patch.into_row(RecordId::new(), 0, now)?;
        let stored: ProjectRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO portfolio_projects ({PROJECT_COLUMNS})
            VALUES (
                $1, $2, $3, $4,
                COALESCE($5, (SELECT MAX(display_order) + 1 FROM portfolio_projects), 0),
                $6, $7
            )
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(encode_record_id(row.id))
        .bind(&row.title)
        .bind(&row.description)
        .bind(&row.image_url)
        .bind(display_order)
        .bind(row.created_at)
        .bind(row.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| insert_failed(ContentTable::PortfolioProjects, e))?;
        stored.try_into_project().map_err(storage)
    }

    async fn update_settings(
        &self,
        id: RecordId,
        patch: SiteSettingsPatch,
        now: DateTime<Utc>,
    ) -> Result<SiteSettings, Report<ContentError>> {
        let stored: Option<SiteSettingsRow> = sqlx::query_as(&format!(
            r#"
            UPDATE site_settings SET
                hero_title = COALESCE($2, hero_title),
                hero_subtitle = COALESCE($3, hero_subtitle),
                hero_description = COALESCE($4, hero_description),
                about_text = COALESCE($5, about_text),
                updated_at = $6
            WHERE id = $1
            RETURNING {SETTINGS_COLUMNS}
            "#
        ))
        .bind(encode_record_id(id))
        .bind(patch.hero_title)
        .bind(patch.hero_subtitle)
        .bind(patch.hero_description)
        .bind(patch.about_text)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;
        stored
            .ok_or_else(|| not_found(ContentTable::SiteSettings, id))?
            .try_into_settings()
            .map_err(storage)
    }

    async fn update_skill(
        &self,
        id: RecordId,
        patch: SkillPatch,
        now: DateTime<Utc>,
    ) -> Result<Skill, Report<ContentError>> {
        let stored: Option<SkillRow> = sqlx::query_as(&format!(
            r#"
            UPDATE skills SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                icon_name = COALESCE($4, icon_name),
                display_order = COALESCE($5, display_order),
                updated_at = $6
            WHERE id = $1
            RETURNING {SKILL_COLUMNS}
            "#
        ))
        .bind(encode_record_id(id))
        .bind(patch.name)
        .bind(patch.description)
        .bind(patch.icon_name)
        .bind(patch.display_order)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;
        stored
            .ok_or_else(|| not_found(ContentTable::Skills, id))?
            .try_into_skill()
            .map_err(storage)
    }

    async fn update_project(
        &self,
        id: RecordId,
        patch: ProjectPatch,
        now: DateTime<Utc>,
    ) -> Result<PortfolioProject, Report<ContentError>> {
        let stored: Option<ProjectRow> = sqlx::query_as(&format!(
            r#"
            UPDATE portfolio_projects SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                image_url = COALESCE($4, image_url),
                display_order = COALESCE($5, display_order),
                updated_at = $6
            WHERE id = $1
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(encode_record_id(id))
        .bind(patch.title)
        .bind(patch.description)
        .bind(patch.image_url)
        .bind(patch.display_order)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;
        stored
            .ok_or_else(|| not_found(ContentTable::PortfolioProjects, id))?
            .try_into_project()
            .map_err(storage)
    }

    async fn delete(&self, table: ContentTable, id: RecordId) -> Result<(), Report<ContentError>> {
        let result = sqlx::query(&format!("DELETE FROM {table} WHERE id = $1"))
            .bind(encode_record_id(id))
            .execute(&self.pool)
            .await
            .map_err(storage)?;
        if result.rows_affected() == 0 {
            return Err(not_found(table, id));
        }
        Ok(())
    }
}

#[async_trait]
impl ContentStore for ContentRepository {
    #[instrument(skip(self, mutation), fields(table = %mutation.table(), kind = mutation.kind()))]
    async fn apply(&self, mutation: Mutation) -> Result<MutationOutcome, Report<ContentError>> {
        let now = Utc::now();
        let outcome = match mutation {
            Mutation::Insert(ContentPayload::SiteSettings(patch)) => {
                MutationOutcome::SiteSettings(self.insert_settings(patch, now).await?)
            }
            Mutation::Insert(ContentPayload::Skill(patch)) => {
                MutationOutcome::Skill(self.insert_skill(patch, now).await?)
            }
            Mutation::Insert(ContentPayload::Project(patch)) => {
                MutationOutcome::Project(self.insert_project(patch, now).await?)
            }
            Mutation::Update { id, payload } => {
                payload.validate()?;
                match payload {
                    ContentPayload::SiteSettings(patch) => {
                        MutationOutcome::SiteSettings(self.update_settings(id, patch, now).await?)
                    }
                    ContentPayload::Skill(patch) => {
                        MutationOutcome::Skill(self.update_skill(id, patch, now).await?)
                    }
                    ContentPayload::Project(patch) => {
                        MutationOutcome::Project(self.update_project(id, patch, now).await?)
                    }
                }
            }
            Mutation::Delete { table, id } => {
                self.delete(table, id).await?;
                MutationOutcome::Deleted(DeleteAck::deleted())
            }
        };

        debug!(record_id = ?outcome.record_id(), "mutation applied");
        Ok(outcome)
    }

    async fn site_settings(&self) -> Result<Option<SiteSettings>, Report<ContentError>> {
        let row: Option<SiteSettingsRow> = sqlx::query_as(&format!(
            "SELECT {SETTINGS_COLUMNS} FROM site_settings ORDER BY created_at LIMIT 1"
        ))
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;
        row.map(SiteSettingsRow::try_into_settings)
            .transpose()
            .map_err(storage)
    }

    async fn skills(&self) -> Result<Vec<Skill>, Report<ContentError>> {
        let rows: Vec<SkillRow> = sqlx::query_as(&format!(
            "SELECT {SKILL_COLUMNS} FROM skills ORDER BY display_order, created_at"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;
        rows.into_iter()
            .map(SkillRow::try_into_skill)
            .collect::<Result<_, _>>()
            .map_err(storage)
    }

    async fn projects(&self) -> Result<Vec<PortfolioProject>, Report<ContentError>> {
        let rows: Vec<ProjectRow> = sqlx::query_as(&format!(
            "SELECT {PROJECT_COLUMNS} FROM portfolio_projects ORDER BY display_order, created_at"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;
        rows.into_iter()
            .map(ProjectRow::try_into_project)
            .collect::<Result<_, _>>()
            .map_err(storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_insert_failures_are_storage_errors() {
        let err = insert_failed(ContentTable::Skills, sqlx::Error::RowNotFound);
        assert!(matches!(
            err.current_context(),
            ContentError::Storage { .. }
        ));
    }

    #[test]
    fn exhausted_order_message_names_the_table() {
        let err = ContentError::DisplayOrderExhausted {
            table: ContentTable::PortfolioProjects,
        };
        assert!(err.to_string().contains("portfolio_projects"));
    }
}
