//! Repository for the admin allow-list.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use folio_access::{AdminDirectory, AdminUser, AuthorizationError};
use folio_core::DiscordId;
use rootcause::prelude::Report;
use sqlx::{FromRow, PgPool};
use tracing::instrument;

/// Row type for allow-list queries.
#[derive(FromRow)]
struct AdminUserRow {
    discord_id: String,
    username: Option<String>,
    metadata: Option<serde_json::Value>,
    created_at: DateTime<Utc>,
}

impl From<AdminUserRow> for AdminUser {
    fn from(row: AdminUserRow) -> Self {
        Self {
            discord_id: DiscordId::new(row.discord_id),
            username: row.username,
            metadata: row
                .metadata
                .unwrap_or_else(|| serde_json::Value::Object(Default::default())),
            created_at: row.created_at,
        }
    }
}

/// Allow-list lookups against `admin_users`.
///
/// Rows are provisioned out of band; this repository never writes.
#[derive(Clone)]
pub struct AdminUserRepository {
    pool: PgPool,
}

impl AdminUserRepository {
    /// Creates a new admin user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Finds the allow-list row for a Discord id.
    pub async fn find_by_discord_id(
        &self,
        discord_id: &DiscordId,
    ) -> Result<Option<AdminUser>, sqlx::Error> {
        let row: Option<AdminUserRow> = sqlx::query_as(
            r#"
            SELECT discord_id, username, metadata, created_at
            FROM admin_users
            WHERE discord_id = $1
            "#,
        )
        .bind(discord_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AdminUser::from))
    }
}

#[async_trait]
impl AdminDirectory for AdminUserRepository {
    #[instrument(skip(self))]
    async fn find(
        &self,
        discord_id: &DiscordId,
    ) -> Result<Option<AdminUser>, Report<AuthorizationError>> {
        self.find_by_discord_id(discord_id).await.map_err(|e| {
            AuthorizationError::CheckFailed {
                reason: e.to_string(),
            }
            .into()
        })
    }
}
