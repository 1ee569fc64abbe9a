//! The admin allow-list.
//!
//! Rows are provisioned out of band; this system only reads them. The
//! existence of a row for a Discord id is the sole authorization predicate.

use crate::error::AuthorizationError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use folio_core::DiscordId;
use rootcause::prelude::Report;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// A row of the `admin_users` allow-list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUser {
    /// The allow-listed Discord id.
    pub discord_id: DiscordId,
    /// Username recorded when the row was provisioned.
    pub username: Option<String>,
    /// Free-form profile data.
    #[serde(default)]
    pub metadata: serde_json::Value,
    /// When the row was provisioned.
    pub created_at: DateTime<Utc>,
}

impl AdminUser {
    /// Creates an allow-list entry with empty metadata.
    #[must_use]
    pub fn new(discord_id: impl Into<DiscordId>, username: Option<String>) -> Self {
        Self {
            discord_id: discord_id.into(),
            username,
            metadata: serde_json::Value::Object(Default::default()),
            created_at: Utc::now(),
        }
    }
}

/// Read access to the allow-list.
#[async_trait]
pub trait AdminDirectory: Send + Sync {
    /// Looks up the allow-list row for `discord_id`.
    ///
    /// Returns `Ok(None)` when no row exists; that is a normal outcome.
    /// Only a failed lookup is an error.
    async fn find(&self, discord_id: &DiscordId)
    -> Result<Option<AdminUser>, Report<AuthorizationError>>;

    /// Returns the row if `discord_id` is allow-listed, failing closed.
    ///
    /// Absence and lookup faults both become an error, so a transient fault
    /// can never be mistaken for authorization.
    async fn require_admin(
        &self,
        discord_id: &DiscordId,
    ) -> Result<AdminUser, Report<AuthorizationError>> {
        if discord_id.is_blank() {
            return Err(AuthorizationError::MissingIdentity.into());
        }
        match self.find(discord_id).await? {
            Some(admin) => Ok(admin),
            None => Err(AuthorizationError::NotAdmin {
                discord_id: discord_id.clone(),
            }
            .into()),
        }
    }
}

/// An allow-list held in memory.
#[derive(Debug, Default)]
pub struct MemoryAdminDirectory {
    admins: RwLock<HashMap<DiscordId, AdminUser>>,
}

impl MemoryAdminDirectory {
    /// Creates a directory containing `admins`.
    #[must_use]
    pub fn with_admins(admins: impl IntoIterator<Item = AdminUser>) -> Self {
        Self {
            admins: RwLock::new(
                admins
                    .into_iter()
                    .map(|admin| (admin.discord_id.clone(), admin))
                    .collect(),
            ),
        }
    }

    /// Adds or replaces an entry.
    pub async fn insert(&self, admin: AdminUser) {
        self.admins
            .write()
            .await
            .insert(admin.discord_id.clone(), admin);
    }
}

#[async_trait]
impl AdminDirectory for MemoryAdminDirectory {
    async fn find(
        &self,
        discord_id: &DiscordId,
    ) -> Result<Option<AdminUser>, Report<AuthorizationError>> {
        Ok(self.admins.read().await.get(discord_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenDirectory;

    #[async_trait]
    impl AdminDirectory for BrokenDirectory {
        async fn find(
            &self,
            _discord_id: &DiscordId,
        ) -> Result<Option<AdminUser>, Report<AuthorizationError>> {
            Err(AuthorizationError::CheckFailed {
                reason: "connection refused".to_string(),
            }
            .into())
        }
    }

    #[tokio::test]
    async fn find_distinguishes_absent_from_present() {
        let directory = MemoryAdminDirectory::with_admins([AdminUser::new(
            "42",
            Some("owner".to_string()),
        )]);

        let found = directory.find(&DiscordId::new("42")).await.expect("lookup");
        assert_eq!(found.expect("admin").username.as_deref(), Some("owner"));

        let missing = directory.find(&DiscordId::new("999")).await.expect("lookup");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn require_admin_rejects_unknown_ids() {
        let directory = MemoryAdminDirectory::default();
        let err = directory
            .require_admin(&DiscordId::new("999"))
            .await
            .unwrap_err();
        assert!(matches!(
            err.current_context(),
            AuthorizationError::NotAdmin { .. }
        ));
    }

    #[tokio::test]
    async fn require_admin_rejects_blank_ids() {
        let directory = MemoryAdminDirectory::with_admins([AdminUser::new("", None)]);
        let err = directory.require_admin(&DiscordId::new("")).await.unwrap_err();
        assert_eq!(err.current_context(), &AuthorizationError::MissingIdentity);
    }

    #[tokio::test]
    async fn require_admin_fails_closed_on_lookup_fault() {
        let err = BrokenDirectory
            .require_admin(&DiscordId::new("42"))
            .await
            .unwrap_err();
        assert!(matches!(
            err.current_context(),
            AuthorizationError::CheckFailed { .. }
        ));
    }

    #[tokio::test]
    async fn insert_adds_entries() {
        let directory = MemoryAdminDirectory::default();
        directory.insert(AdminUser::new("7", None)).await;
        assert!(directory.require_admin(&DiscordId::new("7")).await.is_ok());
    }
}
