//! Wire types of the three admin functions and the trait that calls them.
//!
//! Field names are camelCase on the wire. Every response carries either a
//! success flag with data or an `error` string; clients never have to inspect
//! the HTTP status.

use crate::admin::AdminUser;
use crate::error::ApiError;
use crate::identity::DiscordUser;
use async_trait::async_trait;
use folio_core::DiscordId;
use rootcause::prelude::Report;
use serde::{Deserialize, Serialize};

/// Body of `discord-auth`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExchangeRequest {
    pub code: Option<String>,
    pub redirect_uri: Option<String>,
}

impl ExchangeRequest {
    #[must_use]
    pub fn new(code: impl Into<String>, redirect_uri: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            redirect_uri: Some(redirect_uri.into()),
        }
    }
}

/// Response of `discord-auth`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<DiscordUser>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExchangeResponse {
    #[must_use]
    pub fn success(user: DiscordUser) -> Self {
        Self {
            success: true,
            user: Some(user),
            error: None,
        }
    }

    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            user: None,
            error: Some(error.into()),
        }
    }
}

/// Body of `admin-check`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminCheckRequest {
    pub discord_id: Option<DiscordId>,
}

impl AdminCheckRequest {
    #[must_use]
    pub fn new(discord_id: impl Into<DiscordId>) -> Self {
        Self {
            discord_id: Some(discord_id.into()),
        }
    }
}

/// Response of `admin-check`.
///
/// `user` is always present on the wire, `null` when the id is not an admin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCheckResponse {
    pub is_admin: bool,
    #[serde(default)]
    pub user: Option<AdminUser>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AdminCheckResponse {
    /// The id is on the allow-list.
    #[must_use]
    pub fn admin(user: AdminUser) -> Self {
        Self {
            is_admin: true,
            user: Some(user),
            error: None,
        }
    }

    /// The id is not on the allow-list. Not an error.
    #[must_use]
    pub fn not_admin() -> Self {
        Self {
            is_admin: false,
            user: None,
            error: None,
        }
    }

    /// The check could not be completed.
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            is_admin: false,
            user: None,
            error: Some(error.into()),
        }
    }
}

/// Body of `admin-update`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateRequest {
    pub discord_id: Option<DiscordId>,
    pub table: String,
    pub data: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl UpdateRequest {
    /// An insert, or an update when `id` is set.
    #[must_use]
    pub fn new(
        discord_id: impl Into<DiscordId>,
        table: impl Into<String>,
        data: serde_json::Value,
        id: Option<String>,
    ) -> Self {
        Self {
            discord_id: Some(discord_id.into()),
            table: table.into(),
            data,
            id,
        }
    }

    /// A delete of `id`.
    #[must_use]
    pub fn delete(
        discord_id: impl Into<DiscordId>,
        table: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self::new(
            discord_id,
            table,
            serde_json::json!({ "operation": folio_content::DELETE_OPERATION }),
            Some(id.into()),
        )
    }
}

/// Response of `admin-update`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UpdateResponse {
    #[must_use]
    pub fn success(data: serde_json::Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// The admin functions as seen by a caller.
///
/// Implemented over HTTP by `FunctionsClient`; tests substitute fakes.
/// Errors mean no decodable response came back. A function that ran and
/// refused is a successful call carrying `success: false`.
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn exchange_code(
        &self,
        request: &ExchangeRequest,
    ) -> Result<ExchangeResponse, Report<ApiError>>;

    async fn check_admin(
        &self,
        request: &AdminCheckRequest,
    ) -> Result<AdminCheckResponse, Report<ApiError>>;

    async fn update(&self, request: &UpdateRequest) -> Result<UpdateResponse, Report<ApiError>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn exchange_request_reads_camel_case() {
        let request: ExchangeRequest =
            serde_json::from_value(json!({ "code": "abc", "redirectUri": "http://x/admin" }))
                .expect("deserialize");
        assert_eq!(request, ExchangeRequest::new("abc", "http://x/admin"));
    }

    #[test]
    fn empty_bodies_deserialize_to_defaults() {
        let request: UpdateRequest = serde_json::from_value(json!({})).expect("deserialize");
        assert!(request.discord_id.is_none());
        assert!(request.table.is_empty());
        assert!(request.data.is_null());
    }

    #[test]
    fn not_admin_serializes_null_user_without_error() {
        let value = serde_json::to_value(AdminCheckResponse::not_admin()).expect("serialize");
        assert_eq!(value, json!({ "isAdmin": false, "user": null }));
    }

    #[test]
    fn failure_responses_carry_only_the_error() {
        let value =
            serde_json::to_value(UpdateResponse::failure("Invalid table")).expect("serialize");
        assert_eq!(value, json!({ "success": false, "error": "Invalid table" }));
    }

    #[test]
    fn delete_request_carries_the_marker() {
        let request = UpdateRequest::delete("42", "skills", "01J0000000000000000000000A");
        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(value["data"], json!({ "operation": "delete" }));
        assert_eq!(value["discordId"], json!("42"));
        assert_eq!(value["id"], json!("01J0000000000000000000000A"));
    }
}
