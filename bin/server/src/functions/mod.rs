//! The HTTP functions.
//!
//! - `discord-auth`: OAuth code to Discord identity
//! - `admin-check`: allow-list membership of a Discord id
//! - `admin-update`: one content mutation, re-authorized per call
//! - public reads backing the showcase pages

pub mod admin_check;
pub mod admin_update;
pub mod content;
pub mod discord_auth;

pub use admin_check::admin_check;
pub use admin_update::admin_update;
pub use content::{portfolio_projects, site_settings, skills};
pub use discord_auth::discord_auth;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::routes::router;
    use crate::state::AppState;
    use async_trait::async_trait;
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use folio_access::{
        AdminApi, AdminCheckRequest, AdminCheckResponse, AdminDirectory, AdminUser, ApiError,
        AuthenticationError, AuthorizationError, DiscordUser, ExchangeRequest, ExchangeResponse,
        IdentityProvider, MemoryAdminDirectory, UpdateRequest, UpdateResponse,
    };
    use folio_content::MemoryContentStore;
    use folio_core::DiscordId;
    use rootcause::prelude::Report;
    use serde::{Serialize, de::DeserializeOwned};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    pub const ADMIN_ID: &str = "42";

    /// Accepts the code `"good"`, fails the profile lookup for
    /// `"no-profile"`, and rejects everything else.
    pub struct FakeProvider;

    #[async_trait]
    impl IdentityProvider for FakeProvider {
        async fn exchange_code(
            &self,
            code: &str,
            _redirect_uri: &str,
        ) -> Result<DiscordUser, Report<AuthenticationError>> {
            match code {
                "good" => Ok(DiscordUser::new(ADMIN_ID, "owner", "0", None)),
                "no-profile" => Err(AuthenticationError::ProfileFetch {
                    reason: "401 Unauthorized".to_string(),
                }
                .into()),
                _ => Err(AuthenticationError::TokenExchange {
                    reason: "invalid_grant".to_string(),
                }
                .into()),
            }
        }
    }

    /// An allow-list whose every lookup fails.
    pub struct BrokenDirectory;

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

    pub fn state() -> AppState {
        AppState::new(
            Arc::new(MemoryAdminDirectory::with_admins([AdminUser::new(
                ADMIN_ID,
                Some("owner".to_string()),
            )])),
            Arc::new(MemoryContentStore::default()),
            Some(Arc::new(FakeProvider)),
        )
    }

    pub fn app() -> Router {
        router(state())
    }

    pub async fn post_raw(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request");
        let response = app.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        post_raw(app, uri, &body.to_string()).await
    }

    pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::get(uri).body(Body::empty()).expect("request");
        let response = app.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    /// An [`AdminApi`] that calls the functions on an in-process router.
    pub struct RouterApi {
        pub app: Router,
    }

    impl RouterApi {
        async fn call<Req: Serialize + Sync, Resp: DeserializeOwned>(
            &self,
            function: &str,
            request: &Req,
        ) -> Result<Resp, Report<ApiError>> {
            let body = serde_json::to_value(request).map_err(|e| ApiError::Decode {
                function: function.to_string(),
                details: e.to_string(),
            })?;
            let (_, body) = post(&self.app, &format!("/functions/v1/{function}"), body).await;
            serde_json::from_value(body).map_err(|e| {
                ApiError::Decode {
                    function: function.to_string(),
                    details: e.to_string(),
                }
                .into()
            })
        }
    }

    #[async_trait]
    impl AdminApi for RouterApi {
        async fn exchange_code(
            &self,
            request: &ExchangeRequest,
        ) -> Result<ExchangeResponse, Report<ApiError>> {
            self.call("discord-auth", request).await
        }

        async fn check_admin(
            &self,
            request: &AdminCheckRequest,
        ) -> Result<AdminCheckResponse, Report<ApiError>> {
            self.call("admin-check", request).await
        }

        async fn update(
            &self,
            request: &UpdateRequest,
        ) -> Result<UpdateResponse, Report<ApiError>> {
            self.call("admin-update", request).await
        }
    }
}
