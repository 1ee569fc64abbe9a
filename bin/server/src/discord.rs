//! Discord OAuth client.
//!
//! Exchanges an authorization code at Discord's token endpoint, sending the
//! client credentials in the request body, then reads the token owner's
//! profile from `/users/@me`.

use async_trait::async_trait;
use folio_access::{AuthenticationError, DiscordConfig, DiscordUser, IdentityProvider};
use oauth2::{
    AuthType, AuthorizationCode, ClientId, ClientSecret, RedirectUrl, TokenResponse, TokenUrl,
    basic::{BasicClient, BasicTokenResponse},
};
use rootcause::prelude::Report;
use tracing::{debug, instrument};

/// Errors building the client from configuration.
#[derive(Debug)]
pub enum DiscordClientError {
    /// A configured URL does not parse.
    InvalidUrl { url: String, reason: String },
    /// The HTTP client could not be constructed.
    HttpClient { details: String },
}

impl std::fmt::Display for DiscordClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidUrl { url, reason } => write!(f, "invalid discord url '{url}': {reason}"),
            Self::HttpClient { details } => write!(f, "failed to build http client: {details}"),
        }
    }
}

impl std::error::Error for DiscordClientError {}

/// Discord code exchange over HTTPS.
#[derive(Clone)]
pub struct DiscordOAuthClient {
    client_id: String,
    client_secret: String,
    token_url: TokenUrl,
    profile_url: String,
    http: reqwest::Client,
}

impl DiscordOAuthClient {
    /// Creates a client from configuration.
    ///
    /// Returns `Ok(None)` when credentials are not configured; the exchange
    /// function then answers every request with a configuration error.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured API base is not a valid URL.
    pub fn from_config(
        config: &DiscordConfig,
    ) -> Result<Option<Self>, Report<DiscordClientError>> {
        let Some((client_id, client_secret)) = config.credentials() else {
            return Ok(None);
        };

        let token_url = config.token_url();
        let token_url = TokenUrl::new(token_url.clone()).map_err(|e| {
            DiscordClientError::InvalidUrl {
                url: token_url,
                reason: e.to_string(),
            }
        })?;

        // Redirects are never followed.
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| DiscordClientError::HttpClient {
                details: e.to_string(),
            })?;

        Ok(Some(Self {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            token_url,
            profile_url: config.profile_url(),
            http,
        }))
    }

    async fn access_token(
        &self,
        code: &str,
        redirect_uri: Option<&str>,
    ) -> Result<String, AuthenticationError> {
        let client = BasicClient::new(ClientId::new(self.client_id.clone()))
            .set_client_secret(ClientSecret::new(self.client_secret.clone()))
            .set_auth_type(AuthType::RequestBody)
            .set_token_uri(self.token_url.clone());

        let client = match redirect_uri {
            Some(uri) => client.set_redirect_uri(RedirectUrl::new(uri.to_string()).map_err(
                |e| AuthenticationError::TokenExchange {
                    reason: format!("invalid redirect uri: {e}"),
                },
            )?),
            None => client,
        };

        let token: BasicTokenResponse = client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(&self.http)
            .await
            .map_err(|e| AuthenticationError::TokenExchange {
                reason: e.to_string(),
            })?;

        Ok(token.access_token().secret().clone())
    }

    async fn profile(&self, access_token: &str) -> Result<DiscordUser, AuthenticationError> {
        let profile_error = |e: reqwest::Error| AuthenticationError::ProfileFetch {
            reason: e.to_string(),
        };
        self.http
            .get(&self.profile_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(profile_error)?
            .error_for_status()
            .map_err(profile_error)?
            .json::<DiscordUser>()
            .await
            .map_err(profile_error)
    }
}

#[async_trait]
impl IdentityProvider for DiscordOAuthClient {
    #[instrument(skip(self, code))]
    async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<DiscordUser, Report<AuthenticationError>> {
        let redirect_uri = Some(redirect_uri).filter(|uri| !uri.is_empty());
        let access_token = self.access_token(code, redirect_uri).await?;
        let user = self.profile(&access_token).await?;
        debug!(discord_id = %user.id, "fetched discord profile");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Form, Json, Router,
        http::{HeaderMap, StatusCode, header},
        response::{IntoResponse, Response},
        routing::{get, post},
    };
    use serde_json::json;
    use std::collections::HashMap;

    /// Token endpoint: `good` and `revoked` are accepted, anything else is
    /// `invalid_grant`.
    async fn token(Form(form): Form<HashMap<String, String>>) -> Response {
        let secret_in_body = form.get("client_secret").map(String::as_str) == Some("secret");
        let access_token = match form.get("code").map(String::as_str) {
            Some("good") if secret_in_body => "good-token",
            Some("revoked") if secret_in_body => "revoked-token",
            _ => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "invalid_grant" })),
                )
                    .into_response();
            }
        };
        Json(json!({ "access_token": access_token, "token_type": "Bearer" })).into_response()
    }

    /// Profile endpoint: only `good-token` is authorized.
    async fn me(headers: HeaderMap) -> Response {
        let authorized = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            == Some("Bearer good-token");
        if !authorized {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "401: Unauthorized" })),
            )
                .into_response();
        }
        Json(json!({ "id": "80351110224678912", "username": "nelly", "discriminator": "1337" }))
            .into_response()
    }

    /// Serves a stand-in Discord API on an ephemeral port and returns a
    /// client pointed at it.
    async fn stub_client() -> DiscordOAuthClient {
        let app = Router::new()
            .route("/api/oauth2/token", post(token))
            .route("/api/users/@me", get(me));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });

        let config = DiscordConfig::builder()
            .client_id("client")
            .client_secret("secret")
            .api_base(format!("http://{addr}/api"))
            .build();
        DiscordOAuthClient::from_config(&config)
            .expect("config")
            .expect("client")
    }

    #[test]
    fn missing_credentials_yield_no_client() {
        let client = DiscordOAuthClient::from_config(&DiscordConfig::default()).expect("config");
        assert!(client.is_none());
    }

    #[test]
    fn invalid_api_base_is_rejected() {
        let config = DiscordConfig::builder()
            .client_id("client")
            .client_secret("secret")
            .api_base("not a url")
            .build();
        assert!(DiscordOAuthClient::from_config(&config).is_err());
    }

    #[test]
    fn configured_client_targets_discord() {
        let config = DiscordConfig::new("client".to_string(), "secret".to_string());
        let client = DiscordOAuthClient::from_config(&config)
            .expect("config")
            .expect("client");
        assert_eq!(client.token_url.as_str(), "https://discord.com/api/oauth2/token");
        assert_eq!(client.profile_url, "https://discord.com/api/users/@me");
    }

    #[tokio::test]
    async fn unreachable_token_endpoint_is_a_token_error() {
        let config = DiscordConfig::builder()
            .client_id("client")
            .client_secret("secret")
            .api_base("http://127.0.0.1:9/api")
            .build();
        let client = DiscordOAuthClient::from_config(&config)
            .expect("config")
            .expect("client");

        let err = client
            .exchange_code("code", "http://localhost:3000/admin")
            .await
            .unwrap_err();
        assert!(matches!(
            err.current_context(),
            AuthenticationError::TokenExchange { .. }
        ));
    }

    #[tokio::test]
    async fn valid_code_yields_the_profile() {
        let client = stub_client().await;
        let user = client
            .exchange_code("good", "http://localhost:3000/admin")
            .await
            .expect("exchange");
        assert_eq!(user.id.as_str(), "80351110224678912");
        assert_eq!(user.tag(), "nelly#1337");
    }

    #[tokio::test]
    async fn rejected_code_is_a_token_error() {
        let client = stub_client().await;
        let err = client
            .exchange_code("stale", "http://localhost:3000/admin")
            .await
            .unwrap_err();
        assert!(matches!(
            err.current_context(),
            AuthenticationError::TokenExchange { .. }
        ));
        assert_eq!(
            err.current_context().public_message(),
            "Failed to get Discord token"
        );
    }

    #[tokio::test]
    async fn unauthorized_profile_is_a_profile_error() {
        let client = stub_client().await;
        let err = client.exchange_code("revoked", "").await.unwrap_err();
        assert!(matches!(
            err.current_context(),
            AuthenticationError::ProfileFetch { .. }
        ));
        assert_eq!(
            err.current_context().public_message(),
            "Failed to get Discord user info"
        );
    }
}
