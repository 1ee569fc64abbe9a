//! Discord OAuth configuration.
//!
//! `DiscordConfig` is the server half: client credentials and the API base
//! used for the code exchange and profile lookup. `GateConfig` is the browser
//! half: what the session gate needs to send a user to the consent screen.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Configuration for talking to Discord's OAuth2 endpoints.
///
/// Credentials are optional so the service can start without them; their
/// absence is reported on each exchange request instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    /// The OAuth2 client ID of the Discord application.
    #[serde(default)]
    client_id: Option<String>,
    /// The OAuth2 client secret.
    #[serde(default)]
    client_secret: Option<String>,
    /// Base URL of the Discord REST API.
    /// Default: "https://discord.com/api"
    #[serde(default = "default_api_base")]
    api_base: String,
    /// OAuth2 scopes as a comma-separated string.
    /// Default: "identify"
    #[serde(default = "default_scopes")]
    scopes: String,
}

fn default_api_base() -> String {
    "https://discord.com/api".to_string()
}

fn default_scopes() -> String {
    "identify".to_string()
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            api_base: default_api_base(),
            scopes: default_scopes(),
        }
    }
}

impl DiscordConfig {
    /// Creates a configuration with credentials and defaults for the rest.
    #[must_use]
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            client_id: Some(client_id),
            client_secret: Some(client_secret),
            ..Self::default()
        }
    }

    /// Creates a configuration builder.
    #[must_use]
    pub fn builder() -> DiscordConfigBuilder {
        DiscordConfigBuilder::default()
    }

    /// Returns the client ID and secret, or `None` if either is missing or blank.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let id = self.client_id.as_deref().filter(|s| !s.trim().is_empty())?;
        let secret = self
            .client_secret
            .as_deref()
            .filter(|s| !s.trim().is_empty())?;
        Some((id, secret))
    }

    /// Returns the API base URL without a trailing slash.
    #[must_use]
    pub fn api_base(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }

    /// Returns the token endpoint.
    #[must_use]
    pub fn token_url(&self) -> String {
        format!("{}/oauth2/token", self.api_base())
    }

    /// Returns the consent screen URL.
    #[must_use]
    pub fn authorize_url(&self) -> String {
        format!("{}/oauth2/authorize", self.api_base())
    }

    /// Returns the endpoint describing the token's owner.
    #[must_use]
    pub fn profile_url(&self) -> String {
        format!("{}/users/@me", self.api_base())
    }

    /// Returns the scopes to request, parsed from the comma-separated string.
    #[must_use]
    pub fn scopes(&self) -> Vec<&str> {
        self.scopes
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Builder for `DiscordConfig`.
#[derive(Debug)]
pub struct DiscordConfigBuilder {
    client_id: Option<String>,
    client_secret: Option<String>,
    api_base: String,
    scopes: Vec<String>,
}

impl Default for DiscordConfigBuilder {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            api_base: default_api_base(),
            scopes: vec![default_scopes()],
        }
    }
}

impl DiscordConfigBuilder {
    /// Sets the client ID.
    #[must_use]
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Sets the client secret.
    #[must_use]
    pub fn client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(client_secret.into());
        self
    }

    /// Points the client at a different API base, e.g. a local stub.
    #[must_use]
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Adds a scope to the list of scopes to request.
    #[must_use]
    pub fn add_scope(mut self, scope: impl Into<String>) -> Self {
        let scope = scope.into();
        if !self.scopes.contains(&scope) {
            self.scopes.push(scope);
        }
        self
    }

    /// Builds the `DiscordConfig`.
    #[must_use]
    pub fn build(self) -> DiscordConfig {
        DiscordConfig {
            client_id: self.client_id,
            client_secret: self.client_secret,
            api_base: self.api_base,
            scopes: self.scopes.join(","),
        }
    }
}

/// Browser-side configuration of the session gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// The public OAuth2 client ID.
    client_id: String,
    /// Origin the site is served from, e.g. "https://folio.example.com".
    origin: String,
    /// Path of the admin route; also the OAuth callback.
    #[serde(default = "default_admin_path")]
    admin_path: String,
    /// How long a successful admin check stays valid.
    #[serde(default = "default_verified_ttl_minutes")]
    verified_ttl_minutes: i64,
    /// Discord's consent screen.
    #[serde(default = "default_authorize_url")]
    authorize_url: String,
    #[serde(default = "default_scopes")]
    scopes: String,
}

fn default_admin_path() -> String {
    "/admin".to_string()
}

fn default_verified_ttl_minutes() -> i64 {
    480
}

fn default_authorize_url() -> String {
    format!("{}/oauth2/authorize", default_api_base())
}

impl GateConfig {
    /// Creates a gate configuration with defaults for optional fields.
    #[must_use]
    pub fn new(client_id: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            origin: origin.into(),
            admin_path: default_admin_path(),
            verified_ttl_minutes: default_verified_ttl_minutes(),
            authorize_url: default_authorize_url(),
            scopes: default_scopes(),
        }
    }

    /// Overrides the verified marker lifetime.
    #[must_use]
    pub fn with_verified_ttl(mut self, minutes: i64) -> Self {
        self.verified_ttl_minutes = minutes;
        self
    }

    /// Overrides the consent screen URL.
    #[must_use]
    pub fn with_authorize_url(mut self, url: impl Into<String>) -> Self {
        self.authorize_url = url.into();
        self
    }

    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    #[must_use]
    pub fn authorize_url(&self) -> &str {
        &self.authorize_url
    }

    #[must_use]
    pub fn scopes(&self) -> Vec<&str> {
        self.scopes
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Returns the callback URL: the origin joined with the admin path.
    #[must_use]
    pub fn redirect_uri(&self) -> String {
        let origin = self.origin.trim_end_matches('/');
        if self.admin_path.starts_with('/') {
            format!("{origin}{}", self.admin_path)
        } else {
            format!("{origin}/{}", self.admin_path)
        }
    }

    /// Returns the verified marker lifetime, or `None` unless it is a
    /// positive number of minutes chrono can represent.
    #[must_use]
    pub fn verified_ttl(&self) -> Option<Duration> {
        if self.verified_ttl_minutes <= 0 {
            return None;
        }
        Duration::try_minutes(self.verified_ttl_minutes)
    }
}
