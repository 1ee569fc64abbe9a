//! Centralized server configuration.
//!
//! Loaded via the `config` crate from environment variables, with `__`
//! separating nested keys (e.g. `DISCORD__CLIENT_ID`).
//!
//! See [`DiscordConfig`](folio_access::DiscordConfig) for the OAuth settings.

use folio_access::DiscordConfig;
use serde::Deserialize;
use std::net::SocketAddr;

/// Server configuration composed from library configs.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// PostgreSQL database connection URL.
    pub database_url: String,

    /// Address to listen on.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,

    /// Maximum number of pooled database connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Discord OAuth configuration. Credentials may be absent.
    #[serde(default)]
    pub discord: DiscordConfig,
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

fn default_max_connections() -> u32 {
    5
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_source(
            config::Environment::default()
                .separator("__")
                .try_parsing(true),
        )
    }

    fn from_source(
        source: impl config::Source + Send + Sync + 'static,
    ) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn environment(vars: &[(&str, &str)]) -> config::Environment {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        config::Environment::default()
            .separator("__")
            .try_parsing(true)
            .source(Some(source))
    }

    #[test]
    fn defaults_apply_when_only_database_is_set() {
        let config = ServerConfig::from_source(environment(&[(
            "DATABASE_URL",
            "postgres://localhost/folio",
        )]))
        .expect("config");
        assert_eq!(config.database_url, "postgres://localhost/folio");
        assert_eq!(config.bind_addr, default_bind_addr());
        assert_eq!(config.max_connections, 5);
        assert!(config.discord.credentials().is_none());
    }

    #[test]
    fn nested_discord_settings_are_read() {
        let config = ServerConfig::from_source(environment(&[
            ("DATABASE_URL", "postgres://localhost/folio"),
            ("BIND_ADDR", "127.0.0.1:3000"),
            ("DISCORD__CLIENT_ID", "client"),
            ("DISCORD__CLIENT_SECRET", "secret"),
        ]))
        .expect("config");
        assert_eq!(config.bind_addr, SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert_eq!(config.discord.credentials(), Some(("client", "secret")));
    }

    #[test]
    fn missing_database_url_is_an_error() {
        assert!(ServerConfig::from_source(environment(&[])).is_err());
    }
}
