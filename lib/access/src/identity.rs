//! The Discord identity obtained at login.

use folio_core::DiscordId;
use serde::{Deserialize, Serialize};

/// Discord's CDN, used to build avatar URLs.
const DISCORD_CDN: &str = "https://cdn.discordapp.com";

/// A Discord user as reported by `/users/@me`.
///
/// Obtained once per login and immutable for the session. Only `id` is ever
/// looked up server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscordUser {
    /// Provider-assigned user id.
    pub id: DiscordId,
    /// Display name.
    pub username: String,
    /// Legacy four-digit tag; `"0"` for accounts on the new username system.
    #[serde(default = "default_discriminator")]
    pub discriminator: String,
    /// Avatar hash, absent when the user has the default avatar.
    #[serde(default)]
    pub avatar: Option<String>,
}

fn default_discriminator() -> String {
    "0".to_string()
}

impl DiscordUser {
    /// Creates a Discord user.
    #[must_use]
    pub fn new(
        id: impl Into<DiscordId>,
        username: impl Into<String>,
        discriminator: impl Into<String>,
        avatar: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            discriminator: discriminator.into(),
            avatar,
        }
    }

    /// Returns the avatar image URL, if the user has a custom avatar.
    #[must_use]
    pub fn avatar_url(&self) -> Option<String> {
        self.avatar
            .as_ref()
            .map(|hash| format!("{DISCORD_CDN}/avatars/{}/{hash}.png", self.id))
    }

    /// Returns `username#discriminator`, or just the username for new-style accounts.
    #[must_use]
    pub fn tag(&self) -> String {
        if self.discriminator == "0" {
            self.username.clone()
        } else {
            format!("{}#{}", self.username, self.discriminator)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_discord_profile() {
        let json = r#"{
            "id": "80351110224678912",
            "username": "Nelly",
            "discriminator": "1337",
            "avatar": "8342729096ea3675442027381ff50dfe",
            "verified": true,
            "email": "nelly@discord.com"
        }"#;
        let user: DiscordUser = serde_json::from_str(json).expect("deserialize");
        assert_eq!(user.id.as_str(), "80351110224678912");
        assert_eq!(user.tag(), "Nelly#1337");
        assert_eq!(
            user.avatar_url().as_deref(),
            Some(
                "https://cdn.discordapp.com/avatars/80351110224678912/8342729096ea3675442027381ff50dfe.png"
            )
        );
    }

    #[test]
    fn missing_optional_fields_default() {
        let user: DiscordUser =
            serde_json::from_str(r#"{ "id": "1", "username": "new", "avatar": null }"#)
                .expect("deserialize");
        assert_eq!(user.discriminator, "0");
        assert_eq!(user.tag(), "new");
        assert!(user.avatar_url().is_none());
    }
}
