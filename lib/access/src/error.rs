//! Error types for the access crate.
//!
//! - `AuthenticationError`: turning an OAuth code into a Discord identity
//! - `AuthorizationError`: allow-list checks
//! - `ApiError`: calling the admin functions over HTTP
//! - `GateError`: the client-side login flow
//! - `ReorderError`: the two-call display order swap

use folio_content::ContentTable;
use folio_core::DiscordId;
use std::fmt;

/// Errors from authenticating a user with Discord.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationError {
    /// Client credentials are absent from the environment.
    NotConfigured,
    /// The request carried no authorization code.
    MissingCode,
    /// Discord rejected the code or the token endpoint failed.
    TokenExchange { reason: String },
    /// The profile request failed after a successful exchange.
    ProfileFetch { reason: String },
}

impl AuthenticationError {
    /// Message safe to return to the browser.
    #[must_use]
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::NotConfigured => "Discord credentials not configured",
            Self::MissingCode => "Authorization code is required",
            Self::TokenExchange { .. } => "Failed to get Discord token",
            Self::ProfileFetch { .. } => "Failed to get Discord user info",
        }
    }
}

impl fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured => write!(f, "discord client credentials are not configured"),
            Self::MissingCode => write!(f, "missing authorization code"),
            Self::TokenExchange { reason } => write!(f, "discord token exchange failed: {reason}"),
            Self::ProfileFetch { reason } => write!(f, "discord profile fetch failed: {reason}"),
        }
    }
}

impl std::error::Error for AuthenticationError {}

/// Errors from allow-list checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationError {
    /// No identity was supplied.
    MissingIdentity,
    /// The identity is not on the allow-list.
    NotAdmin { discord_id: DiscordId },
    /// The allow-list lookup itself failed.
    CheckFailed { reason: String },
}

impl fmt::Display for AuthorizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingIdentity => write!(f, "no discord id supplied"),
            Self::NotAdmin { discord_id } => {
                write!(f, "discord id {discord_id} is not on the admin allow-list")
            }
            Self::CheckFailed { reason } => write!(f, "admin allow-list lookup failed: {reason}"),
        }
    }
}

impl std::error::Error for AuthorizationError {}

/// Errors from calling an admin function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response.
    Transport { function: String, details: String },
    /// The response body was not the expected JSON.
    Decode { function: String, details: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { function, details } => {
                write!(f, "request to '{function}' failed: {details}")
            }
            Self::Decode { function, details } => {
                write!(f, "invalid response from '{function}': {details}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Errors from the client-side login flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    /// The gate configuration cannot produce a consent URL.
    Configuration { reason: String },
    /// The code could not be exchanged for an identity.
    Exchange { reason: String },
    /// The identity is not an admin.
    NotAdmin,
    /// The admin check could not be completed.
    Check { reason: String },
}

impl fmt::Display for GateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration { reason } => write!(f, "invalid gate configuration: {reason}"),
            Self::Exchange { reason } => write!(f, "login failed: {reason}"),
            Self::NotAdmin => write!(f, "Not authorized as admin"),
            Self::Check { reason } => write!(f, "admin check failed: {reason}"),
        }
    }
}

impl std::error::Error for GateError {}

/// Errors from swapping the display order of two rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderError {
    /// The table has no display order.
    NotOrdered { table: ContentTable },
    /// The first update failed; nothing changed.
    FirstUpdate { reason: String },
    /// The second update failed; the first row already carries its
    /// neighbour's order.
    SecondUpdate { reason: String },
}

impl ReorderError {
    /// Returns true if one of the two rows was already written.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        matches!(self, Self::SecondUpdate { .. })
    }
}

impl fmt::Display for ReorderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotOrdered { table } => write!(f, "table '{table}' has no display order"),
            Self::FirstUpdate { reason } => write!(f, "reorder failed: {reason}"),
            Self::SecondUpdate { reason } => {
                write!(f, "reorder partially applied, second update failed: {reason}")
            }
        }
    }
}

impl std::error::Error for ReorderError {}
