//! Admin access for the folio portfolio site.
//!
//! This crate provides:
//! - Discord identities and the admin allow-list (`DiscordUser`, `AdminUser`)
//! - Discord OAuth configuration (`DiscordConfig`, `GateConfig`)
//! - Wire types of the three admin functions and a client for them
//! - The client-side session gate and the state it persists
//!
//! # Access Control Model
//!
//! A single predicate decides authorization: is the caller's Discord id a
//! row of the `admin_users` allow-list? The session gate only decides what
//! the browser shows. Every mutation is re-checked against the allow-list on
//! the server, so a forged local session unlocks the admin screen but none of
//! its writes.
//!
//! # Example
//!
//! ```
//! use chrono::{Duration, Utc};
//! use folio_access::{DiscordUser, SessionState, ViewRole, view_role};
//!
//! let user = DiscordUser::new("80351110224678912", "nelly", "0", None);
//! let now = Utc::now();
//!
//! // Identity alone is not enough.
//! let remembered = SessionState::remembered(user.clone());
//! assert_eq!(view_role(&remembered, now), ViewRole::Anonymous);
//!
//! // Identity plus an unexpired verified marker unlocks the admin view.
//! let verified = SessionState::verified(user.clone(), now + Duration::hours(1));
//! assert_eq!(view_role(&verified, now), ViewRole::Admin(user));
//! ```

pub mod admin;
pub mod api;
pub mod client;
pub mod discord;
pub mod error;
pub mod gate;
pub mod identity;
pub mod provider;
pub mod reorder;
pub mod session;

#[cfg(test)]
mod testing;

// Re-export main types at crate root
pub use admin::{AdminDirectory, AdminUser, MemoryAdminDirectory};
pub use api::{
    AdminApi, AdminCheckRequest, AdminCheckResponse, ExchangeRequest, ExchangeResponse,
    UpdateRequest, UpdateResponse,
};
pub use client::FunctionsClient;
pub use discord::{DiscordConfig, DiscordConfigBuilder, GateConfig};
pub use error::{ApiError, AuthenticationError, AuthorizationError, GateError, ReorderError};
pub use gate::{GateState, SessionGate, SignInRedirect};
pub use identity::DiscordUser;
pub use provider::IdentityProvider;
pub use reorder::{Direction, OrderedRow, adjacent, swap_display_order};
pub use session::{
    KeyValueStorage, MemoryStorage, SessionState, SessionStore, StorageSessionStore, ViewRole,
    view_role,
};
