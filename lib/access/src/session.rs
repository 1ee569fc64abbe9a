//! Client-local session state.
//!
//! The browser keeps two entries: the Discord identity, which survives
//! restarts, and a "verified" marker, which lives only as long as the
//! browsing context and additionally expires at a fixed instant. Both are
//! folded into one `SessionState` value and the visible role is derived from
//! it by a pure function, so there is no way to observe one entry without the
//! other.

use crate::identity::DiscordUser;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use tracing::warn;

/// Persistent storage key holding the JSON identity.
pub const IDENTITY_KEY: &str = "discord_user";
/// Transient storage key holding the RFC 3339 expiry of the verified marker.
pub const VERIFIED_KEY: &str = "admin_verified";

/// Everything the browser remembers about the current visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Who logged in, if anyone.
    pub identity: Option<DiscordUser>,
    /// Until when the admin check counts as passed.
    pub verified_until: Option<DateTime<Utc>>,
}

impl SessionState {
    /// No identity and no marker.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// An identity without a verified marker, e.g. after the browser restarted.
    #[must_use]
    pub fn remembered(identity: DiscordUser) -> Self {
        Self {
            identity: Some(identity),
            verified_until: None,
        }
    }

    /// An identity that passed the admin check, valid until `until`.
    #[must_use]
    pub fn verified(identity: DiscordUser, until: DateTime<Utc>) -> Self {
        Self {
            identity: Some(identity),
            verified_until: Some(until),
        }
    }

    /// Returns true if the marker is present and not yet expired at `now`.
    #[must_use]
    pub fn is_verified_at(&self, now: DateTime<Utc>) -> bool {
        self.verified_until.is_some_and(|until| now < until)
    }
}

/// What the admin route shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewRole {
    /// The login screen.
    Anonymous,
    /// The admin panel, for this user.
    Admin(DiscordUser),
}

impl ViewRole {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin(_))
    }
}

/// Derives the visible role from session state.
///
/// The admin view requires an identity and an unexpired marker. Either one
/// alone yields `Anonymous`.
#[must_use]
pub fn view_role(state: &SessionState, now: DateTime<Utc>) -> ViewRole {
    match &state.identity {
        Some(identity) if state.is_verified_at(now) => ViewRole::Admin(identity.clone()),
        _ => ViewRole::Anonymous,
    }
}

/// A string key/value store, shaped like the browser's Web Storage.
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

/// Web Storage held in memory.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Drops every entry, as the browser does to session storage when a tab closes.
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

/// Loads and saves `SessionState`.
pub trait SessionStore: Send + Sync {
    /// Reads the current state. Unreadable entries count as absent.
    fn load(&self) -> SessionState;
    /// Replaces the stored state.
    fn save(&self, state: &SessionState);
    /// Forgets both the identity and the marker.
    fn clear(&self) {
        self.save(&SessionState::anonymous());
    }
}

/// `SessionStore` over two Web Storage areas.
///
/// `persistent` plays the role of local storage and `transient` of session
/// storage.
#[derive(Debug, Default)]
pub struct StorageSessionStore<P, T> {
    persistent: P,
    transient: T,
}

impl<P: KeyValueStorage, T: KeyValueStorage> StorageSessionStore<P, T> {
    #[must_use]
    pub fn new(persistent: P, transient: T) -> Self {
        Self {
            persistent,
            transient,
        }
    }

    /// Returns the transient area.
    pub fn transient(&self) -> &T {
        &self.transient
    }

    /// Drops the verified marker while keeping the identity, as happens when
    /// the browser is closed and reopened.
    pub fn end_browsing_context(&self) {
        self.transient.remove(VERIFIED_KEY);
    }
}

impl<P: KeyValueStorage, T: KeyValueStorage> SessionStore for StorageSessionStore<P, T> {
    fn load(&self) -> SessionState {
        let identity = self.persistent.get(IDENTITY_KEY).and_then(|raw| {
            serde_json::from_str::<DiscordUser>(&raw)
                .inspect_err(|e| warn!(error = %e, "discarding unreadable stored identity"))
                .ok()
        });
        let verified_until = self.transient.get(VERIFIED_KEY).and_then(|raw| {
            DateTime::parse_from_rfc3339(&raw)
                .map(|at| at.with_timezone(&Utc))
                .ok()
        });
        SessionState {
            identity,
            verified_until,
        }
    }

    fn save(&self, state: &SessionState) {
        match &state.identity {
            Some(identity) => match serde_json::to_string(identity) {
                Ok(json) => self.persistent.set(IDENTITY_KEY, json),
                Err(e) => {
                    warn!(error = %e, "failed to serialize identity");
                    self.persistent.remove(IDENTITY_KEY);
                }
            },
            None => self.persistent.remove(IDENTITY_KEY),
        }
        match state.verified_until {
            Some(until) => self.transient.set(VERIFIED_KEY, until.to_rfc3339()),
            None => self.transient.remove(VERIFIED_KEY),
        }
    }
}
