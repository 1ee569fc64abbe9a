//! Shared application state.

use folio_access::{AdminDirectory, IdentityProvider};
use folio_content::ContentStore;
use std::sync::Arc;

/// State shared by every handler. Immutable after start-up.
#[derive(Clone)]
pub struct AppState {
    /// The admin allow-list.
    pub admins: Arc<dyn AdminDirectory>,
    /// Site content.
    pub content: Arc<dyn ContentStore>,
    /// Discord code exchange; `None` when credentials are not configured.
    pub identity: Option<Arc<dyn IdentityProvider>>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        admins: Arc<dyn AdminDirectory>,
        content: Arc<dyn ContentStore>,
        identity: Option<Arc<dyn IdentityProvider>>,
    ) -> Self {
        Self {
            admins,
            content,
            identity,
        }
    }
}
