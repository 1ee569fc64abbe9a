//! The identity provider seam.

use crate::error::AuthenticationError;
use crate::identity::DiscordUser;
use async_trait::async_trait;
use rootcause::prelude::Report;

/// Turns an OAuth authorization code into the identity that granted it.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchanges `code` for an access token, then fetches the token owner's
    /// profile.
    ///
    /// `redirect_uri` must match the one used to obtain the code. No retry is
    /// attempted on failure.
    async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<DiscordUser, Report<AuthenticationError>>;
}
