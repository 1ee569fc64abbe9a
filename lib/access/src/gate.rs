//! The client-side session gate.
//!
//! Drives the Discord login for the admin route: builds the consent URL,
//! handles the callback by calling the exchange and check functions in turn,
//! and persists the result. It only decides what the browser shows; the
//! server re-checks the allow-list on every write.

use crate::api::{AdminApi, AdminCheckRequest, ExchangeRequest};
use crate::discord::GateConfig;
use crate::error::GateError;
use crate::identity::DiscordUser;
use crate::session::{SessionState, SessionStore, ViewRole, view_role};
use chrono::{DateTime, Utc};
use oauth2::basic::BasicClient;
use oauth2::{AuthUrl, ClientId, CsrfToken, RedirectUrl, Scope};
use rootcause::prelude::Report;
use tracing::{info, instrument, warn};

/// Where the gate currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    /// Nobody is verified.
    Anonymous,
    /// The user was sent to Discord and the callback is pending.
    Authenticating,
    /// The user passed the admin check and the marker has not expired.
    VerifiedAdmin(DiscordUser),
}

impl From<ViewRole> for GateState {
    fn from(role: ViewRole) -> Self {
        match role {
            ViewRole::Anonymous => Self::Anonymous,
            ViewRole::Admin(user) => Self::VerifiedAdmin(user),
        }
    }
}

/// The consent screen to navigate to.
#[derive(Debug, Clone)]
pub struct SignInRedirect {
    /// Full consent URL including query parameters.
    pub url: String,
    /// The random `state` parameter embedded in `url`.
    pub csrf_state: String,
}

/// Session gate over an admin functions client and a session store.
pub struct SessionGate<A, S> {
    api: A,
    store: S,
    config: GateConfig,
    state: GateState,
}

impl<A: AdminApi, S: SessionStore> SessionGate<A, S> {
    /// Creates a gate, deriving the initial state from what the store holds.
    pub fn new(api: A, store: S, config: GateConfig, now: DateTime<Utc>) -> Self {
        let state = view_role(&store.load(), now).into();
        Self {
            api,
            store,
            config,
            state,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GateState {
        &self.state
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Re-derives the state from storage, as on a page load.
    pub fn reload(&mut self, now: DateTime<Utc>) -> &GateState {
        self.state = view_role(&self.store.load(), now).into();
        &self.state
    }

    /// Builds the consent URL and moves to `Authenticating`.
    pub fn sign_in(&mut self) -> Result<SignInRedirect, Report<GateError>> {
        let auth_url = AuthUrl::new(self.config.authorize_url().to_string()).map_err(|e| {
            GateError::Configuration {
                reason: format!("authorize url: {e}"),
            }
        })?;
        let redirect_url = RedirectUrl::new(self.config.redirect_uri()).map_err(|e| {
            GateError::Configuration {
                reason: format!("redirect uri: {e}"),
            }
        })?;

        let client = BasicClient::new(ClientId::new(self.config.client_id().to_string()))
            .set_auth_uri(auth_url)
            .set_redirect_uri(redirect_url);

        let mut request = client.authorize_url(CsrfToken::new_random);
        for scope in self.config.scopes() {
            request = request.add_scope(Scope::new(scope.to_string()));
        }
        let (url, csrf_state) = request.add_extra_param("prompt", "none").url();

        self.state = GateState::Authenticating;
        Ok(SignInRedirect {
            url: url.to_string(),
            csrf_state: csrf_state.secret().clone(),
        })
    }

    /// Completes the login with the `code` Discord redirected back with.
    ///
    /// Exchanges the code, then checks the returned identity against the
    /// allow-list. Any failure clears stored state and leaves the gate
    /// `Anonymous`.
    #[instrument(skip(self, code))]
    pub async fn handle_callback(
        &mut self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<DiscordUser, Report<GateError>> {
        match self.verify(code, now).await {
            Ok((user, until)) => {
                self.store
                    .save(&SessionState::verified(user.clone(), until));
                info!(discord_id = %user.id, %until, "admin verified");
                self.state = GateState::VerifiedAdmin(user.clone());
                Ok(user)
            }
            Err(err) => {
                warn!(error = %err, "admin login failed");
                self.logout();
                Err(err.into())
            }
        }
    }

    async fn verify(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<(DiscordUser, DateTime<Utc>), GateError> {
        let until = self
            .config
            .verified_ttl()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| GateError::Configuration {
                reason: "verified ttl must be a positive, representable number of minutes"
                    .to_string(),
            })?;

        let exchange = self
            .api
            .exchange_code(&ExchangeRequest::new(code, self.config.redirect_uri()))
            .await
            .map_err(|e| GateError::Exchange {
                reason: e.current_context().to_string(),
            })?;
        let user = match (exchange.success, exchange.user) {
            (true, Some(user)) => user,
            _ => {
                return Err(GateError::Exchange {
                    reason: exchange
                        .error
                        .unwrap_or_else(|| "no user returned".to_string()),
                });
            }
        };

        let check = self
            .api
            .check_admin(&AdminCheckRequest::new(user.id.clone()))
            .await
            .map_err(|e| GateError::Check {
                reason: e.current_context().to_string(),
            })?;
        if let Some(reason) = check.error {
            return Err(GateError::Check { reason });
        }
        if !check.is_admin {
            return Err(GateError::NotAdmin);
        }
        Ok((user, until))
    }

    /// Forgets the identity and the marker.
    pub fn logout(&mut self) {
        self.store.clear();
        self.state = GateState::Anonymous;
    }
}
