//! The session state machine: resolves who we are acting for at start-up
//! and owns the install, callback and logout transitions.

use pricedesk_client::ServerApiClient;
use pricedesk_core::AppConfig;
use reqwest::Url;

use crate::auth::{AuthService, EMBEDDED_APP_TOKEN};
use crate::error::{SessionError, StoreError};
use crate::launch::LaunchParams;
use crate::store::{KeyValueStore, ACCESS_TOKEN_KEY, SHOP_KEY};

/// Sends the user agent to an external URL (the OAuth authorize page).
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &Url);
}

/// How the active session was established.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionMode {
    /// Launched inside the Shopify admin; `host` identifies the embedding
    /// frame and is never persisted.
    Embedded { host: String },
    /// Restored from a persisted shop and token.
    Stored,
    /// Token obtained by a completed OAuth callback in this process.
    Installed,
    /// Explicitly configured development shop and token.
    Development,
}

#[derive(Clone, PartialEq, Eq)]
pub struct ActiveSession {
    pub shop: String,
    pub access_token: String,
    pub mode: SessionMode,
}

impl std::fmt::Debug for ActiveSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveSession")
            .field("shop", &self.shop)
            .field("access_token", &"[redacted]")
            .field("mode", &self.mode)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Resolving,
    Authenticated(ActiveSession),
    Unauthenticated,
}

/// Owns the session for the lifetime of the process.
pub struct SessionContext<S: KeyValueStore> {
    api: ServerApiClient,
    store: S,
    navigator: Box<dyn Navigator>,
    auth: Option<AuthService>,
    config_error: Option<String>,
    dev_fallback: Option<(String, String)>,
    last_error: Option<String>,
    state: SessionState,
}

impl<S: KeyValueStore> SessionContext<S> {
    /// Creates a context with auth disabled and no development fallback.
    pub fn new(api: ServerApiClient, store: S, navigator: Box<dyn Navigator>) -> Self {
        Self {
            api,
            store,
            navigator,
            auth: None,
            config_error: None,
            dev_fallback: None,
            last_error: None,
            state: SessionState::Uninitialized,
        }
    }

    /// Enables the OAuth flow, or records why it is disabled.
    ///
    /// A [`SessionError::Config`] becomes the persistent
    /// [`config_error`](Self::config_error) banner instead of failing.
    #[must_use]
    pub fn with_auth(mut self, auth: Result<AuthService, SessionError>) -> Self {
        match auth {
            Ok(service) => {
                self.auth = Some(service);
                self.config_error = None;
            }
            Err(e) => {
                let message = match e {
                    SessionError::Config(message) => message,
                    other => other.to_string(),
                };
                tracing::warn!(error = %message, "Shopify auth disabled");
                self.auth = None;
                self.config_error = Some(message);
            }
        }
        self
    }

    #[must_use]
    pub fn with_dev_fallback(mut self, shop: &str, access_token: &str) -> Self {
        self.dev_fallback = Some((shop.to_owned(), access_token.to_owned()));
        self
    }

    /// Builds the context the application uses: API client and auth service
    /// from `config`, plus the development fallback if configured.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Client`] if the API client cannot be built.
    /// Missing OAuth credentials do not fail; see
    /// [`config_error`](Self::config_error).
    pub fn from_config(
        config: &AppConfig,
        store: S,
        navigator: Box<dyn Navigator>,
    ) -> Result<Self, SessionError> {
        let api = ServerApiClient::from_config(config)?;
        let mut context =
            Self::new(api, store, navigator).with_auth(AuthService::from_config(config));
        if let Some((shop, token)) = config.dev_fallback() {
            context = context.with_dev_fallback(shop, token);
        }
        Ok(context)
    }

    /// Determines the active session from launch parameters and the store.
    ///
    /// Precedence: an embedded launch (shop plus `host`), then a persisted
    /// token, then the configured development fallback. Otherwise the
    /// session is unauthenticated. A store whose contents cannot be parsed
    /// reads as empty.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] if the store cannot be read at all;
    /// the state is then `Unauthenticated`.
    pub fn resolve(&mut self, launch: &LaunchParams) -> Result<&SessionState, SessionError> {
        self.state = SessionState::Resolving;

        let resolved = self.resolve_inner(launch);
        match resolved {
            Ok(Some(session)) => {
                tracing::info!(shop = %session.shop, mode = ?session.mode, "session authenticated");
                self.state = SessionState::Authenticated(session);
            }
            Ok(None) => {
                tracing::info!("no session available; unauthenticated");
                self.state = SessionState::Unauthenticated;
            }
            Err(e) => {
                self.state = SessionState::Unauthenticated;
                return Err(e);
            }
        }
        Ok(&self.state)
    }

    fn resolve_inner(&self, launch: &LaunchParams) -> Result<Option<ActiveSession>, SessionError> {
        let shop = match &launch.shop {
            Some(shop) => Some(shop.clone()),
            None => self.stored(SHOP_KEY)?,
        };

        if let (Some(shop), Some(host)) = (&shop, &launch.host) {
            return Ok(Some(ActiveSession {
                shop: shop.clone(),
                access_token: EMBEDDED_APP_TOKEN.to_string(),
                mode: SessionMode::Embedded { host: host.clone() },
            }));
        }

        if let Some(shop) = shop {
            if let Some(token) = self.stored(ACCESS_TOKEN_KEY)? {
                return Ok(Some(ActiveSession {
                    shop,
                    access_token: token,
                    mode: SessionMode::Stored,
                }));
            }
        }

        Ok(self
            .dev_fallback
            .as_ref()
            .map(|(shop, token)| ActiveSession {
                shop: shop.clone(),
                access_token: token.clone(),
                mode: SessionMode::Development,
            }))
    }

    fn stored(&self, key: &str) -> Result<Option<String>, SessionError> {
        match self.store.get(key) {
            Ok(value) => Ok(value),
            Err(e @ StoreError::Corrupt { .. }) => {
                tracing::warn!(error = %e, key, "ignoring unreadable session store");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Starts the OAuth install by sending the navigator to the authorize
    /// URL. Returns the URL it navigated to.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Config`] if auth is disabled.
    /// - [`SessionError::InvalidShop`] if `shop` is not a bare domain.
    pub fn install_app(&mut self, shop: &str) -> Result<Url, SessionError> {
        let Some(auth) = &self.auth else {
            let message = "Auth service not initialized".to_string();
            self.last_error = Some(message.clone());
            return Err(SessionError::Config(message));
        };

        match auth.authorize_url(shop, None) {
            Ok(url) => {
                tracing::info!(shop, "redirecting to OAuth authorize");
                self.navigator.navigate(&url);
                Ok(url)
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Completes the OAuth install: exchanges `code`, persists the shop and
    /// token, and authenticates.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Config`] if auth is disabled.
    /// - Any exchange failure from [`AuthService::exchange_code`].
    /// - [`SessionError::Store`] if the shop and token cannot be persisted.
    ///   Both keys are then removed so a later `resolve` never pairs the
    ///   new shop with an older token.
    ///
    /// The state is left unchanged on error.
    pub async fn handle_auth_callback(
        &mut self,
        shop: &str,
        code: &str,
    ) -> Result<&SessionState, SessionError> {
        let Some(auth) = &self.auth else {
            let message = "Auth service not initialized".to_string();
            self.last_error = Some(message.clone());
            return Err(SessionError::Config(message));
        };

        self.last_error = None;
        let token = match auth.exchange_code(shop, code).await {
            Ok(token) => token,
            Err(e) => {
                self.last_error = Some(e.to_string());
                return Err(e);
            }
        };

        if let Err(e) = self
            .store
            .set_many(&[(SHOP_KEY, shop), (ACCESS_TOKEN_KEY, token.as_str())])
        {
            tracing::warn!(shop, error = %e, "failed to persist session; discarding stored keys");
            for key in [SHOP_KEY, ACCESS_TOKEN_KEY] {
                if let Err(cleanup) = self.store.delete(key) {
                    tracing::warn!(key, error = %cleanup, "failed to discard stored key");
                }
            }
            self.last_error = Some(e.to_string());
            return Err(e.into());
        }

        tracing::info!(shop, "app installed; session authenticated");
        self.state = SessionState::Authenticated(ActiveSession {
            shop: shop.to_owned(),
            access_token: token,
            mode: SessionMode::Installed,
        });
        Ok(&self.state)
    }

    /// Forgets the persisted shop and token and drops the session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] if the store cannot be written. The
    /// session is dropped regardless. A store that cannot be parsed is
    /// cleared instead.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.state = SessionState::Unauthenticated;
        tracing::info!("logged out");
        let deleted = self
            .store
            .delete(SHOP_KEY)
            .and_then(|()| self.store.delete(ACCESS_TOKEN_KEY));
        match deleted {
            Ok(()) => Ok(()),
            Err(e @ StoreError::Corrupt { .. }) => {
                tracing::warn!(error = %e, "resetting unreadable session store");
                self.store.clear()?;
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// The API client, available only while authenticated.
    #[must_use]
    pub fn api(&self) -> Option<&ServerApiClient> {
        match self.state {
            SessionState::Authenticated(_) => Some(&self.api),
            _ => None,
        }
    }

    /// Why auth is disabled, if it is.
    #[must_use]
    pub fn config_error(&self) -> Option<&str> {
        self.config_error.as_deref()
    }

    /// The most recent install or callback failure, falling back to the
    /// configuration banner.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref().or(self.config_error())
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }

    #[must_use]
    pub fn active(&self) -> Option<&ActiveSession> {
        match &self.state {
            SessionState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    #[must_use]
    pub fn shop(&self) -> Option<&str> {
        self.active().map(|s| s.shop.as_str())
    }

    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.active().map(|s| s.access_token.as_str())
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;
