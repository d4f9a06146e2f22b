//! Shopify OAuth: authorize URL construction and code-for-token exchange.

use std::time::Duration;

use pricedesk_core::AppConfig;
use rand::distr::Alphanumeric;
use rand::Rng;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Placeholder token used for embedded launches. The host application
/// performs the real authentication, so no exchange happens.
pub const EMBEDDED_APP_TOKEN: &str = "embedded-app-token";

const NONCE_LEN: usize = 32;

/// Returns a random alphanumeric string suitable for the OAuth `state`.
#[must_use]
pub fn generate_nonce() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LEN)
        .map(char::from)
        .collect()
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// OAuth client for a single app installation flow.
#[derive(Clone)]
pub struct AuthService {
    client: Client,
    api_key: String,
    api_secret: String,
    scopes: String,
    redirect_uri: String,
    /// Replaces `https://{shop}` for the token exchange. Test hook.
    oauth_origin: Option<Url>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[redacted]")
            .field("scopes", &self.scopes)
            .field("redirect_uri", &self.redirect_uri)
            .field("oauth_origin", &self.oauth_origin)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    /// Creates the service.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Config`] if `api_key` or `api_secret` is
    /// empty, or [`SessionError::Transport`] if the HTTP client cannot be
    /// built.
    pub fn new(
        api_key: &str,
        api_secret: &str,
        scopes: &str,
        redirect_uri: &str,
        timeout_secs: u64,
    ) -> Result<Self, SessionError> {
        if api_key.trim().is_empty() || api_secret.trim().is_empty() {
            return Err(SessionError::Config(
                "Shopify API credentials not configured".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            api_secret: api_secret.to_owned(),
            scopes: scopes.to_owned(),
            redirect_uri: redirect_uri.to_owned(),
            oauth_origin: None,
        })
    }

    /// Creates the service from `SHOPIFY_*` configuration.
    ///
    /// # Errors
    ///
    /// See [`AuthService::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, SessionError> {
        Self::new(
            config.shopify_api_key.as_deref().unwrap_or_default(),
            config.shopify_api_secret.as_deref().unwrap_or_default(),
            &config.shopify_scopes,
            &config.shopify_redirect_uri,
            config.request_timeout_secs,
        )
    }

    /// Sends the token exchange to `origin` instead of the shop's domain.
    #[must_use]
    pub fn with_oauth_origin(mut self, origin: Url) -> Self {
        self.oauth_origin = Some(origin);
        self
    }

    /// Builds the URL the merchant is sent to in order to approve the app.
    ///
    /// When `state` is `None` a fresh nonce is generated.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidShop`] if `shop` is not a bare domain.
    pub fn authorize_url(&self, shop: &str, state: Option<&str>) -> Result<Url, SessionError> {
        let mut url = shop_url(shop, "admin/oauth/authorize")?;
        let state = state.map_or_else(generate_nonce, str::to_owned);
        url.query_pairs_mut()
            .append_pair("client_id", &self.api_key)
            .append_pair("scope", &self.scopes)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("state", &state)
            .append_pair("grant_options[]", "per-user");
        Ok(url)
    }

    /// Exchanges an authorization `code` for an access token.
    ///
    /// # Errors
    ///
    /// - [`SessionError::InvalidShop`] if `shop` is not a bare domain.
    /// - [`SessionError::Auth`] on a non-2xx response.
    /// - [`SessionError::Transport`] on network failure.
    /// - [`SessionError::Decode`] if the body lacks `access_token`.
    pub async fn exchange_code(&self, shop: &str, code: &str) -> Result<String, SessionError> {
        let url = match &self.oauth_origin {
            Some(origin) => {
                validate_shop(shop)?;
                origin
                    .join("admin/oauth/access_token")
                    .map_err(|e| SessionError::InvalidShop {
                        shop: shop.to_owned(),
                        reason: e.to_string(),
                    })?
            }
            None => shop_url(shop, "admin/oauth/access_token")?,
        };

        tracing::debug!(method = "POST", url = %url, "exchanging OAuth code");
        let response = self
            .client
            .post(url.clone())
            .json(&TokenRequest {
                client_id: &self.api_key,
                client_secret: &self.api_secret,
                code,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(shop, status = status.as_u16(), "OAuth token exchange failed");
            return Err(SessionError::Auth {
                status: status.as_u16(),
                message: "Failed to get access token".to_string(),
            });
        }

        let body = response.text().await?;
        let parsed: TokenResponse =
            serde_json::from_str(&body).map_err(|e| SessionError::Decode {
                context: format!("OAuth token response from {shop}"),
                source: e,
            })?;
        Ok(parsed.access_token)
    }
}

/// Rejects anything that is not a bare host name such as
/// `demo.myshopify.com`.
pub(crate) fn validate_shop(shop: &str) -> Result<(), SessionError> {
    let invalid = |reason: &str| SessionError::InvalidShop {
        shop: shop.to_owned(),
        reason: reason.to_owned(),
    };

    if shop.is_empty() {
        return Err(invalid("shop domain is empty"));
    }
    if !shop
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
    {
        return Err(invalid("expected a bare domain like demo.myshopify.com"));
    }
    if shop.starts_with('.') || shop.ends_with('.') || shop.contains("..") {
        return Err(invalid("malformed domain labels"));
    }
    Ok(())
}

fn shop_url(shop: &str, path: &str) -> Result<Url, SessionError> {
    validate_shop(shop)?;
    Url::parse(&format!("https://{shop}/{path}")).map_err(|e| SessionError::InvalidShop {
        shop: shop.to_owned(),
        reason: e.to_string(),
    })
}
