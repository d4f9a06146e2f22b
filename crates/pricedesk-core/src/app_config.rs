use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub server_base_url: String,
    pub shopify_api_key: Option<String>,
    pub shopify_api_secret: Option<String>,
    pub shopify_scopes: String,
    pub shopify_redirect_uri: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub session_path: PathBuf,
    pub default_page_size: u32,
    pub max_page_size: u32,
    /// Development fallback shop, used only when both this and
    /// `dev_access_token` are set.
    pub dev_shop: Option<String>,
    pub dev_access_token: Option<String>,
}

impl AppConfig {
    /// Returns the development fallback `(shop, token)` pair if both halves
    /// are configured.
    #[must_use]
    pub fn dev_fallback(&self) -> Option<(&str, &str)> {
        match (&self.dev_shop, &self.dev_access_token) {
            (Some(shop), Some(token)) => Some((shop.as_str(), token.as_str())),
            _ => None,
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("server_base_url", &self.server_base_url)
            .field("shopify_api_key", &self.shopify_api_key)
            .field(
                "shopify_api_secret",
                &self.shopify_api_secret.as_ref().map(|_| "[redacted]"),
            )
            .field("shopify_scopes", &self.shopify_scopes)
            .field("shopify_redirect_uri", &self.shopify_redirect_uri)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("session_path", &self.session_path)
            .field("default_page_size", &self.default_page_size)
            .field("max_page_size", &self.max_page_size)
            .field("dev_shop", &self.dev_shop)
            .field(
                "dev_access_token",
                &self.dev_access_token.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}
