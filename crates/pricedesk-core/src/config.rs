use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Nothing is strictly required: missing Shopify credentials leave the auth
/// service disabled, which the session layer reports as a configuration
/// error when it is first needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    // Empty values count as unset, matching how a blank `.env` entry reads.
    let optional = |var: &str| -> Option<String> { lookup(var).ok().filter(|v| !v.is_empty()) };

    let or_default =
        |var: &str, default: &str| -> String { optional(var).unwrap_or_else(|| default.to_string()) };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("PRICEDESK_ENV", "development"))?;
    let log_level = or_default("PRICEDESK_LOG_LEVEL", "info");

    let server_base_url = or_default("PRICEDESK_SERVER_BASE_URL", "http://localhost:3001/dev");
    if !(server_base_url.starts_with("http://") || server_base_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "PRICEDESK_SERVER_BASE_URL".to_string(),
            reason: format!("expected an http(s) URL, got \"{server_base_url}\""),
        });
    }

    let shopify_api_key = optional("SHOPIFY_API_KEY");
    let shopify_api_secret = optional("SHOPIFY_API_SECRET");
    let shopify_scopes = or_default("SHOPIFY_SCOPES", "read_products,write_products");
    let shopify_redirect_uri = or_default("SHOPIFY_REDIRECT_URI", "");

    let request_timeout_secs = parse_u64("PRICEDESK_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("PRICEDESK_USER_AGENT", "pricedesk/0.1 (storefront-admin)");
    let session_path = PathBuf::from(or_default(
        "PRICEDESK_SESSION_PATH",
        "./.pricedesk/session.json",
    ));

    let default_page_size = parse_u32("PRICEDESK_DEFAULT_PAGE_SIZE", "50")?;
    let max_page_size = parse_u32("PRICEDESK_MAX_PAGE_SIZE", "250")?;
    if default_page_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "PRICEDESK_DEFAULT_PAGE_SIZE".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let dev_shop = optional("PRICEDESK_DEV_SHOP");
    let dev_access_token = optional("PRICEDESK_DEV_ACCESS_TOKEN");

    Ok(AppConfig {
        env,
        log_level,
        server_base_url,
        shopify_api_key,
        shopify_api_secret,
        shopify_scopes,
        shopify_redirect_uri,
        request_timeout_secs,
        user_agent,
        session_path,
        default_page_size,
        max_page_size,
        dev_shop,
        dev_access_token,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PRICEDESK_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
