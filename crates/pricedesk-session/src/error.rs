use pricedesk_client::ClientError;
use thiserror::Error;

/// Errors returned by the session layer.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Required credentials are missing; auth stays disabled for the session.
    #[error("configuration error: {0}")]
    Config(String),

    /// The OAuth token exchange was rejected.
    #[error("{message} (HTTP {status})")]
    Auth { status: u16, message: String },

    /// Network or TLS failure talking to the OAuth endpoint.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid shop domain \"{shop}\": {reason}")]
    InvalidShop { shop: String, reason: String },

    #[error("invalid launch URL \"{url}\": {reason}")]
    InvalidLaunchUrl { url: String, reason: String },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Errors returned by [`crate::KeyValueStore`] implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session store I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("session store at {path} is not a JSON object: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
