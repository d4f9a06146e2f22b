use thiserror::Error;

/// Errors returned by [`crate::ServerApiClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network-level failure: DNS, refused connection, timeout, TLS, or a
    /// body that could not be read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("API call failed: {status} {status_text}")]
    Remote {
        status: u16,
        status_text: String,
        url: String,
    },

    /// The response body did not match the wire format expected for the endpoint.
    #[error("JSON deserialization error for {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    /// A price update was requested with a value that is not a decimal string.
    #[error("invalid price \"{price}\": expected a decimal string such as \"19.99\"")]
    InvalidPrice { price: String },
}

impl ClientError {
    /// The HTTP status code for [`ClientError::Remote`], `None` otherwise.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}
