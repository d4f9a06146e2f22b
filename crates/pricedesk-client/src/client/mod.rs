//! HTTP client for the storefront admin backend (`/api/shopify/*`, `/api/csv/*`).
//!
//! Wraps `reqwest` with status-code error translation and typed response
//! decoding. Every successful response passes through [`crate::adapt`];
//! callers never see wire-format shapes. Nothing is retried.

mod csv;

use std::str::FromStr;
use std::time::Duration;

use pricedesk_core::{AppConfig, Collection, Product, Variant};
use reqwest::{Client, RequestBuilder, Response, Url};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::adapt::{adapt_collection, adapt_product, adapt_updated_variant};
use crate::error::ClientError;
use crate::types::{
    CollectionResponse, CollectionsResponse, ProductResponse, ProductsResponse, VariantResponse,
};

/// Page size sent when the caller does not pass a limit.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Largest page size the backend is expected to honour. Larger limits are
/// still sent as-is; they only produce a warning.
pub const MAX_PAGE_SIZE: u32 = 250;

/// Client for the storefront admin backend.
///
/// Use [`ServerApiClient::from_config`] in the application and
/// [`ServerApiClient::new`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct ServerApiClient {
    client: Client,
    base_url: Url,
    default_page_size: u32,
    max_page_size: u32,
}

#[derive(Serialize)]
struct PriceUpdate<'a> {
    price: &'a str,
}

impl ServerApiClient {
    /// Creates a client for `base_url` with the given request timeout and
    /// `User-Agent`.
    ///
    /// `base_url` may carry a path prefix (e.g. `http://localhost:3001/dev`);
    /// endpoint paths are appended beneath it.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if `base_url` is not an
    /// http(s) URL, or [`ClientError::Transport`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise to exactly one trailing slash so `Url::join` appends to
        // the prefix instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: format!("unsupported scheme \"{}\"", parsed.scheme()),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        })
    }

    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// See [`ServerApiClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        let client = Self::new(
            &config.server_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )?;
        Ok(client.with_page_sizes(config.default_page_size, config.max_page_size))
    }

    /// Overrides the default and maximum page sizes.
    #[must_use]
    pub fn with_page_sizes(mut self, default_page_size: u32, max_page_size: u32) -> Self {
        self.default_page_size = default_page_size;
        self.max_page_size = max_page_size;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Lists up to `limit` collections (default 50).
    ///
    /// # Errors
    ///
    /// - [`ClientError::Remote`] on a non-2xx status.
    /// - [`ClientError::Transport`] on network failure.
    /// - [`ClientError::Decode`] if the body is not a collections envelope.
    pub async fn list_collections(&self, limit: Option<u32>) -> Result<Vec<Collection>, ClientError> {
        let limit = self.page_size(limit);
        let mut url = self.endpoint("api/shopify/collections")?;
        url.query_pairs_mut().append_pair("limit", &limit.to_string());

        let response: CollectionsResponse = self
            .get_json(url, &format!("collections(limit={limit})"))
            .await?;
        Ok(response.collections.into_iter().map(adapt_collection).collect())
    }

    /// Fetches one collection by id.
    ///
    /// # Errors
    ///
    /// Same as [`ServerApiClient::list_collections`].
    pub async fn get_collection(&self, collection_id: &str) -> Result<Collection, ClientError> {
        let mut url = self.endpoint("api/shopify/collections")?;
        url.query_pairs_mut().append_pair("id", collection_id);

        let response: CollectionResponse = self
            .get_json(url, &format!("collection(id={collection_id})"))
            .await?;
        Ok(adapt_collection(response.collection))
    }

    /// Lists up to `limit` products belonging to a collection (default 50).
    ///
    /// # Errors
    ///
    /// Same as [`ServerApiClient::list_collections`].
    pub async fn list_products_in_collection(
        &self,
        collection_id: &str,
        limit: Option<u32>,
    ) -> Result<Vec<Product>, ClientError> {
        let limit = self.page_size(limit);
        let mut url = self.endpoint("api/shopify/products")?;
        url.query_pairs_mut()
            .append_pair("collection_id", collection_id)
            .append_pair("limit", &limit.to_string());

        let response: ProductsResponse = self
            .get_json(
                url,
                &format!("products(collection_id={collection_id}, limit={limit})"),
            )
            .await?;
        Ok(response.products.into_iter().map(adapt_product).collect())
    }

    /// Lists up to `limit` products across the shop. `after` is an opaque
    /// cursor passed through to the backend untouched.
    ///
    /// # Errors
    ///
    /// Same as [`ServerApiClient::list_collections`].
    pub async fn list_products(
        &self,
        limit: Option<u32>,
        after: Option<&str>,
    ) -> Result<Vec<Product>, ClientError> {
        let limit = self.page_size(limit);
        let mut url = self.endpoint("api/shopify/products")?;
        url.query_pairs_mut().append_pair("limit", &limit.to_string());
        if let Some(cursor) = after {
            url.query_pairs_mut().append_pair("after", cursor);
        }

        let response: ProductsResponse = self
            .get_json(url, &format!("products(limit={limit})"))
            .await?;
        Ok(response.products.into_iter().map(adapt_product).collect())
    }

    /// Fetches one product by id.
    ///
    /// # Errors
    ///
    /// Same as [`ServerApiClient::list_collections`].
    pub async fn get_product(&self, product_id: &str) -> Result<Product, ClientError> {
        let mut url = self.endpoint("api/shopify/products")?;
        url.query_pairs_mut().append_pair("id", product_id);

        let response: ProductResponse = self
            .get_json(url, &format!("product(id={product_id})"))
            .await?;
        Ok(adapt_product(response.product))
    }

    /// Sets a variant's price. `price` must be a decimal string; it is sent
    /// exactly as given.
    ///
    /// # Errors
    ///
    /// - [`ClientError::InvalidPrice`] if `price` is not a decimal string (no
    ///   request is made).
    /// - [`ClientError::Remote`], [`ClientError::Transport`],
    ///   [`ClientError::Decode`] as for the read endpoints.
    pub async fn update_variant_price(
        &self,
        variant_id: &str,
        price: &str,
    ) -> Result<Variant, ClientError> {
        if Decimal::from_str(price).is_err() {
            return Err(ClientError::InvalidPrice {
                price: price.to_owned(),
            });
        }

        let url = self.variant_url(variant_id)?;
        tracing::debug!(method = "PUT", %url, "server api request");
        let request = self
            .client
            .put(url.clone())
            .json(&PriceUpdate { price });
        let response = self.send(request, &url).await?;
        let response: VariantResponse =
            Self::decode(response, &format!("variant update(id={variant_id})")).await?;
        Ok(adapt_updated_variant(response.variant))
    }

    /// Resolves `path` beneath the base URL.
    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// `api/shopify/variants/{id}`, with the id percent-encoded as a single
    /// path segment.
    fn variant_url(&self, variant_id: &str) -> Result<Url, ClientError> {
        let mut url = self.endpoint("api/shopify/variants")?;
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: "base URL cannot carry path segments".to_string(),
            })?
            .push(variant_id);
        Ok(url)
    }

    fn page_size(&self, limit: Option<u32>) -> u32 {
        let limit = limit.unwrap_or(self.default_page_size);
        if limit > self.max_page_size {
            tracing::warn!(
                limit,
                max_page_size = self.max_page_size,
                "page size exceeds configured maximum; sending as requested"
            );
        }
        limit
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, context: &str) -> Result<T, ClientError> {
        tracing::debug!(method = "GET", %url, "server api request");
        let request = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json");
        let response = self.send(request, &url).await?;
        Self::decode(response, context).await
    }

    /// Sends a request and translates any non-2xx status into
    /// [`ClientError::Remote`].
    async fn send(&self, request: RequestBuilder, url: &Url) -> Result<Response, ClientError> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(%url, error = %e, "server api request failed");
            ClientError::Transport(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), %url, "server api returned error status");
            return Err(ClientError::Remote {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                url: url.to_string(),
            });
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response, context: &str) -> Result<T, ClientError> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Decode {
            context: context.to_owned(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
