use std::future::Future;

use pricedesk_client::{ClientError, ServerApiClient};
use pricedesk_core::{Collection, Product};

/// The reads the catalog components need from the backend.
///
/// Implemented for [`ServerApiClient`]; tests substitute in-memory stubs.
pub trait CatalogSource: Send + Sync {
    fn list_collections(
        &self,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Collection>, ClientError>> + Send;

    fn list_products_in_collection(
        &self,
        collection_id: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Product>, ClientError>> + Send;
}

impl CatalogSource for ServerApiClient {
    fn list_collections(
        &self,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Collection>, ClientError>> + Send {
        ServerApiClient::list_collections(self, Some(limit))
    }

    fn list_products_in_collection(
        &self,
        collection_id: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Product>, ClientError>> + Send {
        ServerApiClient::list_products_in_collection(self, collection_id, Some(limit))
    }
}
