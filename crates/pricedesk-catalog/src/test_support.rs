//! In-memory [`CatalogSource`] stubs shared by the unit tests.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;

use pricedesk_client::ClientError;
use pricedesk_core::{Collection, Product, ProductStatus, Variant};
use tokio::sync::oneshot;

use crate::source::CatalogSource;

pub(crate) fn collection(id: &str, title: &str, handle: &str) -> Collection {
    Collection {
        id: id.to_string(),
        title: title.to_string(),
        description: format!("Collection: {title}"),
        handle: handle.to_string(),
        products_count: 0,
        image: None,
    }
}

pub(crate) fn product(id: &str, title: &str) -> Product {
    Product {
        id: id.to_string(),
        title: title.to_string(),
        handle: title.to_lowercase().replace(' ', "-"),
        status: ProductStatus::Active,
        vendor: "Acme".to_string(),
        product_type: String::new(),
        tags: Vec::new(),
        variants: vec![Variant {
            id: format!("{id}-v1"),
            title: "Default Title".to_string(),
            price: "10.00".to_string(),
            compare_at_price: None,
            sku: String::new(),
            inventory_quantity: 1,
            weight: 0.0,
            weight_unit: "kg".to_string(),
            selected_options: Vec::new(),
        }],
        images: Vec::new(),
        options: Vec::new(),
        created_at: String::new(),
        updated_at: String::new(),
    }
}

pub(crate) fn remote_error(status: u16) -> ClientError {
    ClientError::Remote {
        status,
        status_text: "Internal Server Error".to_string(),
        url: "http://localhost:3001/dev/api/shopify/collections".to_string(),
    }
}

type Gate = Option<oneshot::Receiver<()>>;

/// Answers each call with the next scripted response, optionally waiting on
/// a gate first so tests can hold a fetch open.
#[derive(Default)]
pub(crate) struct ScriptedSource {
    collections: Mutex<VecDeque<(Gate, Result<Vec<Collection>, ClientError>)>>,
    products: Mutex<VecDeque<(Gate, Result<Vec<Product>, ClientError>)>>,
    calls: Mutex<Vec<(String, u32)>>,
}

impl ScriptedSource {
    pub(crate) fn push_collections(&self, gate: Gate, result: Result<Vec<Collection>, ClientError>) {
        self.collections.lock().unwrap().push_back((gate, result));
    }

    pub(crate) fn push_products(&self, gate: Gate, result: Result<Vec<Product>, ClientError>) {
        self.products.lock().unwrap().push_back((gate, result));
    }

    /// `(target, limit)` for every call so far; target is `"collections"`
    /// or the collection id.
    pub(crate) fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

impl CatalogSource for ScriptedSource {
    fn list_collections(
        &self,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Collection>, ClientError>> + Send {
        self.calls
            .lock()
            .unwrap()
            .push(("collections".to_string(), limit));
        let (gate, result) = self
            .collections
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted list_collections call");
        async move {
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            result
        }
    }

    fn list_products_in_collection(
        &self,
        collection_id: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Product>, ClientError>> + Send {
        self.calls
            .lock()
            .unwrap()
            .push((collection_id.to_string(), limit));
        let (gate, result) = self
            .products
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted list_products_in_collection call");
        async move {
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            result
        }
    }
}
