//! Wire-format types for the backend's `/api/shopify/*` endpoints.
//!
//! The backend proxies the Shopify Admin GraphQL API and flattens its
//! responses before returning them, so these shapes are a superset of the
//! domain model plus a few server-only fields (`updatedAt` on collections,
//! `product_id` on variants).
//!
//! ### Identifiers
//! Usually GraphQL global ids (`"gid://shopify/Product/123"`), but older
//! backend builds proxied the REST API and returned bare integers. Both are
//! accepted and stored as strings.
//!
//! ### Nullable collections
//! `variants`, `images`, `options`, `tags` and `selected_options` may be
//! absent or `null`. They are modelled as `Option<Vec<_>>` and become empty
//! vectors in [`crate::adapt`].
//!
//! ### `compare_at_price`
//! Explicitly `null` when the variant is not on sale.
//!
//! Anything required here (ids, titles, handles, prices) is required on
//! purpose: a payload without them is a shape mismatch and surfaces as
//! [`crate::ClientError::Decode`].

use serde::{Deserialize, Deserializer};

/// Response from `GET /api/shopify/collections?limit=N`.
#[derive(Debug, Deserialize)]
pub struct CollectionsResponse {
    pub collections: Vec<WireCollection>,
}

/// Response from `GET /api/shopify/collections?id=ID`.
#[derive(Debug, Deserialize)]
pub struct CollectionResponse {
    pub collection: WireCollection,
}

/// Response from `GET /api/shopify/products?limit=N`.
#[derive(Debug, Deserialize)]
pub struct ProductsResponse {
    pub products: Vec<WireProduct>,
}

/// Response from `GET /api/shopify/products?id=ID`.
#[derive(Debug, Deserialize)]
pub struct ProductResponse {
    pub product: WireProduct,
}

/// Response from `PUT /api/shopify/variants/ID`.
#[derive(Debug, Deserialize)]
pub struct VariantResponse {
    pub variant: WireUpdatedVariant,
}

#[derive(Debug, Deserialize)]
pub struct WireCollection {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    pub title: String,
    pub handle: String,
    /// Server-side modification time; not carried into the domain model.
    #[serde(default, rename = "updatedAt")]
    pub updated_at: Option<String>,
    /// Ignored by the adapter, which always synthesizes a description.
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<WireCollectionImage>,
}

#[derive(Debug, Deserialize)]
pub struct WireCollectionImage {
    pub src: String,
    #[serde(default)]
    pub alt: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WireProduct {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    pub title: String,
    pub handle: String,
    /// Raw status string; cast into the domain enum without validation.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub variants: Option<Vec<WireVariant>>,
    #[serde(default)]
    pub images: Option<Vec<WireImage>>,
    #[serde(default)]
    pub options: Option<Vec<WireOption>>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WireVariant {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    /// Parent product id; server-only, dropped by the adapter.
    #[serde(default, deserialize_with = "opaque_id_opt")]
    pub product_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    pub price: String,
    #[serde(default)]
    pub compare_at_price: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub inventory_quantity: Option<i64>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub weight_unit: Option<String>,
    #[serde(default)]
    pub selected_options: Option<Vec<WireSelectedOption>>,
}

/// Variant as echoed back by the price-update endpoint. Narrower than
/// [`WireVariant`]: weight and compare-at fields are not returned.
#[derive(Debug, Deserialize)]
pub struct WireUpdatedVariant {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub price: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub inventory_quantity: Option<i64>,
    #[serde(default)]
    pub selected_options: Option<Vec<WireSelectedOption>>,
}

#[derive(Debug, Deserialize)]
pub struct WireSelectedOption {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct WireImage {
    #[serde(default, deserialize_with = "opaque_id_opt")]
    pub id: Option<String>,
    pub src: String,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub position: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct WireOption {
    #[serde(default, deserialize_with = "opaque_id_opt")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub position: Option<i32>,
    #[serde(default)]
    pub values: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

fn opaque_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    RawId::deserialize(deserializer).map(String::from)
}

fn opaque_id_opt<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Option::<RawId>::deserialize(deserializer).map(|raw| raw.map(String::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_become_strings() {
        let product: WireProduct = serde_json::from_value(serde_json::json!({
            "id": 6_789_012_345_678_u64,
            "title": "Tee",
            "handle": "tee",
            "images": [{ "id": 11, "src": "https://cdn.example.com/a.png" }]
        }))
        .unwrap();
        assert_eq!(product.id, "6789012345678");
        let images = product.images.unwrap();
        assert_eq!(images[0].id.as_deref(), Some("11"));
    }

    #[test]
    fn null_arrays_deserialize_as_none() {
        let product: WireProduct = serde_json::from_value(serde_json::json!({
            "id": "gid://shopify/Product/1",
            "title": "Tee",
            "handle": "tee",
            "variants": null,
            "images": null,
            "options": null,
            "tags": null
        }))
        .unwrap();
        assert!(product.variants.is_none());
        assert!(product.images.is_none());
        assert!(product.options.is_none());
        assert!(product.tags.is_none());
    }

    #[test]
    fn product_without_handle_is_rejected() {
        let result = serde_json::from_value::<WireProduct>(serde_json::json!({
            "id": "gid://shopify/Product/1",
            "title": "Tee"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn collection_reads_camel_case_updated_at() {
        let collection: WireCollection = serde_json::from_value(serde_json::json!({
            "id": "gid://shopify/Collection/9",
            "title": "Summer Sale",
            "handle": "summer-sale",
            "updatedAt": "2025-01-15T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(collection.updated_at.as_deref(), Some("2025-01-15T10:00:00Z"));
    }
}
