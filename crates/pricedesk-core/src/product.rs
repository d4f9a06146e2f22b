use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A product as presented to the storefront admin views.
///
/// Built fresh from the backend on every fetch; nothing here is cached or
/// de-duplicated across fetches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Opaque identifier; no numeric assumptions are made.
    pub id: String,
    pub title: String,
    pub handle: String,
    pub status: ProductStatus,
    pub vendor: String,
    pub product_type: String,
    pub tags: Vec<String>,
    pub variants: Vec<Variant>,
    pub images: Vec<Image>,
    pub options: Vec<ProductOption>,
    /// ISO-8601 timestamp, kept exactly as the backend sent it.
    pub created_at: String,
    /// ISO-8601 timestamp, kept exactly as the backend sent it.
    pub updated_at: String,
}

impl Product {
    /// Returns the first variant, which the listing uses as the headline price.
    #[must_use]
    pub fn first_variant(&self) -> Option<&Variant> {
        self.variants.first()
    }

    #[must_use]
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }
}

/// Publication status of a product.
///
/// The backend value is cast, never validated: anything other than
/// `active`, `archived` or `draft` is carried as [`ProductStatus::Other`] and
/// serialized back unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductStatus {
    Active,
    Archived,
    Draft,
    Other(String),
}

impl ProductStatus {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
            Self::Draft => "draft",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for ProductStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "active" => Self::Active,
            "archived" => Self::Archived,
            "draft" => Self::Draft,
            _ => Self::Other(raw),
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ProductStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProductStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

/// A purchasable configuration of a product (size, colour, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub id: String,
    pub title: String,
    /// Price as a decimal string, exactly as the backend returns it, e.g. `"19.99"`.
    pub price: String,
    /// Comparison price as a decimal string, `None` when the backend sent null.
    pub compare_at_price: Option<String>,
    pub sku: String,
    pub inventory_quantity: i64,
    pub weight: f64,
    pub weight_unit: String,
    pub selected_options: Vec<SelectedOption>,
}

impl Variant {
    /// `true` when a compare-at price is set and differs from the price.
    #[must_use]
    pub fn is_discounted(&self) -> bool {
        self.compare_at_price
            .as_deref()
            .is_some_and(|compare| !compare.is_empty() && compare != self.price)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOption {
    pub id: String,
    pub name: String,
    pub position: i32,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub id: String,
    pub src: String,
    pub alt: String,
    pub position: i32,
}

#[cfg(test)]
#[path = "product_test.rs"]
mod tests;
