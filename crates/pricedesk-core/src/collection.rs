use serde::{Deserialize, Serialize};

/// A merchant-curated grouping of products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Opaque identifier, e.g. `"gid://shopify/Collection/4123"`.
    pub id: String,
    pub title: String,
    /// Always synthesized client-side as `"Collection: {title}"`.
    pub description: String,
    /// URL slug, e.g. `"summer-sale"`.
    pub handle: String,
    /// The backend does not report a count; adapted collections carry `0`.
    pub products_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<CollectionImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionImage {
    pub src: String,
    pub alt: String,
}

impl Collection {
    /// Returns `true` if `needle` (already lowercased) occurs in the title or
    /// the handle, ignoring case.
    #[must_use]
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.handle.to_lowercase().contains(needle)
    }
}
