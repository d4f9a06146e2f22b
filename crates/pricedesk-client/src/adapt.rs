//! Conversion from backend wire types to the [`pricedesk_core`] domain model.
//!
//! Every function here is total: missing optional fields degrade to empty
//! vectors, empty strings or zero. Shape mismatches are caught earlier, when
//! the response body is decoded into [`crate::types`].

use pricedesk_core::{
    Collection, CollectionImage, Image, Product, ProductOption, ProductStatus, SelectedOption,
    Variant,
};

use crate::types::{
    WireCollection, WireImage, WireOption, WireProduct, WireSelectedOption, WireUpdatedVariant,
    WireVariant,
};

/// Weight unit reported for variants returned by the price-update endpoint,
/// which does not echo weights back.
pub const UPDATED_VARIANT_WEIGHT_UNIT: &str = "kg";

/// Adapts a [`WireCollection`] into a [`Collection`].
///
/// The description is always `"Collection: {title}"`, even if the backend
/// sent one, and `products_count` is always `0` since the backend does not
/// report it.
#[must_use]
pub fn adapt_collection(wire: WireCollection) -> Collection {
    Collection {
        description: format!("Collection: {}", wire.title),
        id: wire.id,
        title: wire.title,
        handle: wire.handle,
        products_count: 0,
        image: wire.image.map(|image| CollectionImage {
            src: image.src,
            alt: image.alt.unwrap_or_default(),
        }),
    }
}

/// Adapts a [`WireProduct`] into a [`Product`].
#[must_use]
pub fn adapt_product(wire: WireProduct) -> Product {
    Product {
        id: wire.id,
        title: wire.title,
        handle: wire.handle,
        status: ProductStatus::from(wire.status.unwrap_or_default()),
        vendor: wire.vendor.unwrap_or_default(),
        product_type: wire.product_type.unwrap_or_default(),
        tags: wire.tags.unwrap_or_default(),
        variants: wire
            .variants
            .unwrap_or_default()
            .into_iter()
            .map(adapt_variant)
            .collect(),
        images: wire
            .images
            .unwrap_or_default()
            .into_iter()
            .map(adapt_image)
            .collect(),
        options: wire
            .options
            .unwrap_or_default()
            .into_iter()
            .map(adapt_option)
            .collect(),
        created_at: wire.created_at.unwrap_or_default(),
        updated_at: wire.updated_at.unwrap_or_default(),
    }
}

/// Adapts a [`WireVariant`] from a product listing into a [`Variant`].
#[must_use]
pub fn adapt_variant(wire: WireVariant) -> Variant {
    Variant {
        id: wire.id,
        title: wire.title.unwrap_or_default(),
        price: wire.price,
        compare_at_price: wire.compare_at_price,
        sku: wire.sku.unwrap_or_default(),
        inventory_quantity: wire.inventory_quantity.unwrap_or_default(),
        weight: wire.weight.unwrap_or_default(),
        weight_unit: wire.weight_unit.unwrap_or_default(),
        selected_options: adapt_selected_options(wire.selected_options),
    }
}

/// Adapts the variant echoed back by a price update.
///
/// The endpoint returns neither weights nor a compare-at price, so the
/// compare-at price is set to the new price and the weight to `0 kg`.
#[must_use]
pub fn adapt_updated_variant(wire: WireUpdatedVariant) -> Variant {
    Variant {
        id: wire.id,
        title: wire.title.unwrap_or_default(),
        compare_at_price: Some(wire.price.clone()),
        price: wire.price,
        sku: wire.sku.unwrap_or_default(),
        inventory_quantity: wire.inventory_quantity.unwrap_or_default(),
        weight: 0.0,
        weight_unit: UPDATED_VARIANT_WEIGHT_UNIT.to_string(),
        selected_options: adapt_selected_options(wire.selected_options),
    }
}

fn adapt_selected_options(wire: Option<Vec<WireSelectedOption>>) -> Vec<SelectedOption> {
    wire.unwrap_or_default()
        .into_iter()
        .map(|option| SelectedOption {
            name: option.name,
            value: option.value,
        })
        .collect()
}

fn adapt_image(wire: WireImage) -> Image {
    Image {
        id: wire.id.unwrap_or_default(),
        src: wire.src,
        alt: wire.alt.unwrap_or_default(),
        position: wire.position.unwrap_or_default(),
    }
}

fn adapt_option(wire: WireOption) -> ProductOption {
    ProductOption {
        id: wire.id.unwrap_or_default(),
        name: wire.name,
        position: wire.position.unwrap_or_default(),
        values: wire.values.unwrap_or_default(),
    }
}

#[cfg(test)]
#[path = "adapt_test.rs"]
mod tests;
