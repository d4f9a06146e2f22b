use super::*;

fn variant(price: &str, compare_at_price: Option<&str>) -> Variant {
    Variant {
        id: "v1".to_string(),
        title: "Default Title".to_string(),
        price: price.to_string(),
        compare_at_price: compare_at_price.map(str::to_string),
        sku: "SKU-1".to_string(),
        inventory_quantity: 3,
        weight: 0.0,
        weight_unit: "kg".to_string(),
        selected_options: Vec::new(),
    }
}

#[test]
fn status_known_values_round_trip() {
    for raw in ["active", "archived", "draft"] {
        let status = ProductStatus::from(raw.to_string());
        assert!(!matches!(status, ProductStatus::Other(_)), "{raw} should be known");
        assert_eq!(status.as_str(), raw);
    }
}

#[test]
fn status_unknown_value_passes_through() {
    let status: ProductStatus = serde_json::from_str("\"UNLISTED\"").unwrap();
    assert_eq!(status, ProductStatus::Other("UNLISTED".to_string()));
    assert_eq!(serde_json::to_string(&status).unwrap(), "\"UNLISTED\"");
}

#[test]
fn status_displays_raw_string() {
    assert_eq!(ProductStatus::Draft.to_string(), "draft");
}

#[test]
fn discounted_when_compare_at_differs() {
    assert!(variant("15.00", Some("20.00")).is_discounted());
}

#[test]
fn not_discounted_when_compare_at_equals_price() {
    assert!(!variant("19.99", Some("19.99")).is_discounted());
}

#[test]
fn not_discounted_without_compare_at() {
    assert!(!variant("19.99", None).is_discounted());
    assert!(!variant("19.99", Some("")).is_discounted());
}

#[test]
fn price_survives_json_unchanged() {
    let v = variant("0.10", Some("1234567890.99"));
    let json = serde_json::to_string(&v).unwrap();
    let back: Variant = serde_json::from_str(&json).unwrap();
    assert_eq!(back.price, "0.10");
    assert_eq!(back.compare_at_price.as_deref(), Some("1234567890.99"));
}
