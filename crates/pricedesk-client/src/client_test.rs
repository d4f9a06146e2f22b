use super::*;

fn test_client(base_url: &str) -> ServerApiClient {
    ServerApiClient::new(base_url, 30, "pricedesk-test/0.1").expect("client construction should not fail")
}

#[test]
fn endpoint_appends_beneath_path_prefix() {
    let client = test_client("http://localhost:3001/dev");
    let url = client.endpoint("api/shopify/collections").unwrap();
    assert_eq!(url.as_str(), "http://localhost:3001/dev/api/shopify/collections");
}

#[test]
fn endpoint_tolerates_trailing_slash() {
    let client = test_client("http://localhost:3001/dev/");
    let url = client.endpoint("api/csv/status").unwrap();
    assert_eq!(url.as_str(), "http://localhost:3001/dev/api/csv/status");
}

#[test]
fn endpoint_without_prefix() {
    let client = test_client("https://admin.example.com");
    let url = client.endpoint("api/shopify/products").unwrap();
    assert_eq!(url.as_str(), "https://admin.example.com/api/shopify/products");
}

#[test]
fn variant_url_encodes_global_id_as_one_segment() {
    let client = test_client("https://admin.example.com");
    let url = client
        .variant_url("gid://shopify/ProductVariant/42")
        .unwrap();
    assert_eq!(
        url.path(),
        "/api/shopify/variants/gid:%2F%2Fshopify%2FProductVariant%2F42"
    );
}

#[test]
fn new_rejects_non_http_scheme() {
    let result = ServerApiClient::new("ftp://example.com", 30, "ua");
    assert!(
        matches!(result, Err(ClientError::InvalidBaseUrl { .. })),
        "expected InvalidBaseUrl, got: {result:?}"
    );
}

#[test]
fn new_rejects_garbage() {
    let result = ServerApiClient::new("not a url", 30, "ua");
    assert!(matches!(result, Err(ClientError::InvalidBaseUrl { .. })));
}

#[test]
fn page_size_defaults_and_is_not_clamped() {
    let client = test_client("https://admin.example.com");
    assert_eq!(client.page_size(None), DEFAULT_PAGE_SIZE);
    assert_eq!(client.page_size(Some(10)), 10);
    assert_eq!(client.page_size(Some(1000)), 1000);
}

#[test]
fn page_size_uses_configured_default() {
    let client = test_client("https://admin.example.com").with_page_sizes(20, 250);
    assert_eq!(client.page_size(None), 20);
}

#[test]
fn remote_error_message_includes_status() {
    let err = ClientError::Remote {
        status: 404,
        status_text: "Not Found".to_string(),
        url: "https://admin.example.com/api/shopify/products".to_string(),
    };
    assert_eq!(err.to_string(), "API call failed: 404 Not Found");
    assert_eq!(err.status(), Some(404));
}
