//! Catalog browsing: listing, filters, sorting and product pages.

use axum::http::StatusCode;
use naturindo_integration_tests::TestClient;

fn position(body: &str, needle: &str) -> usize {
    body.find(needle)
        .unwrap_or_else(|| panic!("{needle} not found in page"))
}

#[tokio::test]
async fn test_health_endpoints() {
    let mut client = TestClient::new();

    let live = client.get("/health").await;
    assert_eq!(live.status, StatusCode::OK);
    assert_eq!(live.body, "ok");

    let ready = client.get("/health/ready").await;
    assert_eq!(ready.status, StatusCode::OK);
}

#[tokio::test]
async fn test_home_page_lists_categories_and_featured_products() {
    let mut client = TestClient::new();
    let response = client.get("/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Jamu Tradisional"));
    assert!(response.body.contains("/products?category=teh-herbal"));
    assert!(response.headers.contains_key("x-request-id"));
    assert!(response.headers.contains_key("content-security-policy"));
}

#[tokio::test]
async fn test_listing_filters_by_category() {
    let mut client = TestClient::new();
    let response = client.get("/products?category=teh-herbal").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Teh Rosella Merah"));
    assert!(response.body.contains("Teh Jahe Serai"));
    assert!(!response.body.contains("Madu Hutan Sumbawa"));
}

#[tokio::test]
async fn test_listing_accepts_repeated_categories() {
    let mut client = TestClient::new();
    let response = client
        .get("/products?category=teh-herbal&category=kapsul-herbal")
        .await;

    assert!(response.body.contains("Teh Rosella Merah"));
    assert!(response.body.contains("Kapsul Temulawak"));
    assert!(!response.body.contains("Jamu Beras Kencur"));
}

#[tokio::test]
async fn test_listing_searches_name_and_description() {
    let mut client = TestClient::new();
    let response = client.get("/products?q=MADU").await;

    assert!(response.body.contains("Madu Hutan Sumbawa"));
    assert!(response.body.contains("Madu Klanceng"));
    assert!(!response.body.contains("Kapsul Temulawak"));
}

#[tokio::test]
async fn test_listing_filters_by_price_and_sorts_ascending() {
    let mut client = TestClient::new();
    let response = client
        .get("/products?min=30000&max=45000&sort=price-low")
        .await;

    assert!(!response.body.contains("Madu Hutan Sumbawa"));
    let beras_kencur = position(&response.body, "Jamu Beras Kencur");
    let kunyit_asam = position(&response.body, "Jamu Kunyit Asam");
    let rosella = position(&response.body, "Teh Rosella Merah");
    assert!(beras_kencur < kunyit_asam);
    assert!(kunyit_asam < rosella);
}

#[tokio::test]
async fn test_listing_with_no_matches_shows_empty_state() {
    let mut client = TestClient::new();
    let response = client.get("/products?q=kopi+luwak").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Menampilkan 0 produk"));
    assert!(response.body.contains("Tidak ada produk yang cocok"));
}

#[tokio::test]
async fn test_product_page_shows_details_and_reviews() {
    let mut client = TestClient::new();
    let response = client.get("/products/jamu-kunyit-asam").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Jamu Kunyit Asam"));
    assert!(response.body.contains("Rp 35.000"));
    assert!(response.body.contains("Komposisi"));
    assert!(response.body.contains("Produk Terkait"));
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let mut client = TestClient::new();
    let response = client.get("/products/kopi-luwak").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.contains("Produk tidak ditemukan"));
    assert!(response.body.contains("href=\"/products\""));
}

#[tokio::test]
async fn test_categories_page() {
    let mut client = TestClient::new();
    let response = client.get("/categories").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Kapsul Herbal"));
}
