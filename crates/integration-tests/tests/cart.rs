//! Cart flows through the session cookie.

use axum::http::StatusCode;
use naturindo_integration_tests::TestClient;

const KUNYIT_ASAM: i32 = 1;
const MADU_HUTAN: i32 = 2;
const HABBATUSSAUDA: i32 = 9;

#[tokio::test]
async fn test_add_to_cart_merges_lines_and_updates_badge() {
    let mut client = TestClient::new();

    client.add_to_cart(KUNYIT_ASAM, 2).await.assert_redirect("/cart");
    client.add_to_cart(KUNYIT_ASAM, 1).await;
    client.add_to_cart(MADU_HUTAN, 1).await;

    let count = client.get("/cart/count").await;
    assert_eq!(count.status, StatusCode::OK);
    assert!(count.body.contains(">4<"));

    let cart = client.get("/cart").await;
    assert!(cart.body.contains("Madu Hutan Sumbawa ditambahkan ke keranjang"));
    assert!(cart.body.contains("Jamu Kunyit Asam"));
    // 3 x 35.000 + 120.000
    assert!(cart.body.contains("Rp 225.000"));
}

#[tokio::test]
async fn test_flash_is_shown_once() {
    let mut client = TestClient::new();
    client.add_to_cart(KUNYIT_ASAM, 1).await;

    let first = client.get("/cart").await;
    assert!(first.body.contains("ditambahkan ke keranjang"));

    let second = client.get("/cart").await;
    assert!(!second.body.contains("ditambahkan ke keranjang"));
}

#[tokio::test]
async fn test_carts_are_per_visitor() {
    let mut alice = TestClient::new();
    let mut bob = alice.fork();

    alice.add_to_cart(KUNYIT_ASAM, 2).await;

    let bobs_count = bob.get("/cart/count").await;
    assert!(!bobs_count.body.contains("badge"));
}

#[tokio::test]
async fn test_add_honours_local_redirect_only() {
    let mut client = TestClient::new();

    let back = client
        .post_form(
            "/cart/add",
            &[("product_id", "1"), ("redirect", "/products/jamu-kunyit-asam")],
        )
        .await;
    back.assert_redirect("/products/jamu-kunyit-asam");

    let offsite = client
        .post_form(
            "/cart/add",
            &[("product_id", "1"), ("redirect", "//evil.example/phish")],
        )
        .await;
    offsite.assert_redirect("/cart");
}

#[tokio::test]
async fn test_out_of_stock_product_is_refused() {
    let mut client = TestClient::new();

    client.add_to_cart(HABBATUSSAUDA, 1).await.assert_redirect("/cart");

    let cart = client.get("/cart").await;
    assert!(cart.body.contains("Habbatussauda Plus sedang habis"));
    assert!(!cart.body.contains("id=\"cart-count\""));
}

#[tokio::test]
async fn test_unknown_product_and_zero_quantity_are_rejected() {
    let mut client = TestClient::new();

    let unknown = client.add_to_cart(999, 1).await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let zero = client.add_to_cart(KUNYIT_ASAM, 0).await;
    assert_eq!(zero.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_quantity_and_remove_on_zero() {
    let mut client = TestClient::new();
    client.add_to_cart(KUNYIT_ASAM, 1).await;
    client.add_to_cart(MADU_HUTAN, 1).await;

    client
        .post_form("/cart/update", &[("product_id", "1"), ("quantity", "5")])
        .await
        .assert_redirect("/cart");
    assert!(client.get("/cart/count").await.body.contains(">6<"));

    client
        .post_form("/cart/update", &[("product_id", "1"), ("quantity", "0")])
        .await;
    let cart = client.get("/cart").await;
    assert!(!cart.body.contains("Jamu Kunyit Asam"));
    assert!(cart.body.contains("Madu Hutan Sumbawa"));
}

#[tokio::test]
async fn test_remove_and_clear() {
    let mut client = TestClient::new();
    client.add_to_cart(KUNYIT_ASAM, 1).await;
    client.add_to_cart(MADU_HUTAN, 1).await;

    client
        .post_form("/cart/remove", &[("product_id", "2")])
        .await
        .assert_redirect("/cart");
    let cart = client.get("/cart").await;
    assert!(cart.body.contains("Produk dihapus dari keranjang"));
    assert!(!cart.body.contains("Madu Hutan Sumbawa"));

    client.post_form("/cart/clear", &[]).await.assert_redirect("/cart");
    let cart = client.get("/cart").await;
    assert!(cart.body.contains("Keranjang dikosongkan"));
    assert!(!cart.body.contains("Jamu Kunyit Asam"));
}
