//! Checkout: sign-in gate, validation and order placement.

use axum::http::StatusCode;
use naturindo_core::Price;
use naturindo_integration_tests::TestClient;

const KUNYIT_ASAM: i32 = 1;

const SHIPPING: &[(&str, &str)] = &[
    ("name", "Sari Dewi"),
    ("phone", "081234567890"),
    ("address", "Jl. Malioboro No. 1, Yogyakarta"),
    ("notes", "Titip di satpam"),
    ("payment_method", "qris"),
];

async fn signed_in_with_cart() -> TestClient {
    let mut client = TestClient::new();
    client.register("Sari Dewi", "sari@naturindo.id").await;
    client.add_to_cart(KUNYIT_ASAM, 2).await;
    client
}

#[tokio::test]
async fn test_checkout_requires_sign_in() {
    let mut client = TestClient::new();
    client.add_to_cart(KUNYIT_ASAM, 1).await;

    client.get("/checkout").await.assert_redirect("/auth");
    client
        .post_form("/checkout", SHIPPING)
        .await
        .assert_redirect("/auth");
}

#[tokio::test]
async fn test_checkout_with_empty_cart_goes_back_to_cart() {
    let mut client = TestClient::new();
    client.register("Sari Dewi", "sari@naturindo.id").await;

    client.get("/checkout").await.assert_redirect("/cart");
    client
        .post_form("/checkout", SHIPPING)
        .await
        .assert_redirect("/cart");
}

#[tokio::test]
async fn test_checkout_form_is_prefilled_and_summarises_cart() {
    let mut client = signed_in_with_cart().await;

    let response = client.get("/checkout").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("value=\"Sari Dewi\""));
    assert!(response.body.contains("Transfer Bank"));
    assert!(response.body.contains(&Price::from_rupiah(70_000).to_string()));
}

#[tokio::test]
async fn test_missing_shipping_fields_are_rejected() {
    let mut client = signed_in_with_cart().await;

    let response = client
        .post_form(
            "/checkout",
            &[("name", "Sari Dewi"), ("phone", ""), ("address", "  ")],
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body.contains("Mohon lengkapi semua data pengiriman"));

    // Cart is kept for another attempt.
    assert!(client.get("/cart/count").await.body.contains(">2<"));
}

#[tokio::test]
async fn test_unknown_payment_method_is_rejected() {
    let mut client = signed_in_with_cart().await;

    let response = client
        .post_form(
            "/checkout",
            &[
                ("name", "Sari Dewi"),
                ("phone", "081234567890"),
                ("address", "Jl. Malioboro No. 1"),
                ("payment_method", "cod"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body.contains("Pilih metode pembayaran yang tersedia"));
}

#[tokio::test]
async fn test_successful_checkout_places_order_and_empties_cart() {
    let mut client = signed_in_with_cart().await;

    client
        .post_form("/checkout", SHIPPING)
        .await
        .assert_redirect("/order-success");

    let success = client.get("/order-success").await;
    assert_eq!(success.status, StatusCode::OK);
    assert!(success.body.contains("Pesanan berhasil dibuat!"));
    assert!(success.body.contains("NI-"));
    assert!(success.body.contains("Menunggu Pembayaran"));
    assert!(success.body.contains("QRIS"));
    assert!(success.body.contains("Rp 70.000"));
    assert!(success.body.contains("Jl. Malioboro No. 1, Yogyakarta"));

    let count = client.get("/cart/count").await;
    assert!(!count.body.contains("badge"));
}

#[tokio::test]
async fn test_order_success_without_order_shows_generic_message() {
    let mut client = TestClient::new();

    let response = client.get("/order-success").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Pesanan Anda sedang kami proses."));
}
