//! Mock sign-in: registration, login, logout and form validation.

use axum::http::StatusCode;
use naturindo_integration_tests::{TEST_PASSWORD, TestClient};

#[tokio::test]
async fn test_register_signs_in_and_greets_user() {
    let mut client = TestClient::new();

    client
        .register("Sari Dewi", "sari@naturindo.id")
        .await
        .assert_redirect("/");

    let home = client.get("/").await;
    assert!(home.body.contains("Registrasi berhasil! Selamat bergabung."));
    assert!(home.body.contains("Sari Dewi"));
    assert!(home.body.contains("action=\"/auth/logout\""));
}

#[tokio::test]
async fn test_signed_in_user_is_redirected_away_from_auth_page() {
    let mut client = TestClient::new();
    client.register("Sari Dewi", "sari@naturindo.id").await;

    client.get("/auth").await.assert_redirect("/");
}

#[tokio::test]
async fn test_logout_then_login_again() {
    let mut client = TestClient::new();
    client.register("Budi Santoso", "budi@naturindo.id").await;

    client.post_form("/auth/logout", &[]).await.assert_redirect("/");
    let home = client.get("/").await;
    assert!(home.body.contains("Anda telah logout"));
    assert!(!home.body.contains("Budi Santoso"));

    client
        .post_form(
            "/auth/login",
            &[("email", " budi@NaturIndo.ID "), ("password", TEST_PASSWORD)],
        )
        .await
        .assert_redirect("/");
    let home = client.get("/").await;
    assert!(home.body.contains("Login berhasil! Selamat datang."));
    assert!(home.body.contains("Budi Santoso"));
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let mut client = TestClient::new();
    client.register("Budi Santoso", "budi@naturindo.id").await;
    client.post_form("/auth/logout", &[]).await;

    let response = client
        .post_form(
            "/auth/login",
            &[("email", "budi@naturindo.id"), ("password", "salah123")],
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.body.contains("Email atau password salah"));
    assert!(response.body.contains("value=\"budi@naturindo.id\""));
}

#[tokio::test]
async fn test_login_unknown_account_is_unauthorized() {
    let mut client = TestClient::new();

    let response = client
        .post_form(
            "/auth/login",
            &[("email", "nobody@naturindo.id"), ("password", TEST_PASSWORD)],
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_validation_errors() {
    let mut client = TestClient::new();

    let response = client
        .post_form("/auth/login", &[("email", "bukan-email"), ("password", "123")])
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body.contains("Email tidak valid"));
    assert!(response.body.contains("Password minimal 6 karakter"));
}

#[tokio::test]
async fn test_register_validation_errors_keep_register_tab() {
    let mut client = TestClient::new();

    let response = client
        .post_form(
            "/auth/register",
            &[
                ("name", "S"),
                ("email", "sari@naturindo.id"),
                ("password", "rahasia123"),
                ("password_confirm", "rahasia456"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body.contains("Nama minimal 2 karakter"));
    assert!(response.body.contains("Password tidak cocok"));
    assert!(response.body.contains("action=\"/auth/register\""));
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let mut first = TestClient::new();
    first.register("Sari Dewi", "sari@naturindo.id").await;

    let mut second = first.fork();
    let response = second.register("Sari Lain", "sari@NATURINDO.id").await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert!(response.body.contains("Email sudah terdaftar"));
}
