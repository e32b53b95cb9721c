//! End-to-end tests for the NaturIndo storefront.
//!
//! Tests drive the full router (sessions, middleware and templates) in
//! process through [`TestClient`]. Mock latency is disabled so sign-in and
//! checkout complete immediately.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p naturindo-integration-tests
//! ```

#![allow(clippy::missing_panics_doc)]

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use tower::ServiceExt;

use naturindo_storefront::catalog::Catalog;
use naturindo_storefront::config::StorefrontConfig;
use naturindo_storefront::middleware::SESSION_COOKIE_NAME;
use naturindo_storefront::routes;
use naturindo_storefront::state::AppState;

/// Password used by [`TestClient::register`].
pub const TEST_PASSWORD: &str = "rahasia123";

/// A collected response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    /// Assert this is a redirect to `path`.
    #[track_caller]
    pub fn assert_redirect(&self, path: &str) {
        assert!(
            self.status.is_redirection(),
            "expected redirect to {path}, got {}",
            self.status
        );
        assert_eq!(self.location(), Some(path));
    }
}

/// In-process client that carries the session cookie between requests,
/// like a browser would.
pub struct TestClient {
    app: Router,
    cookie: Option<String>,
}

impl TestClient {
    /// A fresh storefront with the seeded catalog and no latency.
    #[must_use]
    pub fn new() -> Self {
        let config = StorefrontConfig::from_lookup(|key| match key {
            "STOREFRONT_AUTH_DELAY_MS" | "STOREFRONT_CHECKOUT_DELAY_MS" => Some("0".to_owned()),
            "STOREFRONT_STATIC_DIR" => {
                Some(concat!(env!("CARGO_MANIFEST_DIR"), "/../storefront/static").to_owned())
            }
            _ => None,
        })
        .expect("test config");
        let catalog = Catalog::seed().expect("seed catalog");

        Self {
            app: routes::app(AppState::new(config, catalog)),
            cookie: None,
        }
    }

    /// A second visitor on the same storefront, without this one's cookie.
    #[must_use]
    pub fn fork(&self) -> Self {
        Self {
            app: self.app.clone(),
            cookie: None,
        }
    }

    pub async fn get(&mut self, path: &str) -> TestResponse {
        self.send(Method::GET, path, Body::empty(), None).await
    }

    pub async fn post_form(&mut self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        self.send(
            Method::POST,
            path,
            Body::from(body),
            Some("application/x-www-form-urlencoded"),
        )
        .await
    }

    /// Register a new account (which also signs in).
    pub async fn register(&mut self, name: &str, email: &str) -> TestResponse {
        self.post_form(
            "/auth/register",
            &[
                ("name", name),
                ("email", email),
                ("password", TEST_PASSWORD),
                ("password_confirm", TEST_PASSWORD),
            ],
        )
        .await
    }

    /// Add `quantity` of product `product_id` to the cart.
    pub async fn add_to_cart(&mut self, product_id: i32, quantity: u32) -> TestResponse {
        let product_id = product_id.to_string();
        let quantity = quantity.to_string();
        self.post_form(
            "/cart/add",
            &[
                ("product_id", product_id.as_str()),
                ("quantity", quantity.as_str()),
            ],
        )
        .await
    }

    async fn send(
        &mut self,
        method: Method,
        path: &str,
        body: Body,
        content_type: Option<&str>,
    ) -> TestResponse {
        let mut request = Request::builder().method(method).uri(path);
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }
        if let Some(cookie) = &self.cookie {
            request = request.header(header::COOKIE, cookie);
        }
        let request = request.body(body).expect("valid request");

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("infallible router");

        let (parts, body) = response.into_parts();
        self.remember_cookie(&parts.headers);

        let bytes = axum::body::to_bytes(body, usize::MAX)
            .await
            .expect("read body");

        TestResponse {
            status: parts.status,
            headers: parts.headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    fn remember_cookie(&mut self, headers: &HeaderMap) {
        let prefix = format!("{SESSION_COOKIE_NAME}=");
        for value in headers.get_all(header::SET_COOKIE) {
            let Ok(value) = value.to_str() else { continue };
            let Some(pair) = value.split(';').next() else {
                continue;
            };
            if let Some(id) = pair.strip_prefix(&prefix) {
                self.cookie = (!id.is_empty()).then(|| pair.to_owned());
            }
        }
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}
