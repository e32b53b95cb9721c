//! Checkout service.
//!
//! Turns the visitor's cart plus the shipping form into a recorded
//! [`Order`]. Validation happens up front; the simulated payment processing
//! delay runs while the user's in-flight mark is held.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;

use naturindo_core::{PaymentMethod, PaymentMethodError};

use crate::models::{Cart, Order, ShippingDetails, User};
use crate::services::orders::OrderBook;
use crate::services::validation::FieldErrors;

/// Message shown when a required shipping field is blank.
pub const INCOMPLETE_SHIPPING: &str = "Mohon lengkapi semua data pengiriman";

/// Errors that can occur while placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// One or more shipping fields are missing.
    #[error("invalid input: {0}")]
    Validation(FieldErrors),

    /// Nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// The same user already has a checkout being processed.
    #[error("checkout already in progress")]
    InProgress,

    #[error(transparent)]
    InvalidPaymentMethod(#[from] PaymentMethodError),
}

impl From<FieldErrors> for CheckoutError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

/// Shipping form as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default = "default_payment_method")]
    pub payment_method: String,
}

fn default_payment_method() -> String {
    PaymentMethod::default().as_str().to_owned()
}

impl CheckoutForm {
    /// Form prefilled for `user`.
    #[must_use]
    pub fn for_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            phone: user.phone.clone().unwrap_or_default(),
            address: user.address.clone().unwrap_or_default(),
            notes: String::new(),
            payment_method: default_payment_method(),
        }
    }

    /// Check required fields and parse the payment method.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::Validation` when name, phone or address is
    /// blank, and `CheckoutError::InvalidPaymentMethod` for an unknown method.
    pub fn validate(&self) -> Result<(ShippingDetails, PaymentMethod), CheckoutError> {
        let mut errors = FieldErrors::new();
        for (field, value) in [
            ("name", &self.name),
            ("phone", &self.phone),
            ("address", &self.address),
        ] {
            if value.trim().is_empty() {
                errors.add(field, INCOMPLETE_SHIPPING);
            }
        }
        errors.into_result()?;

        let payment_method = self.payment_method.trim().parse::<PaymentMethod>()?;
        let notes = self.notes.trim();

        Ok((
            ShippingDetails {
                name: self.name.trim().to_owned(),
                phone: self.phone.trim().to_owned(),
                address: self.address.trim().to_owned(),
                notes: (!notes.is_empty()).then(|| notes.to_owned()),
            },
            payment_method,
        ))
    }
}

/// Checkout service.
///
/// Borrowed from [`AppState`](crate::state::AppState) per request.
pub struct CheckoutService<'a> {
    orders: &'a OrderBook,
    latency: Duration,
}

impl<'a> CheckoutService<'a> {
    #[must_use]
    pub const fn new(orders: &'a OrderBook, latency: Duration) -> Self {
        Self { orders, latency }
    }

    /// Place an order for `user` from the contents of `cart`.
    ///
    /// The cart itself is left untouched; callers clear it once the order
    /// is recorded.
    ///
    /// # Errors
    ///
    /// Returns `EmptyCart`, `Validation` or `InvalidPaymentMethod` before any
    /// delay, and `InProgress` if the user is already checking out.
    #[instrument(skip(self, user, cart, form), fields(user_id = %user.id, items = cart.total_items()))]
    pub async fn place_order(
        &self,
        user: &User,
        cart: &Cart,
        form: &CheckoutForm,
    ) -> Result<Order, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let (shipping, payment_method) = form.validate()?;

        let _guard = self
            .orders
            .begin_checkout(user.id)
            .ok_or(CheckoutError::InProgress)?;

        tokio::time::sleep(self.latency).await;

        Ok(self.orders.place(
            user.clone(),
            cart.items().to_vec(),
            payment_method,
            shipping,
        ))
    }
}
