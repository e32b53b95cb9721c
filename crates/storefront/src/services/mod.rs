//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Mock sign-in and registration against an in-memory account directory
//! - `cart` - Session-backed cart store
//! - `checkout` - Order placement from the current cart
//! - `orders` - In-memory order book
//! - `validation` - Per-field form error collection

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod orders;
pub mod validation;

pub use auth::{AccountDirectory, AuthError, AuthService, Registration};
pub use cart::CartStore;
pub use checkout::{CheckoutError, CheckoutForm, CheckoutService};
pub use orders::{CheckoutGuard, OrderBook};
pub use validation::FieldErrors;
