//! Domain models for storefront.
//!
//! These are the session-scoped types: the cart, the signed-in user, placed
//! orders, and one-shot notifications. Catalog reference data lives in
//! [`crate::catalog`].

pub mod cart;
pub mod flash;
pub mod order;
pub mod session;
pub mod user;

pub use cart::{Cart, CartItem, CartProduct};
pub use flash::{Flash, FlashKind};
pub use order::{Order, ShippingDetails};
pub use session::keys as session_keys;
pub use user::User;
