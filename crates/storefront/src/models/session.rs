//! Session-related types.

/// Session keys for visitor state.
pub mod keys {
    /// Key for the signed-in [`User`](crate::models::User).
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the visitor's [`Cart`](crate::models::Cart).
    pub const CART: &str = "cart";

    /// Key for the pending one-shot [`Flash`](crate::models::Flash).
    pub const FLASH: &str = "flash";

    /// Key for the ID of the last order placed in this session.
    pub const LAST_ORDER_ID: &str = "last_order_id";
}
