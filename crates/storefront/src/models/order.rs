//! Placed orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use naturindo_core::{OrderId, OrderStatus, PaymentMethod, Price};

use super::{CartItem, User};

/// Where an order ships to, as entered on the checkout form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingDetails {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub notes: Option<String>,
}

/// An order recorded by the checkout flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub items: Vec<CartItem>,
    pub total: Price,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub shipping: ShippingDetails,
    pub created_at: DateTime<Utc>,
    pub user: User,
}

impl Order {
    /// Customer-facing order number, e.g. `NI-20241201-00042`.
    #[must_use]
    pub fn number(&self) -> String {
        format!(
            "NI-{}-{:05}",
            self.created_at.format("%Y%m%d"),
            self.id.as_i32()
        )
    }

    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}
