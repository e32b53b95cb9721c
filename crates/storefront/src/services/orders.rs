//! In-memory order book.
//!
//! Orders are kept for the lifetime of the process. The book also tracks
//! which users have a checkout in flight so a second submission can be
//! refused while the first is still being processed.

use std::collections::HashSet;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Mutex, PoisonError, RwLock};

use chrono::Utc;

use naturindo_core::{OrderId, OrderStatus, PaymentMethod, Price, UserId};

use crate::models::{CartItem, Order, ShippingDetails, User};

/// Placed orders plus the set of users currently checking out.
#[derive(Debug)]
pub struct OrderBook {
    orders: RwLock<Vec<Order>>,
    next_id: AtomicI32,
    in_flight: Mutex<HashSet<UserId>>,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBook {
    #[must_use]
    pub fn new() -> Self {
        Self {
            orders: RwLock::new(Vec::new()),
            next_id: AtomicI32::new(1),
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Mark `user_id` as checking out.
    ///
    /// Returns `None` if that user already has a checkout in flight. The
    /// mark is released when the returned guard is dropped.
    #[must_use]
    pub fn begin_checkout(&self, user_id: UserId) -> Option<CheckoutGuard<'_>> {
        let inserted = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user_id);
        inserted.then_some(CheckoutGuard {
            book: self,
            user_id,
        })
    }

    /// Whether `user_id` has a checkout in flight.
    #[must_use]
    pub fn is_checking_out(&self, user_id: UserId) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&user_id)
    }

    /// Record a new pending order and return it.
    pub fn place(
        &self,
        user: User,
        items: Vec<CartItem>,
        payment_method: PaymentMethod,
        shipping: ShippingDetails,
    ) -> Order {
        let total: Price = items.iter().map(CartItem::line_total).sum();
        let order = Order {
            id: OrderId::new(self.next_id.fetch_add(1, Ordering::Relaxed)),
            items,
            total,
            status: OrderStatus::Pending,
            payment_method,
            shipping,
            created_at: Utc::now(),
            user,
        };

        self.orders
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(order.clone());

        tracing::info!(
            order_id = %order.id,
            user_id = %order.user.id,
            total = %order.total,
            "order placed"
        );
        order
    }

    #[must_use]
    pub fn get(&self, id: OrderId) -> Option<Order> {
        self.orders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|order| order.id == id)
            .cloned()
    }

    /// Orders placed by `user_id`, newest first.
    #[must_use]
    pub fn orders_for(&self, user_id: UserId) -> Vec<Order> {
        self.orders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .rev()
            .filter(|order| order.user.id == user_id)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.orders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Releases a user's in-flight checkout mark on drop.
#[derive(Debug)]
pub struct CheckoutGuard<'a> {
    book: &'a OrderBook,
    user_id: UserId,
}

impl Drop for CheckoutGuard<'_> {
    fn drop(&mut self) {
        self.book
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.user_id);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use naturindo_core::Email;

    use super::*;
    use crate::catalog::tests::{category, product};
    use crate::models::Cart;

    fn user(id: i32) -> User {
        User {
            id: UserId::new(id),
            name: format!("User {id}"),
            email: Email::parse(&format!("user{id}@naturindo.id")).unwrap(),
            phone: None,
            address: None,
        }
    }

    fn shipping() -> ShippingDetails {
        ShippingDetails {
            name: "Sari".to_string(),
            phone: "081234567890".to_string(),
            address: "Jl. Melati 1, Yogyakarta".to_string(),
            notes: None,
        }
    }

    fn items() -> Vec<CartItem> {
        let jamu = category(1, "jamu");
        let mut cart = Cart::new();
        cart.add_item(&product(1, "kunyit-asam", &jamu, 35_000), 2);
        cart.add_item(&product(2, "beras-kencur", &jamu, 30_000), 1);
        cart.items().to_vec()
    }

    #[test]
    fn test_place_records_pending_order() {
        let book = OrderBook::new();
        let order = book.place(user(1), items(), PaymentMethod::Qris, shipping());

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total, Price::from_rupiah(100_000));
        assert_eq!(order.total_items(), 3);
        assert_eq!(book.get(order.id), Some(order));
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_orders_for_user_newest_first() {
        let book = OrderBook::new();
        let first = book.place(user(1), items(), PaymentMethod::BankTransfer, shipping());
        book.place(user(2), items(), PaymentMethod::Ewallet, shipping());
        let third = book.place(user(1), items(), PaymentMethod::Qris, shipping());

        let ids: Vec<_> = book.orders_for(UserId::new(1)).iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![third.id, first.id]);
        assert!(book.orders_for(UserId::new(3)).is_empty());
    }

    #[test]
    fn test_get_unknown_order() {
        let book = OrderBook::new();
        assert!(book.get(OrderId::new(99)).is_none());
    }

    #[test]
    fn test_checkout_guard_blocks_second_submission() {
        let book = OrderBook::new();
        let id = UserId::new(1);

        let guard = book.begin_checkout(id).unwrap();
        assert!(book.is_checking_out(id));
        assert!(book.begin_checkout(id).is_none());
        // Other users are unaffected
        assert!(book.begin_checkout(UserId::new(2)).is_some());

        drop(guard);
        assert!(!book.is_checking_out(id));
        assert!(book.begin_checkout(id).is_some());
    }
}
