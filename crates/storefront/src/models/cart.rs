//! The shopping cart.
//!
//! A cart is an ordered list of items, unique by product ID, each with a
//! quantity of at least one. Items keep a snapshot of the product fields the
//! cart needs (name, price, image), so the cart can be serialized into the
//! session on its own.
//!
//! Invariants maintained by every mutation:
//! - no two items share a product ID
//! - every stored quantity is `>= 1`; dropping to zero removes the item

use serde::{Deserialize, Serialize};

use naturindo_core::{Price, ProductId, Slug};

use crate::catalog::Product;

/// The product fields a cart line needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartProduct {
    pub id: ProductId,
    pub slug: Slug,
    pub name: String,
    pub price: Price,
    pub image: String,
}

impl From<&Product> for CartProduct {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            slug: product.slug.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
        }
    }
}

/// A product and how many of it are in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: CartProduct,
    pub quantity: u32,
}

impl CartItem {
    /// Price × quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// A visitor's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Items in the order they were first added.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.items.iter().any(|item| item.product.id == product_id)
    }

    #[must_use]
    pub fn quantity_of(&self, product_id: ProductId) -> Option<u32> {
        self.items
            .iter()
            .find(|item| item.product.id == product_id)
            .map(|item| item.quantity)
    }

    /// Add `quantity` of `product`.
    ///
    /// Merges into the existing line when the product is already present,
    /// otherwise appends a new line. A zero quantity is ignored.
    pub fn add_item(&mut self, product: &Product, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.items.iter_mut().find(|item| item.product.id == product.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(quantity),
            None => self.items.push(CartItem {
                product: CartProduct::from(product),
                quantity,
            }),
        }
    }

    /// Remove the line for `product_id`. Returns whether anything was removed.
    pub fn remove_item(&mut self, product_id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.product.id != product_id);
        self.items.len() != before
    }

    /// Set the quantity for `product_id` directly.
    ///
    /// Zero or negative quantities remove the line. Quantities above
    /// `u32::MAX` are clamped. Unknown products are a no-op.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) {
        let Ok(quantity) = u32::try_from(quantity.max(0)) else {
            self.set_quantity(product_id, u32::MAX);
            return;
        };
        if quantity == 0 {
            self.remove_item(product_id);
        } else {
            self.set_quantity(product_id, quantity);
        }
    }

    fn set_quantity(&mut self, product_id: ProductId, quantity: u32) {
        if let Some(item) = self.items.iter_mut().find(|item| item.product.id == product_id) {
            item.quantity = quantity;
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of price × quantity over all lines.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::catalog::tests::{category, product};

    fn products() -> Vec<Product> {
        let jamu = category(1, "jamu");
        vec![
            product(1, "kunyit-asam", &jamu, 35_000),
            product(2, "beras-kencur", &jamu, 30_000),
            product(3, "wedang-uwuh", &jamu, 50_000),
        ]
    }

    #[test]
    fn test_repeated_adds_merge() {
        let products = products();
        let mut cart = Cart::new();
        for quantity in [1, 2, 4] {
            cart.add_item(&products[0], quantity);
        }
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.quantity_of(products[0].id), Some(7));
    }

    #[test]
    fn test_add_preserves_first_insertion_order() {
        let products = products();
        let mut cart = Cart::new();
        cart.add_item(&products[1], 1);
        cart.add_item(&products[0], 1);
        cart.add_item(&products[1], 1);
        let ids: Vec<_> = cart.items().iter().map(|i| i.product.id.as_i32()).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_add_zero_is_ignored() {
        let products = products();
        let mut cart = Cart::new();
        cart.add_item(&products[0], 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_saturates() {
        let products = products();
        let mut cart = Cart::new();
        cart.add_item(&products[0], u32::MAX);
        cart.add_item(&products[0], 5);
        assert_eq!(cart.quantity_of(products[0].id), Some(u32::MAX));
    }

    #[test]
    fn test_remove_item() {
        let products = products();
        let mut cart = Cart::new();
        cart.add_item(&products[0], 1);
        assert!(cart.remove_item(products[0].id));
        assert!(!cart.remove_item(products[0].id));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_to_zero_or_negative_removes() {
        let products = products();
        for quantity in [0, -1, i64::MIN] {
            let mut cart = Cart::new();
            cart.add_item(&products[0], 3);
            cart.add_item(&products[1], 1);
            cart.update_quantity(products[0].id, quantity);
            assert!(!cart.contains(products[0].id), "quantity {quantity}");
            assert!(cart.contains(products[1].id));
        }
    }

    #[test]
    fn test_update_quantity_sets_directly() {
        let products = products();
        let mut cart = Cart::new();
        cart.add_item(&products[0], 3);
        cart.update_quantity(products[0].id, 1);
        assert_eq!(cart.quantity_of(products[0].id), Some(1));

        cart.update_quantity(products[0].id, i64::MAX);
        assert_eq!(cart.quantity_of(products[0].id), Some(u32::MAX));
    }

    #[test]
    fn test_update_unknown_product_is_noop() {
        let products = products();
        let mut cart = Cart::new();
        cart.add_item(&products[0], 1);
        cart.update_quantity(products[2].id, 5);
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_totals() {
        let products = products();
        let mut cart = Cart::new();
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price(), Price::ZERO);

        cart.add_item(&products[0], 2);
        cart.add_item(&products[1], 1);
        cart.add_item(&products[2], 3);
        assert_eq!(cart.total_items(), 6);
        assert_eq!(cart.total_price(), Price::from_rupiah(35_000 * 2 + 30_000 + 50_000 * 3));

        cart.update_quantity(products[2].id, 1);
        assert_eq!(cart.total_items(), 4);
        assert_eq!(cart.total_price(), Price::from_rupiah(150_000));
    }

    #[test]
    fn test_clear() {
        let products = products();
        let mut cart = Cart::new();
        cart.add_item(&products[0], 2);
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
    }

    #[test]
    fn test_session_roundtrip() {
        let products = products();
        let mut cart = Cart::new();
        cart.add_item(&products[0], 2);
        let json = serde_json::to_value(&cart).unwrap();
        let restored: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(restored, cart);
    }
}
