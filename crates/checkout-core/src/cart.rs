//! # Cart Types
//!
//! Line items and the read-only cart view the checkout flow consumes.
//! Mutation goes through the reducer in `checkout-client::store`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A line item in the cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product ID
    pub id: String,

    /// Product name (denormalized for display)
    pub name: String,

    /// Unit price in major currency units
    pub unit_price: Decimal,

    /// Quantity
    pub quantity: u32,
}

impl CartItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        unit_price: Decimal,
        quantity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    /// Calculate the total price for this line item, saturating at `Decimal::MAX`
    pub fn total(&self) -> Decimal {
        self.unit_price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// Read-only view of cart contents.
///
/// The orchestrator only ever reads through this trait, so tests can hand it
/// a constructed fixture instead of live store state.
pub trait CartContents {
    fn items(&self) -> &[CartItem];

    /// Sum of quantities over all items
    fn total_items(&self) -> u32 {
        self.items()
            .iter()
            .fold(0u32, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Sum of unit price × quantity over all items
    fn total_price(&self) -> Decimal {
        self.items()
            .iter()
            .fold(Decimal::ZERO, |acc, i| acc.saturating_add(i.total()))
    }

    fn is_empty(&self) -> bool {
        self.total_items() == 0
    }
}

/// An ordered collection of line items
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: append an item
    pub fn with_item(mut self, item: CartItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn get(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == id)
    }
}

impl CartContents for Cart {
    fn items(&self) -> &[CartItem] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_line_item_total() {
        let item = CartItem::new("burger", "Burger", dec!(10.00), 3);
        assert_eq!(item.total(), dec!(30.00));
    }

    #[test]
    fn test_cart_totals() {
        let cart = Cart::new()
            .with_item(CartItem::new("p1", "Product 1", dec!(10.00), 2))
            .with_item(CartItem::new("p2", "Product 2", dec!(2.50), 1));

        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), dec!(22.50));
        assert!(!cart.is_empty());
    }

    #[test]
    fn test_totals_saturate_on_extreme_values() {
        let cart = Cart::new()
            .with_item(CartItem::new("a", "A", Decimal::MAX, u32::MAX))
            .with_item(CartItem::new("b", "B", dec!(1.00), 1));

        assert_eq!(cart.total_items(), u32::MAX);
        assert_eq!(cart.items[0].total(), Decimal::MAX);
        assert_eq!(cart.total_price(), Decimal::MAX);
        assert!(!cart.is_empty());
    }

    #[test]
    fn test_empty_cart() {
        let cart = Cart::new();
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price(), Decimal::ZERO);
        assert!(cart.is_empty());
    }
}
