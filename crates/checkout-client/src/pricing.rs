//! # Pricing
//!
//! Turns cart contents into the payable amount sent with the charge request,
//! and into the payment summary lines shown above the "Order Now" button.

use checkout_core::{CartContents, Currency};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Fixed adjustments applied on top of the cart total
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingRules {
    pub currency: Currency,
    pub delivery_fee: Decimal,
    pub discount: Decimal,
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            currency: Currency::USD,
            delivery_fee: dec!(5.00),
            discount: dec!(0.50),
        }
    }
}

impl PricingRules {
    /// `total_price + delivery_fee - discount`, in major units
    pub fn payable_total<C: CartContents + ?Sized>(&self, cart: &C) -> Decimal {
        cart.total_price()
            .saturating_add(self.delivery_fee)
            .saturating_sub(self.discount)
    }

    /// The payable total formatted for the charge request (`"24.50"`)
    pub fn charge_amount<C: CartContents + ?Sized>(&self, cart: &C) -> String {
        self.currency.format_amount(self.payable_total(cart))
    }

    pub fn summary<C: CartContents + ?Sized>(&self, cart: &C) -> PaymentSummary {
        let currency = self.currency;
        PaymentSummary {
            items_label: format!("Total Items ({})", cart.total_items()),
            items_value: currency.display(cart.total_price()),
            delivery_fee: currency.display(self.delivery_fee),
            discount: format!("- {}", currency.display(self.discount)),
            total: currency.display(self.payable_total(cart)),
        }
    }
}

/// Display strings for the payment summary card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentSummary {
    pub items_label: String,
    pub items_value: String,
    pub delivery_fee: String,
    pub discount: String,
    pub total: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::{Cart, CartItem};

    fn cart_totalling_twenty() -> Cart {
        Cart::new()
            .with_item(CartItem::new("burger", "Classic Burger", dec!(7.50), 2))
            .with_item(CartItem::new("fries", "Fries", dec!(5.00), 1))
    }

    #[test]
    fn test_payable_total() {
        let rules = PricingRules::default();
        let cart = cart_totalling_twenty();

        assert_eq!(cart.total_price(), dec!(20.00));
        assert_eq!(rules.payable_total(&cart), dec!(24.50));
        assert_eq!(rules.charge_amount(&cart), "24.50");
    }

    #[test]
    fn test_charge_amount_always_two_decimals() {
        let rules = PricingRules::default();

        let cart = Cart::new().with_item(CartItem::new("a", "A", dec!(10), 1));
        assert_eq!(rules.charge_amount(&cart), "14.50");

        let cart = Cart::new().with_item(CartItem::new("b", "B", dec!(0.333), 3));
        assert_eq!(rules.charge_amount(&cart), "5.50");

        assert_eq!(rules.charge_amount(&Cart::new()), "4.50");
    }

    #[test]
    fn test_summary_lines() {
        let summary = PricingRules::default().summary(&cart_totalling_twenty());

        assert_eq!(summary.items_label, "Total Items (3)");
        assert_eq!(summary.items_value, "$20.00");
        assert_eq!(summary.delivery_fee, "$5.00");
        assert_eq!(summary.discount, "- $0.50");
        assert_eq!(summary.total, "$24.50");
    }
}
