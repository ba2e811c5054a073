//! # Cart Store
//!
//! Reducer-style cart container. Screens own a `CartStore` and pass it
//! (or any other `CartContents`) into the orchestrator explicitly.

use checkout_core::{Cart, CartContents, CartItem};
use tracing::debug;

/// Mutations accepted by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Add an item; an existing id has its quantity increased instead
    Add(CartItem),
    /// Remove one unit of an item, dropping it when it reaches zero
    Remove { id: String },
    /// Set an exact quantity; zero removes the item
    SetQuantity { id: String, quantity: u32 },
    Clear,
}

/// Pure reducer: previous cart + action → next cart
pub fn reduce(mut cart: Cart, action: CartAction) -> Cart {
    match action {
        CartAction::Add(item) => {
            match cart.items.iter_mut().find(|i| i.id == item.id) {
                Some(existing) => existing.quantity = existing.quantity.saturating_add(item.quantity),
                None => cart.items.push(item),
            }
        }
        CartAction::Remove { id } => {
            if let Some(existing) = cart.items.iter_mut().find(|i| i.id == id) {
                existing.quantity = existing.quantity.saturating_sub(1);
            }
            cart.items.retain(|i| i.quantity > 0);
        }
        CartAction::SetQuantity { id, quantity } => {
            if let Some(existing) = cart.items.iter_mut().find(|i| i.id == id) {
                existing.quantity = quantity;
            }
            cart.items.retain(|i| i.quantity > 0);
        }
        CartAction::Clear => cart.items.clear(),
    }
    cart
}

/// Owned cart state mutated only through `dispatch`
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    state: Cart,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing cart (fixtures, restored state)
    pub fn with_cart(cart: Cart) -> Self {
        Self { state: cart }
    }

    pub fn dispatch(&mut self, action: CartAction) {
        debug!("cart action: {:?}", action);
        let current = std::mem::take(&mut self.state);
        self.state = reduce(current, action);
    }

    pub fn state(&self) -> &Cart {
        &self.state
    }
}

impl CartContents for CartStore {
    fn items(&self) -> &[CartItem] {
        &self.state.items
    }
}
