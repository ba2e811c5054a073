//! # Checkout UI
//!
//! Feedback surface of the cart screen: the loading indicator on the
//! "Order Now" button and blocking alerts.

use crate::orchestrator::CheckoutState;
use crate::sheet::CANCELED_CODE;
use checkout_core::CheckoutOutcome;

/// A blocking alert with a title and a body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    /// The alert shown when an attempt ends.
    ///
    /// A user cancel goes down the same error path as any other failure.
    pub fn for_outcome(outcome: &CheckoutOutcome) -> Self {
        match outcome {
            CheckoutOutcome::Success => Self::new("Success", "Your order is confirmed!"),
            CheckoutOutcome::UserCanceled { message } => {
                Self::new(format!("Error code: {}", CANCELED_CODE), message.clone())
            }
            CheckoutOutcome::Failed { code, message } => {
                Self::new(format!("Error code: {}", code), message.clone())
            }
        }
    }
}

pub trait CheckoutUi: Send + Sync {
    fn set_loading(&self, loading: bool);

    fn alert(&self, alert: Alert);

    /// Called on every state transition
    fn on_state_change(&self, _state: &CheckoutState) {}
}
