//! # checkout-client
//!
//! Client-side half of the sheet-checkout flow.
//!
//! This crate provides:
//! - `PricingRules` - cart total + delivery fee - discount, formatted for the charge request
//! - `CartStore` - reducer-style cart container
//! - `HttpSessionClient` - `POST /create` against the checkout server
//! - `PaymentSheet` / `CheckoutUi` - the native sheet and screen as collaborators
//! - `CheckoutOrchestrator` - the attempt state machine tying it all together
//!
//! ## Example
//!
//! ```rust,ignore
//! use checkout_client::{CheckoutOrchestrator, CheckoutSettings, HttpSessionClient};
//!
//! let settings = CheckoutSettings::discover()?;
//! let client = HttpSessionClient::try_new(&settings.server.base_url)?;
//! let checkout = CheckoutOrchestrator::new(client, native_sheet, screen).with_settings(&settings);
//!
//! // On "Order Now"
//! if let Some(outcome) = checkout.order_now(&cart_store).await {
//!     if outcome.is_success() {
//!         cart_store.dispatch(CartAction::Clear);
//!     }
//! }
//! ```

pub mod api;
pub mod orchestrator;
pub mod pricing;
pub mod settings;
pub mod sheet;
pub mod store;
pub mod ui;

pub use api::{HttpSessionClient, SessionClient};
pub use orchestrator::{CheckoutOrchestrator, CheckoutState};
pub use pricing::{PaymentSummary, PricingRules};
pub use settings::{CheckoutSettings, ServerSettings};
pub use sheet::{BillingDetails, MerchantDisplay, PaymentSheet, PaymentSheetParams, SheetError};
pub use store::{CartAction, CartStore};
pub use ui::{Alert, CheckoutUi};
