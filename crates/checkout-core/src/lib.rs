//! # checkout-core
//!
//! Core types and traits for the sheet-checkout payment flow.
//!
//! This crate provides:
//! - `PaymentProvider` trait for the hosted payment API
//! - `SessionProvisioner` for the server side of the handshake
//! - `Cart`, `CartItem` and the `CartContents` view
//! - `ChargeRequest`, `PaymentSession` and `CheckoutOutcome` for the handshake itself
//! - `Currency` for major/minor unit conversion
//! - `CheckoutError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use checkout_core::{ChargeRequest, Currency, SessionProvisioner};
//! use rust_decimal_macros::dec;
//!
//! let provisioner = SessionProvisioner::new(provider, Currency::USD);
//! let session = provisioner.provision(&ChargeRequest::new(dec!(24.50))?).await?;
//!
//! // Hand session.payment_intent_secret etc. to the client
//! ```

pub mod cart;
pub mod error;
pub mod money;
pub mod provider;
pub mod provisioner;
pub mod session;

// Re-exports for convenience
pub use cart::{Cart, CartContents, CartItem};
pub use error::{CheckoutError, CheckoutResult, MISSING_FIELDS};
pub use money::Currency;
pub use provider::{
    BoxedPaymentProvider, Customer, CustomerSession, FeatureState, IntentRequest,
    MobilePaymentElement, PaymentIntent, PaymentProvider,
};
pub use provisioner::SessionProvisioner;
pub use session::{
    ChargeRequest, CheckoutOutcome, CreateSessionBody, PaymentSession, RawAmount,
};

pub use rust_decimal::Decimal;
