//! # Payment Sheet
//!
//! The native payment UI as a collaborator. Card entry, wallets and 3-D
//! Secure all happen inside the sheet; the orchestrator only sees `init`
//! and `present` and whatever error they report.

use async_trait::async_trait;
use checkout_core::{CheckoutError, CheckoutOutcome, PaymentSession};
use serde::{Deserialize, Serialize};

/// Error code the native sheet uses when the user dismisses it
pub const CANCELED_CODE: &str = "Canceled";

/// Static merchant metadata shown in the sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MerchantDisplay {
    pub display_name: String,
    pub default_billing_name: String,
    /// Accept methods that settle after a delay (SEPA Debit, Sofort)
    pub allows_delayed_payment_methods: bool,
}

impl Default for MerchantDisplay {
    fn default() -> Self {
        Self {
            display_name: "Example, Inc.".to_string(),
            default_billing_name: "Jane Doe".to_string(),
            allows_delayed_payment_methods: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillingDetails {
    pub name: String,
}

/// Arguments for the native sheet initializer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSheetParams {
    pub merchant_display_name: String,
    pub customer_id: String,
    pub customer_ephemeral_key_secret: String,
    pub payment_intent_client_secret: String,
    pub allows_delayed_payment_methods: bool,
    pub default_billing_details: BillingDetails,
}

impl PaymentSheetParams {
    /// Combine merchant metadata with the secrets of one session
    pub fn new(merchant: &MerchantDisplay, session: &PaymentSession) -> Self {
        Self {
            merchant_display_name: merchant.display_name.clone(),
            customer_id: session.customer_id.clone(),
            customer_ephemeral_key_secret: session.session_secret.clone(),
            payment_intent_client_secret: session.payment_intent_secret.clone(),
            allows_delayed_payment_methods: merchant.allows_delayed_payment_methods,
            default_billing_details: BillingDetails {
                name: merchant.default_billing_name.clone(),
            },
        }
    }
}

/// Error reported by the native sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetError {
    pub code: String,
    pub message: String,
}

impl SheetError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn canceled() -> Self {
        Self::new(CANCELED_CODE, "The payment flow has been canceled")
    }

    pub fn is_canceled(&self) -> bool {
        self.code == CANCELED_CODE
    }

    /// Outcome of a `present` call that returned this error
    pub fn outcome(&self) -> CheckoutOutcome {
        if self.is_canceled() {
            CheckoutOutcome::canceled(&self.message)
        } else {
            CheckoutOutcome::failed(&self.code, &self.message)
        }
    }
}

impl From<SheetError> for CheckoutError {
    fn from(err: SheetError) -> Self {
        CheckoutError::PaymentUi {
            code: err.code,
            message: err.message,
        }
    }
}

/// Native payment sheet
#[async_trait]
pub trait PaymentSheet: Send + Sync {
    /// Configure the sheet for one payment session
    async fn init(&self, params: &PaymentSheetParams) -> Result<(), SheetError>;

    /// Show the sheet and wait for the user to finish
    async fn present(&self) -> Result<(), SheetError>;
}
