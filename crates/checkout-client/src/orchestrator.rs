//! # Checkout Orchestrator
//!
//! Drives one checkout attempt from the "Order Now" tap to user feedback:
//!
//! ```text
//!  Idle ──tap──▶ Requesting ──session──▶ Initializing ──ok──▶ Presenting ──ok──▶ Succeeded
//!                    │                        │                    │
//!                    └──────── error ─────────┴────── error ───────┴──────────▶ Failed
//! ```
//!
//! `Succeeded` and `Failed` end the attempt. The next tap starts over and
//! provisions a brand-new session; nothing from a previous attempt is reused.
//! If the `order_now` future is dropped mid-attempt, the state returns to
//! `Idle` and the loading flag is cleared.

use crate::api::SessionClient;
use crate::pricing::PricingRules;
use crate::settings::CheckoutSettings;
use crate::sheet::{MerchantDisplay, PaymentSheet, PaymentSheetParams};
use crate::ui::{Alert, CheckoutUi};
use checkout_core::{CartContents, CheckoutError, CheckoutOutcome, CreateSessionBody};
use chrono::Utc;
use std::sync::Mutex;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Where the current (or last) attempt stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutState {
    Idle,
    Requesting,
    Initializing,
    Presenting,
    Succeeded,
    Failed { code: String, message: String },
}

impl CheckoutState {
    /// An attempt is in flight; the loading flag is up
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            CheckoutState::Requesting | CheckoutState::Initializing | CheckoutState::Presenting
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, CheckoutState::Succeeded | CheckoutState::Failed { .. })
    }

    fn from_outcome(outcome: &CheckoutOutcome) -> Self {
        match outcome {
            CheckoutOutcome::Success => CheckoutState::Succeeded,
            other => {
                let alert = Alert::for_outcome(other);
                let code = match other {
                    CheckoutOutcome::Failed { code, .. } => code.clone(),
                    _ => crate::sheet::CANCELED_CODE.to_string(),
                };
                CheckoutState::Failed {
                    code,
                    message: alert.message,
                }
            }
        }
    }
}

pub struct CheckoutOrchestrator<C, S, U> {
    client: C,
    sheet: S,
    ui: U,
    pricing: PricingRules,
    merchant: MerchantDisplay,
    customer: Option<String>,
    state: Mutex<CheckoutState>,
}

impl<C, S, U> CheckoutOrchestrator<C, S, U>
where
    C: SessionClient,
    S: PaymentSheet,
    U: CheckoutUi,
{
    pub fn new(client: C, sheet: S, ui: U) -> Self {
        Self {
            client,
            sheet,
            ui,
            pricing: PricingRules::default(),
            merchant: MerchantDisplay::default(),
            customer: None,
            state: Mutex::new(CheckoutState::Idle),
        }
    }

    /// Builder: take pricing and merchant metadata from loaded settings
    pub fn with_settings(mut self, settings: &CheckoutSettings) -> Self {
        self.pricing = settings.pricing.clone();
        self.merchant = settings.merchant.clone();
        self
    }

    pub fn with_pricing(mut self, pricing: PricingRules) -> Self {
        self.pricing = pricing;
        self
    }

    pub fn with_merchant(mut self, merchant: MerchantDisplay) -> Self {
        self.merchant = merchant;
        self
    }

    /// Builder: reuse a known provider customer instead of a fresh one per attempt
    pub fn with_customer(mut self, customer_id: impl Into<String>) -> Self {
        self.customer = Some(customer_id.into());
        self
    }

    pub fn state(&self) -> CheckoutState {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn pricing(&self) -> &PricingRules {
        &self.pricing
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn sheet(&self) -> &S {
        &self.sheet
    }

    fn transition(&self, next: CheckoutState) {
        {
            let mut state = self.state.lock().unwrap_or_else(|p| p.into_inner());
            *state = next.clone();
        }
        self.ui.on_state_change(&next);
    }

    /// Claim the loading flag. False if an attempt is already in flight.
    fn try_begin(&self) -> bool {
        {
            let mut state = self.state.lock().unwrap_or_else(|p| p.into_inner());
            if state.is_active() {
                return false;
            }
            *state = CheckoutState::Requesting;
        }
        self.ui.on_state_change(&CheckoutState::Requesting);
        true
    }

    /// Handle an "Order Now" tap.
    ///
    /// Returns `None` without side effects when an attempt is already
    /// running; otherwise runs the attempt to completion and returns its outcome.
    pub async fn order_now<K>(&self, cart: &K) -> Option<CheckoutOutcome>
    where
        K: CartContents + ?Sized,
    {
        if !self.try_begin() {
            warn!("Checkout already in progress, ignoring tap");
            return None;
        }
        let _guard = AttemptGuard {
            state: &self.state,
            ui: &self.ui,
        };

        let attempt_id = Uuid::new_v4();
        let started = Utc::now();
        self.ui.set_loading(true);

        let outcome = self
            .run_attempt(cart)
            .instrument(info_span!("checkout_attempt", attempt_id = %attempt_id))
            .await;

        let elapsed_ms = (Utc::now() - started).num_milliseconds();
        match &outcome {
            CheckoutOutcome::Success => {
                info!(%attempt_id, elapsed_ms, "Checkout succeeded")
            }
            CheckoutOutcome::UserCanceled { message } => {
                info!(%attempt_id, elapsed_ms, "Checkout canceled by user: {}", message)
            }
            CheckoutOutcome::Failed { code, message } => {
                warn!(%attempt_id, elapsed_ms, code = %code, "Checkout failed: {}", message)
            }
        }

        self.transition(CheckoutState::from_outcome(&outcome));
        self.ui.alert(Alert::for_outcome(&outcome));
        self.ui.set_loading(false);

        Some(outcome)
    }

    async fn run_attempt<K>(&self, cart: &K) -> CheckoutOutcome
    where
        K: CartContents + ?Sized,
    {
        if cart.is_empty() {
            return CheckoutOutcome::failed("EmptyCart", "Your cart is empty");
        }

        let amount = self.pricing.charge_amount(cart);
        info!("Requesting payment session for {} {}", amount, self.pricing.currency);

        let mut body = CreateSessionBody::formatted(amount);
        if let Some(customer) = &self.customer {
            body = body.with_customer(customer.clone());
        }

        let session = match self.client.request_session(&body).await {
            Ok(session) => session,
            Err(e) => {
                error!("Session request failed: {}", e);
                return CheckoutOutcome::from(&e);
            }
        };

        self.transition(CheckoutState::Initializing);
        let params = PaymentSheetParams::new(&self.merchant, &session);
        if let Err(e) = self.sheet.init(&params).await {
            let err = CheckoutError::from(e);
            error!("Payment sheet init failed: {} ({})", err, err.code());
            return CheckoutOutcome::from(&err);
        }

        self.transition(CheckoutState::Presenting);
        match self.sheet.present().await {
            Ok(()) => CheckoutOutcome::Success,
            Err(e) => e.outcome(),
        }
    }
}

/// Releases the attempt if `order_now` is dropped before reaching a
/// terminal state.
struct AttemptGuard<'a> {
    state: &'a Mutex<CheckoutState>,
    ui: &'a dyn CheckoutUi,
}

impl Drop for AttemptGuard<'_> {
    fn drop(&mut self) {
        {
            let mut state = self.state.lock().unwrap_or_else(|p| p.into_inner());
            if state.is_terminal() {
                return;
            }
            warn!(state = ?*state, "Checkout attempt abandoned");
            *state = CheckoutState::Idle;
        }
        self.ui.on_state_change(&CheckoutState::Idle);
        self.ui.set_loading(false);
    }
}
