//! # Money
//!
//! Currency codes and the major/minor unit conversion used when a charge is
//! handed to the payment provider. Amounts travel as `Decimal` major units
//! (e.g. `24.50` dollars) until the last moment.

use crate::error::{CheckoutError, CheckoutResult};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Supported currencies (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    JPY,
    CAD,
    AUD,
    CHF,
    MXN,
}

impl Currency {
    /// Returns the lowercase ISO 4217 code, as the provider expects it
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::USD => "usd",
            Currency::EUR => "eur",
            Currency::GBP => "gbp",
            Currency::JPY => "jpy",
            Currency::CAD => "cad",
            Currency::AUD => "aud",
            Currency::CHF => "chf",
            Currency::MXN => "mxn",
        }
    }

    /// Number of decimal places in the minor unit (JPY has 0, most others 2)
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::JPY => "¥",
            Currency::CAD => "C$",
            Currency::AUD => "A$",
            Currency::CHF => "CHF ",
            Currency::MXN => "MX$",
        }
    }

    /// Convert a major-unit amount to the provider's smallest unit.
    ///
    /// Fails if `amount` carries more precision than the minor unit can hold
    /// (e.g. `24.505` USD) or does not fit in an `i64`.
    pub fn to_minor_units(&self, amount: Decimal) -> CheckoutResult<i64> {
        let factor = Decimal::from(10_i64.pow(self.decimal_places()));
        let scaled = amount.checked_mul(factor).ok_or_else(|| {
            CheckoutError::Validation(format!("amount {} is too large", amount))
        })?;

        if !scaled.fract().is_zero() {
            return Err(CheckoutError::Validation(format!(
                "amount {} has more than {} decimal places for {}",
                amount,
                self.decimal_places(),
                self
            )));
        }

        scaled.to_i64().ok_or_else(|| {
            CheckoutError::Validation(format!("amount {} is too large", amount))
        })
    }

    /// Convert from smallest unit back to major units
    pub fn from_minor_units(&self, amount: i64) -> Decimal {
        Decimal::new(amount, self.decimal_places())
    }

    /// Format a major-unit amount with exactly the currency's decimal places
    /// (`24.5` → `"24.50"` for USD)
    pub fn format_amount(&self, amount: Decimal) -> String {
        let mut rounded = amount
            .round_dp_with_strategy(self.decimal_places(), RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(self.decimal_places());
        rounded.to_string()
    }

    /// Format for display (e.g. `"$24.50"`)
    pub fn display(&self, amount: Decimal) -> String {
        format!("{}{}", self.symbol(), self.format_amount(amount))
    }
}

impl FromStr for Currency {
    type Err = CheckoutError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code.trim().to_lowercase().as_str() {
            "usd" => Ok(Currency::USD),
            "eur" => Ok(Currency::EUR),
            "gbp" => Ok(Currency::GBP),
            "jpy" => Ok(Currency::JPY),
            "cad" => Ok(Currency::CAD),
            "aud" => Ok(Currency::AUD),
            "chf" => Ok(Currency::CHF),
            "mxn" => Ok(Currency::MXN),
            other => Err(CheckoutError::UnsupportedCurrency {
                currency: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}
