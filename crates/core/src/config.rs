//! Tunable pricing policy.

use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_PROCESSING_FEE, DEFAULT_REFUND_WINDOW_DAYS, PROCESSING_FEE_ENV, REFUND_WINDOW_DAYS_ENV,
};
use crate::errors::{Error, Result};
use crate::money::parse_money;

/// Policy values used by the payment calculators.
///
/// The sibling discount table is deliberately absent: it is a fixed constant
/// in [`crate::orders::SIBLING_DISCOUNT_RATES`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingConfig {
    /// Fee withheld from a refunded cancellation.
    pub processing_fee: Decimal,
    /// Cancellations made this many days or more after enrollment get nothing back.
    pub refund_window_days: i64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            processing_fee: DEFAULT_PROCESSING_FEE,
            refund_window_days: DEFAULT_REFUND_WINDOW_DAYS,
        }
    }
}

impl PricingConfig {
    /// Reads overrides from the environment, keeping defaults for anything
    /// unset or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`PricingConfig::from_env`] with variables supplied by `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let processing_fee = match lookup(PROCESSING_FEE_ENV) {
            Some(raw) => parse_money(&raw).unwrap_or_else(|e| {
                warn!("Ignoring {}='{}': {}", PROCESSING_FEE_ENV, raw, e);
                defaults.processing_fee
            }),
            None => defaults.processing_fee,
        };

        let refund_window_days = match lookup(REFUND_WINDOW_DAYS_ENV) {
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(days) if days >= 0 => days,
                _ => {
                    warn!("Ignoring {}='{}': not a day count", REFUND_WINDOW_DAYS_ENV, raw);
                    defaults.refund_window_days
                }
            },
            None => defaults.refund_window_days,
        };

        Self {
            processing_fee,
            refund_window_days,
        }
    }

    /// Rejects values the calculators cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.processing_fee.is_sign_negative() {
            return Err(Error::InvalidConfigValue(format!(
                "processing fee cannot be negative: {}",
                self.processing_fee
            )));
        }
        if self.refund_window_days < 0 {
            return Err(Error::InvalidConfigValue(format!(
                "refund window cannot be negative: {} days",
                self.refund_window_days
            )));
        }
        Ok(())
    }
}
