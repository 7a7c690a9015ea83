//! Cancellation refunds.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PricingConfig;
use crate::errors::{Error, Result};
use crate::money::{round_money, Money};

/// Which branch of the refund policy a cancellation fell into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefundPolicy {
    FullRefundMinusFee,
    NoRefund,
}

/// Refund owed for a cancelled enrollment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancellationRefund {
    pub refund_amount: Money,
    pub policy: RefundPolicy,
    pub policy_description: String,
    /// Calendar days from the enrollment date to the cancellation date.
    pub days_elapsed: i64,
}

/// Applies the time-windowed refund policy.
#[derive(Debug, Clone, Default)]
pub struct RefundCalculator {
    config: PricingConfig,
}

impl RefundCalculator {
    pub fn new(config: PricingConfig) -> Result<Self> {
        config.validate()?;
        Ok(RefundCalculator { config })
    }

    /// Calculator using [`PricingConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        Self::new(PricingConfig::from_env())
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Refund for an enrollment paid `enrollment_amount` at `enrolled_at` and
    /// cancelled on `cancel_date`.
    ///
    /// Days are counted between calendar dates (UTC), so the time of day of
    /// the enrollment does not matter. Cancelling exactly at the end of the
    /// window gets nothing back.
    pub fn calculate(
        &self,
        enrollment_amount: Money,
        enrolled_at: DateTime<Utc>,
        cancel_date: NaiveDate,
    ) -> Result<CancellationRefund> {
        self.calculate_with_fee(
            enrollment_amount,
            enrolled_at,
            cancel_date,
            self.config.processing_fee,
        )
    }

    pub fn calculate_with_fee(
        &self,
        enrollment_amount: Money,
        enrolled_at: DateTime<Utc>,
        cancel_date: NaiveDate,
        processing_fee: Money,
    ) -> Result<CancellationRefund> {
        if enrollment_amount.is_sign_negative() {
            return Err(Error::invalid_input(format!(
                "Enrollment amount cannot be negative: {}",
                enrollment_amount
            )));
        }
        if processing_fee.is_sign_negative() {
            return Err(Error::invalid_input(format!(
                "Processing fee cannot be negative: {}",
                processing_fee
            )));
        }

        let days_elapsed = (cancel_date - enrolled_at.date_naive()).num_days();
        let window = self.config.refund_window_days;

        let refund = if days_elapsed < window {
            CancellationRefund {
                refund_amount: round_money((enrollment_amount - processing_fee).max(Decimal::ZERO)),
                policy: RefundPolicy::FullRefundMinusFee,
                policy_description: format!(
                    "Full refund minus ${:.2} processing fee (cancelled within {} days of enrollment)",
                    processing_fee, window
                ),
                days_elapsed,
            }
        } else {
            CancellationRefund {
                refund_amount: round_money(Decimal::ZERO),
                policy: RefundPolicy::NoRefund,
                policy_description: format!(
                    "No refund (cancelled {} or more days after enrollment)",
                    window
                ),
                days_elapsed,
            }
        };
        Ok(refund)
    }
}

/// Refund under the default policy. `cancel_date` defaults to today (UTC) and
/// `processing_fee` to the standard fee.
pub fn calculate_cancellation_refund(
    enrollment_amount: Money,
    enrolled_at: DateTime<Utc>,
    cancel_date: Option<NaiveDate>,
    processing_fee: Option<Money>,
) -> Result<CancellationRefund> {
    let calculator = RefundCalculator::default();
    let fee = processing_fee.unwrap_or(calculator.config.processing_fee);
    calculator.calculate_with_fee(
        enrollment_amount,
        enrolled_at,
        cancel_date.unwrap_or_else(|| Utc::now().date_naive()),
        fee,
    )
}
