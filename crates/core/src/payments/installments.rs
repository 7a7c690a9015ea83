//! Splitting an order total into dated installments.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::MIN_INSTALLMENTS;
use crate::errors::{Error, Result};
use crate::money::{round_money, Money};

/// Spacing between installment due dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentFrequency {
    Weekly,
    Biweekly,
    /// A flat 30 days, not a calendar month.
    Monthly,
}

impl PaymentFrequency {
    pub fn interval_days(&self) -> u64 {
        match self {
            PaymentFrequency::Weekly => 7,
            PaymentFrequency::Biweekly => 14,
            PaymentFrequency::Monthly => 30,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentFrequency::Weekly => "weekly",
            PaymentFrequency::Biweekly => "biweekly",
            PaymentFrequency::Monthly => "monthly",
        }
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentFrequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(PaymentFrequency::Weekly),
            "biweekly" => Ok(PaymentFrequency::Biweekly),
            "monthly" => Ok(PaymentFrequency::Monthly),
            other => Err(Error::invalid_input(format!(
                "Unknown payment frequency: {}",
                other
            ))),
        }
    }
}

/// One dated payment of a schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentScheduleItem {
    /// 1-based.
    pub installment_number: u32,
    pub due_date: NaiveDate,
    pub amount: Money,
}

/// Splits `total` into `num_installments` payments starting on `start_date`.
///
/// Every installment but the last is `total / n` rounded to cents; the last
/// absorbs the rounding difference so the schedule sums to `total` exactly.
pub fn calculate_installment_schedule(
    total: Money,
    num_installments: u32,
    start_date: NaiveDate,
    frequency: PaymentFrequency,
) -> Result<Vec<InstallmentScheduleItem>> {
    if num_installments < MIN_INSTALLMENTS {
        return Err(Error::invalid_input(format!(
            "A payment plan needs at least {} installments, got {}",
            MIN_INSTALLMENTS, num_installments
        )));
    }
    if total.is_sign_negative() {
        return Err(Error::invalid_input(format!(
            "Cannot schedule a negative total: {}",
            total
        )));
    }

    let count = Decimal::from(num_installments);
    let base_amount = round_money(total / count);
    let remainder = total - base_amount * count;

    (0..num_installments)
        .map(|i| {
            let offset = u64::from(i) * frequency.interval_days();
            let due_date = start_date.checked_add_days(Days::new(offset)).ok_or_else(|| {
                Error::invalid_input(format!(
                    "Installment {} falls outside the supported date range",
                    i + 1
                ))
            })?;
            let amount = if i + 1 == num_installments {
                base_amount + remainder
            } else {
                base_amount
            };
            Ok(InstallmentScheduleItem {
                installment_number: i + 1,
                due_date,
                amount,
            })
        })
        .collect()
}
