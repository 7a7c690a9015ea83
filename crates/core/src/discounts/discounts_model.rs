//! Discount code domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::money::{percentage_of, round_money, Money};

/// How a discount code's `discount_value` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    /// `discount_value` is a percentage between 0 and 100.
    Percentage,
    /// `discount_value` is a currency amount.
    FixedAmount,
}

impl DiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountType::Percentage => "PERCENTAGE",
            DiscountType::FixedAmount => "FIXED_AMOUNT",
        }
    }

    /// Discount granted on `amount` for a code of this type and `value`.
    ///
    /// A fixed amount never exceeds the amount it is applied to.
    pub fn discount_for(&self, value: Decimal, amount: Money) -> Money {
        match self {
            DiscountType::Percentage => percentage_of(amount, value),
            DiscountType::FixedAmount => round_money(value.min(amount).max(Decimal::ZERO)),
        }
    }
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscountType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PERCENTAGE" => Ok(DiscountType::Percentage),
            "FIXED_AMOUNT" => Ok(DiscountType::FixedAmount),
            other => Err(Error::invalid_input(format!(
                "Unknown discount type: {}",
                other
            ))),
        }
    }
}

/// Canonical form of a discount code: trimmed and upper-cased.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Domain model for an administrator-created promo code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountCode {
    pub id: String,
    /// Canonical upper-case code.
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub valid_from: DateTime<Utc>,
    pub valid_until: Option<DateTime<Utc>>,
    pub max_uses: Option<i32>,
    pub current_uses: i32,
    /// Stored for administrators; redemption checks do not consult it.
    pub max_uses_per_user: Option<i32>,
    pub min_order_amount: Option<Decimal>,
    pub applies_to_program_id: Option<String>,
    pub applies_to_class_id: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DiscountCode {
    /// Whether the usage counter has reached `max_uses`.
    pub fn is_exhausted(&self) -> bool {
        self.max_uses
            .map(|max| self.current_uses >= max)
            .unwrap_or(false)
    }
}

/// Input model for creating or editing a discount code.
///
/// Usage counters are not part of the input: they start at zero and only the
/// usage ledger moves them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDiscountCode {
    pub id: Option<String>,
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub valid_from: DateTime<Utc>,
    pub valid_until: Option<DateTime<Utc>>,
    pub max_uses: Option<i32>,
    pub max_uses_per_user: Option<i32>,
    pub min_order_amount: Option<Decimal>,
    pub applies_to_program_id: Option<String>,
    pub applies_to_class_id: Option<String>,
    pub is_active: bool,
}

impl NewDiscountCode {
    /// Checks administrator input before it is stored.
    pub fn validate(&self) -> Result<()> {
        if normalize_code(&self.code).is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "code".to_string(),
            )));
        }
        if self.discount_value.is_sign_negative() {
            return Err(Error::invalid_input("Discount value cannot be negative"));
        }
        if self.discount_type == DiscountType::Percentage
            && self.discount_value > Decimal::ONE_HUNDRED
        {
            return Err(Error::invalid_input(
                "Percentage discount cannot exceed 100",
            ));
        }
        if let Some(until) = self.valid_until {
            if until < self.valid_from {
                return Err(Error::invalid_input(
                    "Discount code cannot expire before it becomes valid",
                ));
            }
        }
        if matches!(self.max_uses, Some(max) if max < 0)
            || matches!(self.max_uses_per_user, Some(max) if max < 0)
        {
            return Err(Error::invalid_input("Usage limits cannot be negative"));
        }
        if matches!(self.min_order_amount, Some(min) if min.is_sign_negative()) {
            return Err(Error::invalid_input(
                "Minimum order amount cannot be negative",
            ));
        }
        Ok(())
    }

    /// Returns a copy with the code in canonical form.
    pub fn normalized(mut self) -> Self {
        self.code = normalize_code(&self.code);
        self.applies_to_program_id = self.applies_to_program_id.filter(|s| !s.trim().is_empty());
        self.applies_to_class_id = self.applies_to_class_id.filter(|s| !s.trim().is_empty());
        self
    }
}

/// Outcome of checking a code against an order amount.
///
/// An ineligible code is a regular result, not an error, so the message can be
/// shown to the guardian.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountValidation {
    pub is_valid: bool,
    pub error_message: Option<String>,
    pub discount_type: Option<DiscountType>,
    pub discount_value: Option<Decimal>,
    pub discount_amount: Option<Money>,
}

impl DiscountValidation {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error_message: Some(message.into()),
            discount_type: None,
            discount_value: None,
            discount_amount: None,
        }
    }

    pub fn valid(discount: &DiscountCode, discount_amount: Option<Money>) -> Self {
        Self {
            is_valid: true,
            error_message: None,
            discount_type: Some(discount.discount_type),
            discount_value: Some(discount.discount_value),
            discount_amount,
        }
    }
}

/// Result of recording one redemption of a discount code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum UsageIncrement {
    /// The counter was incremented and now reads `current_uses`.
    Applied { current_uses: i32 },
    /// The code was already at `max_uses`; nothing changed.
    LimitReached { max_uses: i32 },
}

impl UsageIncrement {
    pub fn is_applied(&self) -> bool {
        matches!(self, UsageIncrement::Applied { .. })
    }
}
