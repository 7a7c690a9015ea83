//! Scholarship domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// An administrator-approved percentage discount for a guardian or one child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scholarship {
    pub id: String,
    pub user_id: String,
    /// `None` applies to every child of `user_id`.
    pub child_id: Option<String>,
    pub scholarship_type: String,
    pub discount_percentage: Decimal,
    /// Last day the scholarship can be used, inclusive.
    pub valid_until: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Scholarship {
    /// Active and not past `valid_until` on `as_of`.
    pub fn is_eligible_on(&self, as_of: NaiveDate) -> bool {
        self.is_active && self.valid_until.map_or(true, |until| until >= as_of)
    }

    /// Receipt label, e.g. `"Need-based (50%)"`.
    pub fn description(&self) -> String {
        format!(
            "{} ({}%)",
            self.scholarship_type,
            self.discount_percentage.normalize()
        )
    }
}

/// Input model for granting a scholarship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewScholarship {
    pub id: Option<String>,
    pub user_id: String,
    pub child_id: Option<String>,
    pub scholarship_type: String,
    pub discount_percentage: Decimal,
    pub valid_until: Option<NaiveDate>,
    pub is_active: bool,
}

impl NewScholarship {
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "userId".to_string(),
            )));
        }
        if self.scholarship_type.trim().is_empty() {
            return Err(Error::invalid_input("Scholarship type cannot be empty"));
        }
        if self.discount_percentage.is_sign_negative()
            || self.discount_percentage > Decimal::ONE_HUNDRED
        {
            return Err(Error::invalid_input(format!(
                "Scholarship percentage must be between 0 and 100, got {}",
                self.discount_percentage
            )));
        }
        Ok(())
    }
}
