//! Catalog domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A class a child can be enrolled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassOffering {
    pub id: String,
    pub name: String,
    /// Base charge for one enrollment.
    pub price: Decimal,
    pub program_id: String,
}

/// A child belonging to a guardian account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildProfile {
    pub id: String,
    pub full_name: String,
    /// Owning guardian.
    pub user_id: String,
}
