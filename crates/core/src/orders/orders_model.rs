//! Order pricing models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::{ChildProfile, ClassOffering};
use crate::money::{round_money, Money};

/// One (child, class) selection requested by a guardian.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub child_id: String,
    pub class_id: String,
}

impl OrderItem {
    pub fn new(child_id: impl Into<String>, class_id: impl Into<String>) -> Self {
        Self {
            child_id: child_id.into(),
            class_id: class_id.into(),
        }
    }
}

/// An order item whose child and class records have been loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOrderItem {
    pub child: ChildProfile,
    pub class: ClassOffering,
}

/// Price breakdown for one line of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemCalculation {
    pub child_id: String,
    pub child_name: String,
    pub class_id: String,
    pub class_name: String,
    pub program_id: String,
    pub unit_price: Money,
    pub sibling_discount: Money,
    pub sibling_discount_description: Option<String>,
    pub scholarship_discount: Money,
    pub scholarship_description: Option<String>,
    pub promo_discount: Money,
    pub promo_description: Option<String>,
    pub line_total: Money,
}

impl LineItemCalculation {
    pub fn discount_total(&self) -> Money {
        self.sibling_discount + self.scholarship_discount + self.promo_discount
    }
}

/// Priced order, lines sorted by descending unit price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCalculation {
    pub line_items: Vec<LineItemCalculation>,
    pub subtotal: Money,
    pub sibling_discount_total: Money,
    pub scholarship_discount_total: Money,
    pub promo_discount_total: Money,
    pub discount_total: Money,
    /// Never negative.
    pub total: Money,
    /// Canonical code of the promo code that was recognised, if any.
    pub discount_code: Option<String>,
    /// Id to pass to the usage ledger once the order is paid.
    pub discount_code_id: Option<String>,
}

impl OrderCalculation {
    pub fn empty() -> Self {
        let zero = round_money(Decimal::ZERO);
        Self {
            line_items: Vec::new(),
            subtotal: zero,
            sibling_discount_total: zero,
            scholarship_discount_total: zero,
            promo_discount_total: zero,
            discount_total: zero,
            total: zero,
            discount_code: None,
            discount_code_id: None,
        }
    }

    /// Whether any line actually received the promo discount.
    pub fn promo_applied(&self) -> bool {
        self.line_items
            .iter()
            .any(|line| line.promo_discount > Decimal::ZERO)
    }
}
