//! Discount codes module - promo code models, validation, usage ledger, and services.

mod discounts_model;
mod discounts_service;
mod discounts_traits;
mod discounts_validator;

pub use discounts_model::{
    normalize_code, DiscountCode, DiscountType, DiscountValidation, NewDiscountCode,
    UsageIncrement,
};
pub use discounts_service::DiscountService;
pub use discounts_traits::{DiscountCodeRepositoryTrait, DiscountServiceTrait};
pub use discounts_validator::{validate_discount_code, DiscountCheck};
