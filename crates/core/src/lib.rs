//! Enrollwise Core - pricing engine, domain entities, services, and traits.
//!
//! This crate prices youth-activity enrollments: it stacks sibling,
//! scholarship, and promo-code discounts across an order, validates promo
//! codes, builds installment schedules, and computes cancellation refunds.
//! It is database-agnostic and defines repository traits that are implemented
//! by the `storage-sqlite` crate.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod discounts;
pub mod errors;
pub mod money;
pub mod orders;
pub mod payments;
pub mod scholarships;

pub use config::PricingConfig;
pub use money::Money;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
