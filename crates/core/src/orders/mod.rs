//! Orders module - line-item pricing and discount stacking.

mod order_calculator;
mod orders_model;
mod orders_service;
mod orders_traits;
mod sibling_discounts;

pub use order_calculator::OrderCalculator;
pub use orders_model::{LineItemCalculation, OrderCalculation, OrderItem, ResolvedOrderItem};
pub use orders_service::OrderService;
pub use orders_traits::OrderServiceTrait;
pub use sibling_discounts::{sibling_discount_rate, SIBLING_DISCOUNT_RATES};
