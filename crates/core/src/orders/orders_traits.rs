use crate::errors::Result;
use crate::orders::orders_model::{OrderCalculation, OrderItem};

/// Trait for order pricing operations
pub trait OrderServiceTrait: Send + Sync {
    /// Prices `items` for guardian `user_id`, optionally with a promo code.
    ///
    /// Business-rule problems (unknown or expired code, lapsed scholarship)
    /// reduce the discount instead of failing. Items whose child or class
    /// cannot be found are left out of the result.
    fn calculate_order(
        &self,
        user_id: &str,
        items: &[OrderItem],
        discount_code: Option<&str>,
    ) -> Result<OrderCalculation>;
}
