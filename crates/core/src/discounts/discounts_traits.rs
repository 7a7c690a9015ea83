use crate::discounts::discounts_model::{
    DiscountCode, DiscountValidation, NewDiscountCode, UsageIncrement,
};
use crate::errors::Result;
use crate::money::Money;
use async_trait::async_trait;

/// Trait for discount code repository operations
#[async_trait]
pub trait DiscountCodeRepositoryTrait: Send + Sync {
    /// Looks a code up by its canonical (upper-case) form.
    fn get_discount_code(&self, code: &str) -> Result<Option<DiscountCode>>;
    fn get_discount_code_by_id(&self, id: &str) -> Result<DiscountCode>;
    fn list_discount_codes(&self) -> Result<Vec<DiscountCode>>;
    async fn create_discount_code(&self, new_code: NewDiscountCode) -> Result<DiscountCode>;
    async fn update_discount_code(&self, id: &str, update: NewDiscountCode)
        -> Result<DiscountCode>;
    async fn set_discount_code_active(&self, id: &str, is_active: bool) -> Result<DiscountCode>;

    /// Adds one redemption, atomically and only while the code is below
    /// `max_uses`. Implementations must re-check the limit in the same
    /// statement that writes the counter.
    async fn increment_usage(&self, id: &str) -> Result<UsageIncrement>;
}

/// Trait for discount code service operations
#[async_trait]
pub trait DiscountServiceTrait: Send + Sync {
    /// Standalone "check before I pay" preview. Never changes usage.
    fn validate_discount_code(
        &self,
        code: &str,
        order_amount: Option<Money>,
        program_id: Option<&str>,
        class_id: Option<&str>,
    ) -> Result<DiscountValidation>;
    fn get_discount_codes(&self) -> Result<Vec<DiscountCode>>;
    async fn create_discount_code(&self, new_code: NewDiscountCode) -> Result<DiscountCode>;
    async fn update_discount_code(&self, id: &str, update: NewDiscountCode)
        -> Result<DiscountCode>;
    async fn deactivate_discount_code(&self, id: &str) -> Result<DiscountCode>;

    /// Records one redemption after a paid order. Call once per order, not
    /// once per line item.
    async fn increment_discount_usage(&self, code_id: &str) -> Result<UsageIncrement>;
}
