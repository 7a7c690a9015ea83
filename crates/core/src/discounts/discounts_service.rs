use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info, warn};

use super::discounts_model::{
    normalize_code, DiscountCode, DiscountValidation, NewDiscountCode, UsageIncrement,
};
use super::discounts_traits::{DiscountCodeRepositoryTrait, DiscountServiceTrait};
use super::discounts_validator::{validate_discount_code, DiscountCheck};
use crate::errors::Result;
use crate::money::Money;

pub struct DiscountService {
    repository: Arc<dyn DiscountCodeRepositoryTrait>,
}

impl DiscountService {
    pub fn new(repository: Arc<dyn DiscountCodeRepositoryTrait>) -> Self {
        DiscountService { repository }
    }
}

#[async_trait]
impl DiscountServiceTrait for DiscountService {
    fn validate_discount_code(
        &self,
        code: &str,
        order_amount: Option<Money>,
        program_id: Option<&str>,
        class_id: Option<&str>,
    ) -> Result<DiscountValidation> {
        let canonical = normalize_code(code);
        let discount = if canonical.is_empty() {
            None
        } else {
            self.repository.get_discount_code(&canonical)?
        };

        let result = validate_discount_code(
            discount.as_ref(),
            DiscountCheck {
                order_amount,
                program_id,
                class_id,
            },
            Utc::now(),
        );
        if let Some(message) = &result.error_message {
            debug!("Discount code '{}' rejected: {}", canonical, message);
        }
        Ok(result)
    }

    fn get_discount_codes(&self) -> Result<Vec<DiscountCode>> {
        self.repository.list_discount_codes()
    }

    async fn create_discount_code(&self, new_code: NewDiscountCode) -> Result<DiscountCode> {
        new_code.validate()?;
        let created = self
            .repository
            .create_discount_code(new_code.normalized())
            .await?;
        info!("Created discount code {} ({})", created.code, created.id);
        Ok(created)
    }

    async fn update_discount_code(
        &self,
        id: &str,
        update: NewDiscountCode,
    ) -> Result<DiscountCode> {
        update.validate()?;
        self.repository
            .update_discount_code(id, update.normalized())
            .await
    }

    async fn deactivate_discount_code(&self, id: &str) -> Result<DiscountCode> {
        let updated = self.repository.set_discount_code_active(id, false).await?;
        info!("Deactivated discount code {}", updated.code);
        Ok(updated)
    }

    async fn increment_discount_usage(&self, code_id: &str) -> Result<UsageIncrement> {
        let outcome = self.repository.increment_usage(code_id).await?;
        match outcome {
            UsageIncrement::Applied { current_uses } => {
                info!(
                    "Recorded redemption of discount code {} (now {} uses)",
                    code_id, current_uses
                );
            }
            UsageIncrement::LimitReached { max_uses } => {
                warn!(
                    "Discount code {} already at its limit of {} uses; redemption not recorded",
                    code_id, max_uses
                );
            }
        }
        Ok(outcome)
    }
}
