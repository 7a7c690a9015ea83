use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, warn};

use super::order_calculator::OrderCalculator;
use super::orders_model::{OrderCalculation, OrderItem, ResolvedOrderItem};
use super::orders_traits::OrderServiceTrait;
use crate::catalog::CatalogRepositoryTrait;
use crate::discounts::{normalize_code, DiscountCodeRepositoryTrait};
use crate::errors::Result;
use crate::scholarships::{ScholarshipRepositoryTrait, ScholarshipResolver};

pub struct OrderService {
    catalog_repository: Arc<dyn CatalogRepositoryTrait>,
    discount_repository: Arc<dyn DiscountCodeRepositoryTrait>,
    scholarship_repository: Arc<dyn ScholarshipRepositoryTrait>,
}

impl OrderService {
    pub fn new(
        catalog_repository: Arc<dyn CatalogRepositoryTrait>,
        discount_repository: Arc<dyn DiscountCodeRepositoryTrait>,
        scholarship_repository: Arc<dyn ScholarshipRepositoryTrait>,
    ) -> Self {
        OrderService {
            catalog_repository,
            discount_repository,
            scholarship_repository,
        }
    }

    /// Loads the child and class for each item, skipping any that cannot be
    /// found or whose child belongs to another guardian.
    fn resolve_items(&self, user_id: &str, items: &[OrderItem]) -> Result<Vec<ResolvedOrderItem>> {
        let mut resolved = Vec::with_capacity(items.len());
        for item in items {
            let child = match self.catalog_repository.get_child_profile(&item.child_id)? {
                Some(child) if child.user_id == user_id => child,
                Some(_) => {
                    warn!(
                        "Skipping order item: child {} does not belong to user {}",
                        item.child_id, user_id
                    );
                    continue;
                }
                None => {
                    warn!("Skipping order item: child {} not found", item.child_id);
                    continue;
                }
            };
            let Some(class) = self.catalog_repository.get_class_offering(&item.class_id)? else {
                warn!("Skipping order item: class {} not found", item.class_id);
                continue;
            };
            resolved.push(ResolvedOrderItem { child, class });
        }
        Ok(resolved)
    }

    /// Prices an order as of `now`. [`OrderServiceTrait::calculate_order`]
    /// calls this with the current time.
    pub fn calculate_order_at(
        &self,
        user_id: &str,
        items: &[OrderItem],
        discount_code: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<OrderCalculation> {
        if items.is_empty() {
            return Ok(OrderCalculation::empty());
        }

        let resolved = self.resolve_items(user_id, items)?;

        let discount = match discount_code.map(normalize_code) {
            Some(code) if !code.is_empty() => {
                let found = self.discount_repository.get_discount_code(&code)?;
                if found.is_none() {
                    debug!("Discount code {} not recognised", code);
                }
                found
            }
            _ => None,
        };

        let today = now.date_naive();
        let scholarships = ScholarshipResolver::new(
            self.scholarship_repository
                .get_active_scholarships_for_user(user_id, today)?,
            today,
        );

        Ok(OrderCalculator::new(discount.as_ref(), &scholarships, now).calculate(resolved))
    }
}

impl OrderServiceTrait for OrderService {
    fn calculate_order(
        &self,
        user_id: &str,
        items: &[OrderItem],
        discount_code: Option<&str>,
    ) -> Result<OrderCalculation> {
        self.calculate_order_at(user_id, items, discount_code, Utc::now())
    }
}
