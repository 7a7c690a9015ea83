//! Discount stacking for a single order.
//!
//! Lines are ranked by price, most expensive first, and each line takes its
//! discounts in a fixed order: sibling, then scholarship, then promo code.
//! Every discount is computed on what is left after the previous ones and is
//! rounded to cents immediately.

use chrono::{DateTime, Utc};
use log::debug;
use rust_decimal::Decimal;

use super::orders_model::{LineItemCalculation, OrderCalculation, ResolvedOrderItem};
use super::sibling_discounts::sibling_discount_rate;
use crate::discounts::{validate_discount_code, DiscountCheck, DiscountCode};
use crate::money::{percentage_of, round_money, Money};
use crate::scholarships::ScholarshipResolver;

/// Prices resolved order items against one promo code and one guardian's
/// scholarships.
///
/// Pure: all inputs are already loaded, nothing is mutated, and the same
/// inputs always produce the same breakdown.
pub struct OrderCalculator<'a> {
    discount_code: Option<&'a DiscountCode>,
    scholarships: &'a ScholarshipResolver,
    now: DateTime<Utc>,
}

impl<'a> OrderCalculator<'a> {
    pub fn new(
        discount_code: Option<&'a DiscountCode>,
        scholarships: &'a ScholarshipResolver,
        now: DateTime<Utc>,
    ) -> Self {
        OrderCalculator {
            discount_code,
            scholarships,
            now,
        }
    }

    pub fn calculate(&self, mut items: Vec<ResolvedOrderItem>) -> OrderCalculation {
        if items.is_empty() {
            return OrderCalculation::empty();
        }

        // Stable sort: equal prices keep the order the guardian listed them in.
        items.sort_by(|a, b| b.class.price.cmp(&a.class.price));

        let line_items: Vec<LineItemCalculation> = items
            .iter()
            .enumerate()
            .map(|(idx, item)| self.price_line(idx + 1, item))
            .collect();

        let subtotal: Money = line_items.iter().map(|l| l.unit_price).sum();
        let sibling_discount_total: Money = line_items.iter().map(|l| l.sibling_discount).sum();
        let scholarship_discount_total: Money =
            line_items.iter().map(|l| l.scholarship_discount).sum();
        let promo_discount_total: Money = line_items.iter().map(|l| l.promo_discount).sum();
        let discount_total: Money = line_items
            .iter()
            .map(LineItemCalculation::discount_total)
            .sum();
        let total = (subtotal - discount_total).max(Decimal::ZERO);

        OrderCalculation {
            line_items,
            subtotal,
            sibling_discount_total,
            scholarship_discount_total,
            promo_discount_total,
            discount_total,
            total: round_money(total),
            discount_code: self.discount_code.map(|d| d.code.clone()),
            discount_code_id: self.discount_code.map(|d| d.id.clone()),
        }
    }

    /// Prices the item at 1-based `position` in the ranked order.
    fn price_line(&self, position: usize, item: &ResolvedOrderItem) -> LineItemCalculation {
        let unit_price = round_money(item.class.price);

        let (sibling_discount, sibling_discount_description) = if position == 1 {
            (round_money(Decimal::ZERO), None)
        } else {
            let rate = sibling_discount_rate(position);
            let discount = percentage_of(unit_price, rate);
            let description = (discount > Decimal::ZERO)
                .then(|| format!("Sibling discount ({}% off)", rate.normalize()));
            (discount, description)
        };

        let (scholarship_discount, scholarship_description) =
            match self.scholarships.for_child(&item.child.id) {
                Some(scholarship) => (
                    percentage_of(
                        unit_price - sibling_discount,
                        scholarship.discount_percentage,
                    ),
                    Some(scholarship.description()),
                ),
                None => (round_money(Decimal::ZERO), None),
            };

        let remaining = unit_price - sibling_discount - scholarship_discount;
        let (promo_discount, promo_description) = self.promo_for(item, remaining);

        LineItemCalculation {
            child_id: item.child.id.clone(),
            child_name: item.child.full_name.clone(),
            class_id: item.class.id.clone(),
            class_name: item.class.name.clone(),
            program_id: item.class.program_id.clone(),
            unit_price,
            sibling_discount,
            sibling_discount_description,
            scholarship_discount,
            scholarship_description,
            promo_discount,
            promo_description,
            line_total: remaining - promo_discount,
        }
    }

    /// Promo discount for one line. Each line is checked on its own because
    /// program and class restrictions can differ between lines.
    fn promo_for(&self, item: &ResolvedOrderItem, remaining: Money) -> (Money, Option<String>) {
        let Some(discount) = self.discount_code else {
            return (round_money(Decimal::ZERO), None);
        };

        let result = validate_discount_code(
            Some(discount),
            DiscountCheck {
                order_amount: Some(remaining),
                program_id: Some(&item.class.program_id),
                class_id: Some(&item.class.id),
            },
            self.now,
        );

        match (result.is_valid, result.discount_amount) {
            (true, Some(amount)) => (amount, Some(format!("Promo: {}", discount.code))),
            _ => {
                debug!(
                    "Promo code {} not applied to class {}: {}",
                    discount.code,
                    item.class.id,
                    result.error_message.as_deref().unwrap_or("no amount")
                );
                (round_money(Decimal::ZERO), None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ChildProfile, ClassOffering};
    use crate::discounts::DiscountType;
    use crate::scholarships::Scholarship;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 20, 9, 30, 0).unwrap()
    }

    fn item(child_id: &str, class_id: &str, program_id: &str, price: Decimal) -> ResolvedOrderItem {
        ResolvedOrderItem {
            child: ChildProfile {
                id: child_id.to_string(),
                full_name: format!("Child {}", child_id),
                user_id: "guardian-1".to_string(),
            },
            class: ClassOffering {
                id: class_id.to_string(),
                name: format!("Class {}", class_id),
                price,
                program_id: program_id.to_string(),
            },
        }
    }

    fn promo(discount_type: DiscountType, value: Decimal) -> DiscountCode {
        DiscountCode {
            id: "dc-1".to_string(),
            code: "FALL".to_string(),
            discount_type,
            discount_value: value,
            valid_from: now() - Duration::days(10),
            valid_until: Some(now() + Duration::days(10)),
            max_uses: None,
            current_uses: 0,
            max_uses_per_user: None,
            min_order_amount: None,
            applies_to_program_id: None,
            applies_to_class_id: None,
            is_active: true,
            created_at: now() - Duration::days(20),
            updated_at: now() - Duration::days(20),
        }
    }

    fn scholarship(child_id: Option<&str>, pct: Decimal) -> Scholarship {
        Scholarship {
            id: "s-1".to_string(),
            user_id: "guardian-1".to_string(),
            child_id: child_id.map(str::to_string),
            scholarship_type: "Need-based".to_string(),
            discount_percentage: pct,
            valid_until: None,
            is_active: true,
            created_at: now(),
        }
    }

    fn calculate(
        items: Vec<ResolvedOrderItem>,
        discount_code: Option<&DiscountCode>,
        scholarships: Vec<Scholarship>,
    ) -> OrderCalculation {
        let resolver = ScholarshipResolver::new(scholarships, now().date_naive());
        OrderCalculator::new(discount_code, &resolver, now()).calculate(items)
    }

    #[test]
    fn test_empty_order() {
        let result = calculate(Vec::new(), None, Vec::new());
        assert_eq!(result, OrderCalculation::empty());
        assert!(result.line_items.is_empty());
        assert_eq!(result.total, dec!(0));
    }

    #[test]
    fn test_single_item_has_no_sibling_discount() {
        let result = calculate(vec![item("c1", "k1", "p1", dec!(200.00))], None, Vec::new());
        let line = &result.line_items[0];
        assert_eq!(line.sibling_discount, dec!(0));
        assert_eq!(line.sibling_discount_description, None);
        assert_eq!(line.line_total, dec!(200.00));
        assert_eq!(result.total, dec!(200.00));
    }

    #[test]
    fn test_sibling_tiers_follow_descending_price() {
        let result = calculate(
            vec![
                item("c1", "cheap", "p1", dec!(100.00)),
                item("c2", "pricey", "p1", dec!(300.00)),
                item("c3", "mid", "p1", dec!(200.00)),
                item("c4", "low", "p1", dec!(80.00)),
                item("c5", "lowest", "p1", dec!(60.00)),
            ],
            None,
            Vec::new(),
        );

        let classes: Vec<&str> = result
            .line_items
            .iter()
            .map(|l| l.class_id.as_str())
            .collect();
        assert_eq!(classes, vec!["pricey", "mid", "cheap", "low", "lowest"]);

        let discounts: Vec<Decimal> = result
            .line_items
            .iter()
            .map(|l| l.sibling_discount)
            .collect();
        // 0%, 25% of 200, 35% of 100, 45% of 80, 45% of 60
        assert_eq!(
            discounts,
            vec![dec!(0), dec!(50.00), dec!(35.00), dec!(36.00), dec!(27.00)]
        );
        assert_eq!(
            result.line_items[1].sibling_discount_description.as_deref(),
            Some("Sibling discount (25% off)")
        );
        assert_eq!(
            result.line_items[4].sibling_discount_description.as_deref(),
            Some("Sibling discount (45% off)")
        );
        assert_eq!(result.subtotal, dec!(740.00));
        assert_eq!(result.sibling_discount_total, dec!(148.00));
        assert_eq!(result.total, dec!(592.00));
    }

    #[test]
    fn test_equal_prices_keep_input_order() {
        let result = calculate(
            vec![
                item("c1", "first", "p1", dec!(120.00)),
                item("c2", "second", "p1", dec!(120.00)),
                item("c3", "third", "p1", dec!(120.00)),
            ],
            None,
            Vec::new(),
        );
        let classes: Vec<&str> = result
            .line_items
            .iter()
            .map(|l| l.class_id.as_str())
            .collect();
        assert_eq!(classes, vec!["first", "second", "third"]);
        assert_eq!(result.line_items[0].sibling_discount, dec!(0));
        assert_eq!(result.line_items[1].sibling_discount, dec!(30.00));
        assert_eq!(result.line_items[2].sibling_discount, dec!(42.00));
    }

    #[test]
    fn test_scholarship_applies_after_sibling_discount() {
        let result = calculate(
            vec![
                item("c1", "k1", "p1", dec!(200.00)),
                item("c2", "k2", "p1", dec!(100.00)),
            ],
            None,
            vec![scholarship(Some("c2"), dec!(50))],
        );

        let first = &result.line_items[0];
        assert_eq!(first.scholarship_discount, dec!(0));
        assert_eq!(first.scholarship_description, None);

        let second = &result.line_items[1];
        assert_eq!(second.sibling_discount, dec!(25.00));
        // 50% of the 75.00 left after the sibling discount.
        assert_eq!(second.scholarship_discount, dec!(37.50));
        assert_eq!(
            second.scholarship_description.as_deref(),
            Some("Need-based (50%)")
        );
        assert_eq!(second.line_total, dec!(37.50));
        assert_eq!(result.scholarship_discount_total, dec!(37.50));
        assert_eq!(result.total, dec!(237.50));
    }

    #[test]
    fn test_user_level_scholarship_covers_every_child() {
        let result = calculate(
            vec![
                item("c1", "k1", "p1", dec!(100.00)),
                item("c2", "k2", "p1", dec!(100.00)),
            ],
            None,
            vec![scholarship(None, dec!(10))],
        );
        assert_eq!(result.line_items[0].scholarship_discount, dec!(10.00));
        assert_eq!(result.line_items[1].scholarship_discount, dec!(7.50));
    }

    #[test]
    fn test_promo_applies_to_remaining_price() {
        let discount = promo(DiscountType::Percentage, dec!(10));
        let result = calculate(
            vec![
                item("c1", "k1", "p1", dec!(150.00)),
                item("c2", "k2", "p1", dec!(100.00)),
            ],
            Some(&discount),
            vec![scholarship(Some("c1"), dec!(20))],
        );

        let first = &result.line_items[0];
        assert_eq!(first.scholarship_discount, dec!(30.00));
        assert_eq!(first.promo_discount, dec!(12.00));
        assert_eq!(first.promo_description.as_deref(), Some("Promo: FALL"));
        assert_eq!(first.line_total, dec!(108.00));

        let second = &result.line_items[1];
        assert_eq!(second.sibling_discount, dec!(25.00));
        assert_eq!(second.promo_discount, dec!(7.50));
        assert_eq!(second.line_total, dec!(67.50));

        assert_eq!(result.promo_discount_total, dec!(19.50));
        assert_eq!(result.discount_total, dec!(74.50));
        assert_eq!(result.total, dec!(175.50));
        assert_eq!(result.discount_code.as_deref(), Some("FALL"));
        assert_eq!(result.discount_code_id.as_deref(), Some("dc-1"));
        assert!(result.promo_applied());
    }

    #[test]
    fn test_fixed_promo_is_capped_per_line() {
        let discount = promo(DiscountType::FixedAmount, dec!(50.00));
        let result = calculate(
            vec![
                item("c1", "k1", "p1", dec!(120.00)),
                item("c2", "k2", "p1", dec!(40.00)),
            ],
            Some(&discount),
            Vec::new(),
        );
        assert_eq!(result.line_items[0].promo_discount, dec!(50.00));
        // 40.00 - 25% sibling = 30.00 left, so the promo stops at 30.00.
        assert_eq!(result.line_items[1].promo_discount, dec!(30.00));
        assert_eq!(result.line_items[1].line_total, dec!(0.00));
        assert_eq!(result.total, dec!(70.00));
    }

    #[test]
    fn test_promo_restricted_to_program_only_hits_matching_lines() {
        let mut discount = promo(DiscountType::Percentage, dec!(20));
        discount.applies_to_program_id = Some("swim".to_string());
        let result = calculate(
            vec![
                item("c1", "k1", "chess", dec!(100.00)),
                item("c2", "k2", "swim", dec!(100.00)),
            ],
            Some(&discount),
            Vec::new(),
        );
        assert_eq!(result.line_items[0].promo_discount, dec!(0));
        assert_eq!(result.line_items[0].promo_description, None);
        assert_eq!(result.line_items[1].promo_discount, dec!(15.00));
        assert_eq!(result.discount_code.as_deref(), Some("FALL"));
    }

    #[test]
    fn test_minimum_amount_is_checked_per_line() {
        let mut discount = promo(DiscountType::FixedAmount, dec!(10.00));
        discount.min_order_amount = Some(dec!(100.00));
        let result = calculate(
            vec![
                item("c1", "k1", "p1", dec!(120.00)),
                item("c2", "k2", "p1", dec!(120.00)),
            ],
            Some(&discount),
            Vec::new(),
        );
        // Second line is 90.00 after its sibling discount, below the minimum.
        assert_eq!(result.line_items[0].promo_discount, dec!(10.00));
        assert_eq!(result.line_items[1].promo_discount, dec!(0));
    }

    #[test]
    fn test_expired_promo_degrades_to_no_discount() {
        let mut discount = promo(DiscountType::Percentage, dec!(50));
        discount.valid_until = Some(now() - Duration::days(1));
        let result = calculate(
            vec![item("c1", "k1", "p1", dec!(100.00))],
            Some(&discount),
            Vec::new(),
        );
        assert_eq!(result.promo_discount_total, dec!(0));
        assert_eq!(result.total, dec!(100.00));
        assert!(!result.promo_applied());
    }

    #[test]
    fn test_heavy_discounts_never_make_total_negative() {
        let discount = promo(DiscountType::FixedAmount, dec!(500.00));
        let result = calculate(
            vec![
                item("c1", "k1", "p1", dec!(90.00)),
                item("c2", "k2", "p1", dec!(60.00)),
                item("c3", "k3", "p1", dec!(30.00)),
            ],
            Some(&discount),
            vec![scholarship(None, dec!(100))],
        );
        assert_eq!(result.total, dec!(0));
        for line in &result.line_items {
            assert_eq!(
                line.line_total,
                line.unit_price - line.sibling_discount - line.scholarship_discount - line.promo_discount
            );
        }
    }

    #[test]
    fn test_discounts_are_rounded_per_line() {
        let result = calculate(
            vec![
                item("c1", "k1", "p1", dec!(99.99)),
                item("c2", "k2", "p1", dec!(33.33)),
                item("c3", "k3", "p1", dec!(33.33)),
            ],
            None,
            vec![scholarship(None, dec!(15))],
        );
        for line in &result.line_items {
            assert!(line.sibling_discount.scale() <= 2);
            assert!(line.scholarship_discount.scale() <= 2);
        }
        // 25% of 33.33 = 8.3325 -> 8.33; 35% of 33.33 = 11.6655 -> 11.67
        assert_eq!(result.line_items[1].sibling_discount, dec!(8.33));
        assert_eq!(result.line_items[2].sibling_discount, dec!(11.67));
        let sum: Decimal = result.line_items.iter().map(|l| l.line_total).sum();
        assert_eq!(sum, result.total);
    }
}
