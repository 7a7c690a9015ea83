//! Rule evaluation for promo codes.
//!
//! Checks run in a fixed order and stop at the first failure, so a guardian
//! only ever sees one reason. Nothing here touches usage counters.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::discounts_model::{DiscountCode, DiscountValidation};
use crate::money::Money;

/// Order context a code is checked against.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscountCheck<'a> {
    pub order_amount: Option<Money>,
    pub program_id: Option<&'a str>,
    pub class_id: Option<&'a str>,
}

impl<'a> DiscountCheck<'a> {
    pub fn for_amount(order_amount: Money) -> Self {
        Self {
            order_amount: Some(order_amount),
            ..Default::default()
        }
    }
}

/// Validates `discount` (the result of looking the code up) at instant `now`.
///
/// `None` means the code does not exist. On success the discount amount is
/// computed against `check.order_amount` when one was supplied.
pub fn validate_discount_code(
    discount: Option<&DiscountCode>,
    check: DiscountCheck<'_>,
    now: DateTime<Utc>,
) -> DiscountValidation {
    let Some(discount) = discount else {
        return DiscountValidation::invalid("Invalid discount code");
    };

    if !discount.is_active {
        return DiscountValidation::invalid("This discount code is no longer active");
    }

    if now < discount.valid_from {
        return DiscountValidation::invalid("This discount code is not yet valid");
    }

    if matches!(discount.valid_until, Some(until) if now > until) {
        return DiscountValidation::invalid("This discount code has expired");
    }

    if discount.is_exhausted() {
        return DiscountValidation::invalid("This discount code has reached its usage limit");
    }

    if let (Some(minimum), Some(amount)) = (discount.min_order_amount, check.order_amount) {
        if amount < minimum {
            return DiscountValidation::invalid(format!(
                "Minimum order amount of ${:.2} required for this discount code",
                minimum
            ));
        }
    }

    if let (Some(required), Some(program_id)) =
        (discount.applies_to_program_id.as_deref(), check.program_id)
    {
        if required != program_id {
            return DiscountValidation::invalid("This discount code is not valid for this program");
        }
    }

    if let (Some(required), Some(class_id)) =
        (discount.applies_to_class_id.as_deref(), check.class_id)
    {
        if required != class_id {
            return DiscountValidation::invalid("This discount code is not valid for this class");
        }
    }

    let discount_amount = check
        .order_amount
        .map(|amount| discount_amount_for(discount, amount));
    DiscountValidation::valid(discount, discount_amount)
}

/// Discount `discount` grants on `amount`, ignoring eligibility.
pub(crate) fn discount_amount_for(discount: &DiscountCode, amount: Money) -> Money {
    discount
        .discount_type
        .discount_for(discount.discount_value, amount.max(Decimal::ZERO))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discounts::DiscountType;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 15, 12, 0, 0).unwrap()
    }

    fn code() -> DiscountCode {
        DiscountCode {
            id: "dc-1".to_string(),
            code: "SPRING25".to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: dec!(25),
            valid_from: now() - Duration::days(30),
            valid_until: Some(now() + Duration::days(30)),
            max_uses: Some(10),
            current_uses: 3,
            max_uses_per_user: None,
            min_order_amount: None,
            applies_to_program_id: None,
            applies_to_class_id: None,
            is_active: true,
            created_at: now() - Duration::days(40),
            updated_at: now() - Duration::days(40),
        }
    }

    #[test]
    fn test_unknown_code() {
        let result = validate_discount_code(None, DiscountCheck::for_amount(dec!(100)), now());
        assert!(!result.is_valid);
        assert_eq!(result.error_message.as_deref(), Some("Invalid discount code"));
    }

    #[test]
    fn test_valid_code_computes_amount() {
        let result =
            validate_discount_code(Some(&code()), DiscountCheck::for_amount(dec!(150.00)), now());
        assert!(result.is_valid);
        assert_eq!(result.error_message, None);
        assert_eq!(result.discount_type, Some(DiscountType::Percentage));
        assert_eq!(result.discount_value, Some(dec!(25)));
        assert_eq!(result.discount_amount, Some(dec!(37.50)));
    }

    #[test]
    fn test_valid_code_without_amount() {
        let result = validate_discount_code(Some(&code()), DiscountCheck::default(), now());
        assert!(result.is_valid);
        assert_eq!(result.discount_amount, None);
    }

    #[test]
    fn test_inactive_code() {
        let mut discount = code();
        discount.is_active = false;
        let result = validate_discount_code(Some(&discount), DiscountCheck::default(), now());
        assert!(!result.is_valid);
        assert!(result.error_message.unwrap().contains("no longer active"));
    }

    #[test]
    fn test_not_yet_valid() {
        let mut discount = code();
        discount.valid_from = now() + Duration::seconds(1);
        let result = validate_discount_code(Some(&discount), DiscountCheck::default(), now());
        assert!(result.error_message.unwrap().contains("not yet valid"));
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let mut discount = code();
        discount.valid_from = now();
        discount.valid_until = Some(now());
        let result = validate_discount_code(Some(&discount), DiscountCheck::default(), now());
        assert!(result.is_valid);
    }

    #[test]
    fn test_expired_regardless_of_usage() {
        let mut discount = code();
        discount.valid_until = Some(now() - Duration::days(1));
        discount.current_uses = 0;
        discount.max_uses = None;
        let result = validate_discount_code(Some(&discount), DiscountCheck::default(), now());
        assert!(!result.is_valid);
        assert!(result.error_message.unwrap().contains("has expired"));
    }

    #[test]
    fn test_open_ended_code_never_expires() {
        let mut discount = code();
        discount.valid_until = None;
        let far_future = now() + Duration::days(3650);
        let result = validate_discount_code(Some(&discount), DiscountCheck::default(), far_future);
        assert!(result.is_valid);
    }

    #[test]
    fn test_exhausted_regardless_of_dates() {
        let mut discount = code();
        discount.current_uses = 10;
        discount.valid_until = None;
        let result = validate_discount_code(Some(&discount), DiscountCheck::default(), now());
        assert!(!result.is_valid);
        assert!(result.error_message.unwrap().contains("reached its usage limit"));
    }

    #[test]
    fn test_unlimited_uses() {
        let mut discount = code();
        discount.max_uses = None;
        discount.current_uses = 10_000;
        let result = validate_discount_code(Some(&discount), DiscountCheck::default(), now());
        assert!(result.is_valid);
    }

    #[test]
    fn test_minimum_order_amount() {
        let mut discount = code();
        discount.min_order_amount = Some(dec!(100));

        let below = validate_discount_code(
            Some(&discount),
            DiscountCheck::for_amount(dec!(99.99)),
            now(),
        );
        assert!(!below.is_valid);
        assert_eq!(
            below.error_message.as_deref(),
            Some("Minimum order amount of $100.00 required for this discount code")
        );

        let exact =
            validate_discount_code(Some(&discount), DiscountCheck::for_amount(dec!(100)), now());
        assert!(exact.is_valid);

        // No amount supplied: the minimum cannot be checked and is skipped.
        let preview = validate_discount_code(Some(&discount), DiscountCheck::default(), now());
        assert!(preview.is_valid);
    }

    #[test]
    fn test_program_restriction() {
        let mut discount = code();
        discount.applies_to_program_id = Some("swim".to_string());

        let matching = DiscountCheck {
            order_amount: Some(dec!(80)),
            program_id: Some("swim"),
            class_id: None,
        };
        assert!(validate_discount_code(Some(&discount), matching, now()).is_valid);

        let other = DiscountCheck {
            program_id: Some("chess"),
            ..matching
        };
        let result = validate_discount_code(Some(&discount), other, now());
        assert!(!result.is_valid);
        assert_eq!(
            result.error_message.as_deref(),
            Some("This discount code is not valid for this program")
        );
    }

    #[test]
    fn test_class_restriction() {
        let mut discount = code();
        discount.applies_to_class_id = Some("class-a".to_string());

        let check = DiscountCheck {
            order_amount: Some(dec!(80)),
            program_id: None,
            class_id: Some("class-b"),
        };
        let result = validate_discount_code(Some(&discount), check, now());
        assert!(result.error_message.unwrap().contains("not valid for this class"));
    }

    #[test]
    fn test_first_failure_wins() {
        let mut discount = code();
        discount.is_active = false;
        discount.valid_until = Some(now() - Duration::days(1));
        discount.current_uses = 10;
        let result = validate_discount_code(Some(&discount), DiscountCheck::default(), now());
        assert!(result.error_message.unwrap().contains("no longer active"));
    }
}
