use std::collections::HashMap;

use chrono::NaiveDate;

use super::scholarships_model::Scholarship;

/// Picks the scholarship that applies to each child of one guardian.
///
/// Built once per order. A child-specific grant wins over the guardian-wide
/// grant; when several grants compete for the same slot the first one in the
/// input order is kept.
#[derive(Debug, Clone, Default)]
pub struct ScholarshipResolver {
    by_child: HashMap<String, Scholarship>,
    user_level: Option<Scholarship>,
}

impl ScholarshipResolver {
    /// Partitions `scholarships`, dropping any that are not eligible on `as_of`.
    pub fn new(scholarships: Vec<Scholarship>, as_of: NaiveDate) -> Self {
        let mut resolver = ScholarshipResolver::default();
        for scholarship in scholarships
            .into_iter()
            .filter(|s| s.is_eligible_on(as_of))
        {
            match scholarship.child_id.clone() {
                Some(child_id) => {
                    resolver.by_child.entry(child_id).or_insert(scholarship);
                }
                None => {
                    if resolver.user_level.is_none() {
                        resolver.user_level = Some(scholarship);
                    }
                }
            }
        }
        resolver
    }

    pub fn for_child(&self, child_id: &str) -> Option<&Scholarship> {
        self.by_child
            .get(child_id)
            .or(self.user_level.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn grant(id: &str, child_id: Option<&str>, pct: Decimal) -> Scholarship {
        Scholarship {
            id: id.to_string(),
            user_id: "u-1".to_string(),
            child_id: child_id.map(str::to_string),
            scholarship_type: format!("Grant {}", id),
            discount_percentage: pct,
            valid_until: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()
    }

    #[test]
    fn test_child_specific_wins_over_user_level() {
        let resolver = ScholarshipResolver::new(
            vec![grant("user", None, dec!(10)), grant("kid", Some("c-1"), dec!(50))],
            today(),
        );
        assert_eq!(resolver.for_child("c-1").unwrap().id, "kid");
        assert_eq!(resolver.for_child("c-2").unwrap().id, "user");
    }

    #[test]
    fn test_no_scholarships() {
        let resolver = ScholarshipResolver::new(Vec::new(), today());
        assert!(resolver.for_child("c-1").is_none());
    }

    #[test]
    fn test_ineligible_grants_are_dropped() {
        let mut expired = grant("kid", Some("c-1"), dec!(50));
        expired.valid_until = Some(today().pred_opt().unwrap());
        let resolver = ScholarshipResolver::new(
            vec![expired, grant("user", None, dec!(10))],
            today(),
        );
        assert_eq!(resolver.for_child("c-1").unwrap().id, "user");
    }

    #[test]
    fn test_first_grant_wins_per_slot() {
        let resolver = ScholarshipResolver::new(
            vec![
                grant("a", Some("c-1"), dec!(20)),
                grant("b", Some("c-1"), dec!(80)),
                grant("u1", None, dec!(5)),
                grant("u2", None, dec!(15)),
            ],
            today(),
        );
        assert_eq!(resolver.for_child("c-1").unwrap().id, "a");
        assert_eq!(resolver.for_child("c-9").unwrap().id, "u1");
    }
}
