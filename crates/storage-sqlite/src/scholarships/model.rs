//! Database model for scholarships.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::errors::StorageError;
use crate::utils::{format_date, format_timestamp, parse_date, parse_decimal, parse_timestamp};
use enrollwise_core::scholarships::{NewScholarship, Scholarship};

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::scholarships)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ScholarshipDB {
    pub id: String,
    pub user_id: String,
    pub child_id: Option<String>,
    pub scholarship_type: String,
    pub discount_percentage: String,
    pub valid_until: Option<String>,
    pub is_active: bool,
    pub created_at: String,
}

impl ScholarshipDB {
    pub fn from_new(id: String, grant: NewScholarship, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: grant.user_id,
            child_id: grant.child_id,
            scholarship_type: grant.scholarship_type,
            discount_percentage: grant.discount_percentage.to_string(),
            valid_until: grant.valid_until.as_ref().map(format_date),
            is_active: grant.is_active,
            created_at: format_timestamp(&now),
        }
    }
}

impl TryFrom<ScholarshipDB> for Scholarship {
    type Error = StorageError;

    fn try_from(db: ScholarshipDB) -> Result<Self, Self::Error> {
        Ok(Self {
            discount_percentage: parse_decimal(
                &db.discount_percentage,
                "scholarships.discount_percentage",
            )?,
            valid_until: db
                .valid_until
                .as_deref()
                .map(|v| parse_date(v, "scholarships.valid_until"))
                .transpose()?,
            created_at: parse_timestamp(&db.created_at, "scholarships.created_at")?,
            id: db.id,
            user_id: db.user_id,
            child_id: db.child_id,
            scholarship_type: db.scholarship_type,
            is_active: db.is_active,
        })
    }
}
