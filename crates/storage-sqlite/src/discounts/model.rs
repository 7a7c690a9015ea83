//! Database models for discount codes.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::errors::StorageError;
use crate::utils::{format_timestamp, parse_decimal, parse_timestamp};
use enrollwise_core::discounts::{DiscountCode, NewDiscountCode};

/// Database model for discount codes
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::discount_codes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DiscountCodeDB {
    pub id: String,
    pub code: String,
    pub discount_type: String,
    pub discount_value: String,
    pub valid_from: String,
    pub valid_until: Option<String>,
    pub max_uses: Option<i32>,
    pub current_uses: i32,
    pub max_uses_per_user: Option<i32>,
    pub min_order_amount: Option<String>,
    pub applies_to_program_id: Option<String>,
    pub applies_to_class_id: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Administrator-editable columns. Usage counters and creation time are
/// never part of an edit.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::discount_codes)]
#[diesel(treat_none_as_null = true)]
pub struct DiscountCodeChangesDB {
    pub code: String,
    pub discount_type: String,
    pub discount_value: String,
    pub valid_from: String,
    pub valid_until: Option<String>,
    pub max_uses: Option<i32>,
    pub max_uses_per_user: Option<i32>,
    pub min_order_amount: Option<String>,
    pub applies_to_program_id: Option<String>,
    pub applies_to_class_id: Option<String>,
    pub is_active: bool,
    pub updated_at: String,
}

impl DiscountCodeDB {
    pub fn from_new(id: String, new_code: NewDiscountCode, now: DateTime<Utc>) -> Self {
        let timestamp = format_timestamp(&now);
        Self {
            id,
            code: new_code.code,
            discount_type: new_code.discount_type.as_str().to_string(),
            discount_value: new_code.discount_value.to_string(),
            valid_from: format_timestamp(&new_code.valid_from),
            valid_until: new_code.valid_until.as_ref().map(format_timestamp),
            max_uses: new_code.max_uses,
            current_uses: 0,
            max_uses_per_user: new_code.max_uses_per_user,
            min_order_amount: new_code.min_order_amount.map(|d| d.to_string()),
            applies_to_program_id: new_code.applies_to_program_id,
            applies_to_class_id: new_code.applies_to_class_id,
            is_active: new_code.is_active,
            created_at: timestamp.clone(),
            updated_at: timestamp,
        }
    }
}

impl DiscountCodeChangesDB {
    pub fn from_update(update: NewDiscountCode, now: DateTime<Utc>) -> Self {
        Self {
            code: update.code,
            discount_type: update.discount_type.as_str().to_string(),
            discount_value: update.discount_value.to_string(),
            valid_from: format_timestamp(&update.valid_from),
            valid_until: update.valid_until.as_ref().map(format_timestamp),
            max_uses: update.max_uses,
            max_uses_per_user: update.max_uses_per_user,
            min_order_amount: update.min_order_amount.map(|d| d.to_string()),
            applies_to_program_id: update.applies_to_program_id,
            applies_to_class_id: update.applies_to_class_id,
            is_active: update.is_active,
            updated_at: format_timestamp(&now),
        }
    }
}

impl TryFrom<DiscountCodeDB> for DiscountCode {
    type Error = StorageError;

    fn try_from(db: DiscountCodeDB) -> Result<Self, Self::Error> {
        let discount_type = db.discount_type.parse().map_err(|_| {
            StorageError::CorruptValue(format!(
                "discount_codes.discount_type '{}'",
                db.discount_type
            ))
        })?;

        Ok(Self {
            discount_type,
            discount_value: parse_decimal(&db.discount_value, "discount_codes.discount_value")?,
            valid_from: parse_timestamp(&db.valid_from, "discount_codes.valid_from")?,
            valid_until: db
                .valid_until
                .as_deref()
                .map(|v| parse_timestamp(v, "discount_codes.valid_until"))
                .transpose()?,
            min_order_amount: db
                .min_order_amount
                .as_deref()
                .map(|v| parse_decimal(v, "discount_codes.min_order_amount"))
                .transpose()?,
            created_at: parse_timestamp(&db.created_at, "discount_codes.created_at")?,
            updated_at: parse_timestamp(&db.updated_at, "discount_codes.updated_at")?,
            id: db.id,
            code: db.code,
            max_uses: db.max_uses,
            current_uses: db.current_uses,
            max_uses_per_user: db.max_uses_per_user,
            applies_to_program_id: db.applies_to_program_id,
            applies_to_class_id: db.applies_to_class_id,
            is_active: db.is_active,
        })
    }
}
