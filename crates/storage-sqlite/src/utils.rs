//! Conversions between domain values and their SQLite text columns.
//!
//! Money and percentages are stored as decimal strings so no binary floating
//! point is ever involved. Timestamps are RFC 3339 in UTC and dates are
//! `YYYY-MM-DD`, both of which sort correctly as text.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rust_decimal::Decimal;

use crate::errors::StorageError;

pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse_timestamp(value: &str, field: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::CorruptValue(format!("{} '{}': {}", field, value, e)))
}

pub fn format_date(value: &NaiveDate) -> String {
    value.format("%Y-%m-%d").to_string()
}

pub fn parse_date(value: &str, field: &str) -> Result<NaiveDate, StorageError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| StorageError::CorruptValue(format!("{} '{}': {}", field, value, e)))
}

pub fn parse_decimal(value: &str, field: &str) -> Result<Decimal, StorageError> {
    Decimal::from_str(value)
        .map_err(|e| StorageError::CorruptValue(format!("{} '{}': {}", field, value, e)))
}
