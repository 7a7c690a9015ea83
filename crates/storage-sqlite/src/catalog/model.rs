//! Database models for the catalog.

use diesel::prelude::*;

use crate::errors::StorageError;
use crate::utils::parse_decimal;
use enrollwise_core::catalog::{ChildProfile, ClassOffering};

/// Database model for class offerings
#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::class_offerings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ClassOfferingDB {
    pub id: String,
    pub name: String,
    pub price: String,
    pub program_id: String,
}

/// Database model for child profiles
#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::child_profiles)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ChildProfileDB {
    pub id: String,
    pub full_name: String,
    pub user_id: String,
}

impl TryFrom<ClassOfferingDB> for ClassOffering {
    type Error = StorageError;

    fn try_from(db: ClassOfferingDB) -> Result<Self, Self::Error> {
        Ok(Self {
            price: parse_decimal(&db.price, "class_offerings.price")?,
            id: db.id,
            name: db.name,
            program_id: db.program_id,
        })
    }
}

impl From<ClassOffering> for ClassOfferingDB {
    fn from(domain: ClassOffering) -> Self {
        Self {
            id: domain.id,
            name: domain.name,
            price: domain.price.to_string(),
            program_id: domain.program_id,
        }
    }
}

impl From<ChildProfileDB> for ChildProfile {
    fn from(db: ChildProfileDB) -> Self {
        Self {
            id: db.id,
            full_name: db.full_name,
            user_id: db.user_id,
        }
    }
}

impl From<ChildProfile> for ChildProfileDB {
    fn from(domain: ChildProfile) -> Self {
        Self {
            id: domain.id,
            full_name: domain.full_name,
            user_id: domain.user_id,
        }
    }
}
