use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use uuid::Uuid;

use super::model::{DiscountCodeChangesDB, DiscountCodeDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::discount_codes;
use crate::schema::discount_codes::dsl::*;
use crate::utils::format_timestamp;
use enrollwise_core::discounts::{
    DiscountCode, DiscountCodeRepositoryTrait, NewDiscountCode, UsageIncrement,
};
use enrollwise_core::errors::{DatabaseError, Error, Result};

pub struct DiscountCodeRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl DiscountCodeRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        DiscountCodeRepository { pool, writer }
    }
}

fn not_found(code_id: &str) -> Error {
    Error::Database(DatabaseError::NotFound(format!(
        "Discount code {} not found",
        code_id
    )))
}

fn load_by_id(conn: &mut SqliteConnection, code_id: &str) -> Result<DiscountCode> {
    let row = discount_codes
        .find(code_id)
        .select(DiscountCodeDB::as_select())
        .first::<DiscountCodeDB>(conn)
        .optional()
        .into_core()?
        .ok_or_else(|| not_found(code_id))?;
    DiscountCode::try_from(row).map_err(Into::into)
}

fn into_domain(rows: Vec<DiscountCodeDB>) -> Result<Vec<DiscountCode>> {
    rows.into_iter()
        .map(|row| DiscountCode::try_from(row).map_err(Into::into))
        .collect()
}

#[async_trait]
impl DiscountCodeRepositoryTrait for DiscountCodeRepository {
    fn get_discount_code(&self, lookup: &str) -> Result<Option<DiscountCode>> {
        let mut conn = get_connection(&self.pool)?;
        let row = discount_codes
            .filter(code.eq(lookup))
            .select(DiscountCodeDB::as_select())
            .first::<DiscountCodeDB>(&mut conn)
            .optional()
            .into_core()?;
        row.map(|r| DiscountCode::try_from(r).map_err(Into::into))
            .transpose()
    }

    fn get_discount_code_by_id(&self, code_id: &str) -> Result<DiscountCode> {
        let mut conn = get_connection(&self.pool)?;
        load_by_id(&mut conn, code_id)
    }

    fn list_discount_codes(&self) -> Result<Vec<DiscountCode>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = discount_codes
            .select(DiscountCodeDB::as_select())
            .order((created_at.desc(), code.asc()))
            .load::<DiscountCodeDB>(&mut conn)
            .into_core()?;
        into_domain(rows)
    }

    async fn create_discount_code(&self, new_code: NewDiscountCode) -> Result<DiscountCode> {
        let new_id = new_code
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let row = DiscountCodeDB::from_new(new_id.clone(), new_code, Utc::now());

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<DiscountCode> {
                diesel::insert_into(discount_codes::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                load_by_id(conn, &new_id)
            })
            .await
    }

    async fn update_discount_code(
        &self,
        code_id: &str,
        update: NewDiscountCode,
    ) -> Result<DiscountCode> {
        let code_id = code_id.to_string();
        let changes = DiscountCodeChangesDB::from_update(update, Utc::now());

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<DiscountCode> {
                let affected = diesel::update(discount_codes.find(code_id.as_str()))
                    .set(&changes)
                    .execute(conn)
                    .into_core()?;
                if affected == 0 {
                    return Err(not_found(&code_id));
                }
                load_by_id(conn, &code_id)
            })
            .await
    }

    async fn set_discount_code_active(&self, code_id: &str, active: bool) -> Result<DiscountCode> {
        let code_id = code_id.to_string();
        let now = format_timestamp(&Utc::now());

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<DiscountCode> {
                let affected = diesel::update(discount_codes.find(code_id.as_str()))
                    .set((is_active.eq(active), updated_at.eq(now)))
                    .execute(conn)
                    .into_core()?;
                if affected == 0 {
                    return Err(not_found(&code_id));
                }
                load_by_id(conn, &code_id)
            })
            .await
    }

    async fn increment_usage(&self, code_id: &str) -> Result<UsageIncrement> {
        let code_id = code_id.to_string();
        let now = format_timestamp(&Utc::now());

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<UsageIncrement> {
                // The limit check and the write are one statement.
                let affected = diesel::update(
                    discount_codes
                        .filter(id.eq(code_id.as_str()))
                        .filter(
                            max_uses
                                .is_null()
                                .or(max_uses.assume_not_null().gt(current_uses)),
                        ),
                )
                .set((current_uses.eq(current_uses + 1), updated_at.eq(now)))
                .execute(conn)
                .into_core()?;

                let stored = load_by_id(conn, &code_id)?;
                if affected == 1 {
                    debug!(
                        "Discount code {} usage is now {}",
                        stored.code, stored.current_uses
                    );
                    Ok(UsageIncrement::Applied {
                        current_uses: stored.current_uses,
                    })
                } else {
                    Ok(UsageIncrement::LimitReached {
                        max_uses: stored.max_uses.unwrap_or(stored.current_uses),
                    })
                }
            })
            .await
    }
}
