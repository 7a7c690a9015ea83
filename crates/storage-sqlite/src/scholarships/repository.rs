use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use super::model::ScholarshipDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::scholarships;
use crate::schema::scholarships::dsl::*;
use crate::utils::format_date;
use enrollwise_core::errors::{DatabaseError, Error, Result};
use enrollwise_core::scholarships::{NewScholarship, Scholarship, ScholarshipRepositoryTrait};

pub struct ScholarshipRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ScholarshipRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ScholarshipRepository { pool, writer }
    }
}

fn load_by_id(conn: &mut SqliteConnection, grant_id: &str) -> Result<Scholarship> {
    let row = scholarships
        .find(grant_id)
        .select(ScholarshipDB::as_select())
        .first::<ScholarshipDB>(conn)
        .optional()
        .into_core()?
        .ok_or_else(|| {
            Error::Database(DatabaseError::NotFound(format!(
                "Scholarship {} not found",
                grant_id
            )))
        })?;
    Scholarship::try_from(row).map_err(Into::into)
}

#[async_trait]
impl ScholarshipRepositoryTrait for ScholarshipRepository {
    fn get_active_scholarships_for_user(
        &self,
        guardian_id: &str,
        as_of: NaiveDate,
    ) -> Result<Vec<Scholarship>> {
        let mut conn = get_connection(&self.pool)?;
        // Dates are stored as YYYY-MM-DD, so text comparison is date order.
        let rows = scholarships
            .filter(user_id.eq(guardian_id))
            .filter(is_active.eq(true))
            .filter(
                valid_until
                    .is_null()
                    .or(valid_until.assume_not_null().ge(format_date(&as_of))),
            )
            .order((created_at.asc(), id.asc()))
            .select(ScholarshipDB::as_select())
            .load::<ScholarshipDB>(&mut conn)
            .into_core()?;

        rows.into_iter()
            .map(|row| Scholarship::try_from(row).map_err(Into::into))
            .collect()
    }

    async fn create_scholarship(&self, grant: NewScholarship) -> Result<Scholarship> {
        let grant_id = grant
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let row = ScholarshipDB::from_new(grant_id.clone(), grant, Utc::now());

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Scholarship> {
                diesel::insert_into(scholarships::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                load_by_id(conn, &grant_id)
            })
            .await
    }

    async fn set_scholarship_active(&self, grant_id: &str, active: bool) -> Result<Scholarship> {
        let grant_id = grant_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Scholarship> {
                diesel::update(scholarships.find(grant_id.as_str()))
                    .set(is_active.eq(active))
                    .execute(conn)
                    .into_core()?;
                load_by_id(conn, &grant_id)
            })
            .await
    }
}
