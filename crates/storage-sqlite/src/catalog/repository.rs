use std::sync::Arc;

use diesel::prelude::*;
use diesel::SqliteConnection;

use super::model::{ChildProfileDB, ClassOfferingDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{child_profiles, class_offerings};
use enrollwise_core::catalog::{CatalogRepositoryTrait, ChildProfile, ClassOffering};
use enrollwise_core::Result;

/// Read access for pricing plus upserts used when syncing the catalog in.
pub struct CatalogRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CatalogRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CatalogRepository { pool, writer }
    }

    pub async fn upsert_class_offering(&self, class: ClassOffering) -> Result<ClassOffering> {
        let class_db: ClassOfferingDB = class.clone().into();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::insert_into(class_offerings::table)
                    .values(&class_db)
                    .on_conflict(class_offerings::id)
                    .do_update()
                    .set(&class_db)
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await?;
        Ok(class)
    }

    pub async fn upsert_child_profile(&self, child: ChildProfile) -> Result<ChildProfile> {
        let child_db: ChildProfileDB = child.clone().into();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::insert_into(child_profiles::table)
                    .values(&child_db)
                    .on_conflict(child_profiles::id)
                    .do_update()
                    .set(&child_db)
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await?;
        Ok(child)
    }
}

impl CatalogRepositoryTrait for CatalogRepository {
    fn get_class_offering(&self, class_id: &str) -> Result<Option<ClassOffering>> {
        let mut conn = get_connection(&self.pool)?;
        let class_db = class_offerings::table
            .find(class_id)
            .select(ClassOfferingDB::as_select())
            .first::<ClassOfferingDB>(&mut conn)
            .optional()
            .into_core()?;
        class_db
            .map(|db| ClassOffering::try_from(db).map_err(Into::into))
            .transpose()
    }

    fn get_child_profile(&self, child_id: &str) -> Result<Option<ChildProfile>> {
        let mut conn = get_connection(&self.pool)?;
        let child_db = child_profiles::table
            .find(child_id)
            .select(ChildProfileDB::as_select())
            .first::<ChildProfileDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(child_db.map(ChildProfile::from))
    }
}
