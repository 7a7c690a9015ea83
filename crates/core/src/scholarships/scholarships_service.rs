use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::info;

use super::scholarships_model::{NewScholarship, Scholarship};
use super::scholarships_traits::{ScholarshipRepositoryTrait, ScholarshipServiceTrait};
use crate::errors::Result;

pub struct ScholarshipService {
    repository: Arc<dyn ScholarshipRepositoryTrait>,
}

impl ScholarshipService {
    pub fn new(repository: Arc<dyn ScholarshipRepositoryTrait>) -> Self {
        ScholarshipService { repository }
    }
}

#[async_trait]
impl ScholarshipServiceTrait for ScholarshipService {
    fn active_scholarships_for_user(
        &self,
        user_id: &str,
        as_of: NaiveDate,
    ) -> Result<Vec<Scholarship>> {
        // Storage already filters, but the eligibility rule is owned here.
        Ok(self
            .repository
            .get_active_scholarships_for_user(user_id, as_of)?
            .into_iter()
            .filter(|s| s.is_eligible_on(as_of))
            .collect())
    }

    async fn create_scholarship(&self, new_scholarship: NewScholarship) -> Result<Scholarship> {
        new_scholarship.validate()?;
        let created = self.repository.create_scholarship(new_scholarship).await?;
        info!(
            "Granted {} scholarship {} to user {}",
            created.scholarship_type, created.id, created.user_id
        );
        Ok(created)
    }

    async fn deactivate_scholarship(&self, id: &str) -> Result<Scholarship> {
        self.repository.set_scholarship_active(id, false).await
    }
}
