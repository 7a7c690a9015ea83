use crate::errors::Result;
use crate::scholarships::scholarships_model::{NewScholarship, Scholarship};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Trait for scholarship repository operations
#[async_trait]
pub trait ScholarshipRepositoryTrait: Send + Sync {
    /// Active grants for `user_id` that have not expired before `as_of`.
    fn get_active_scholarships_for_user(
        &self,
        user_id: &str,
        as_of: NaiveDate,
    ) -> Result<Vec<Scholarship>>;
    async fn create_scholarship(&self, new_scholarship: NewScholarship) -> Result<Scholarship>;
    async fn set_scholarship_active(&self, id: &str, is_active: bool) -> Result<Scholarship>;
}

/// Trait for scholarship service operations
#[async_trait]
pub trait ScholarshipServiceTrait: Send + Sync {
    fn active_scholarships_for_user(
        &self,
        user_id: &str,
        as_of: NaiveDate,
    ) -> Result<Vec<Scholarship>>;
    async fn create_scholarship(&self, new_scholarship: NewScholarship) -> Result<Scholarship>;
    async fn deactivate_scholarship(&self, id: &str) -> Result<Scholarship>;
}
