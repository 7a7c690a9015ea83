use crate::catalog::catalog_model::{ChildProfile, ClassOffering};
use crate::errors::Result;

/// Lookups for the class and child records an order refers to.
///
/// Both methods return `Ok(None)` for an unknown id; `Err` is reserved for
/// storage failures.
pub trait CatalogRepositoryTrait: Send + Sync {
    fn get_class_offering(&self, class_id: &str) -> Result<Option<ClassOffering>>;
    fn get_child_profile(&self, child_id: &str) -> Result<Option<ChildProfile>>;
}
