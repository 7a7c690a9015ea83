//! Catalog module - read-only class and child records consumed by pricing.

mod catalog_model;
mod catalog_traits;

pub use catalog_model::{ChildProfile, ClassOffering};
pub use catalog_traits::CatalogRepositoryTrait;
