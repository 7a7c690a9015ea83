//! SQLite storage implementation for classes and children.

mod model;
mod repository;

pub use model::{ChildProfileDB, ClassOfferingDB};
pub use repository::CatalogRepository;
