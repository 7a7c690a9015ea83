mod model;
mod repository;

pub use model::ScholarshipDB;
pub use repository::ScholarshipRepository;
