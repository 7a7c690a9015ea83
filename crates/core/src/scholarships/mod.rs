//! Scholarships module - models, resolver, and services.

mod scholarships_model;
mod scholarships_resolver;
mod scholarships_service;
mod scholarships_traits;

pub use scholarships_model::{NewScholarship, Scholarship};
pub use scholarships_resolver::ScholarshipResolver;
pub use scholarships_service::ScholarshipService;
pub use scholarships_traits::{ScholarshipRepositoryTrait, ScholarshipServiceTrait};
