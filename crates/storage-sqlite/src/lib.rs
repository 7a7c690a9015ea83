//! SQLite storage implementation for Enrollwise.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `enrollwise-core` and contains:
//! - Database connection pooling and management
//! - Embedded Diesel migrations
//! - Repository implementations for the catalog, discount codes and scholarships
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! The pricing engine in `core` works with traits only.
//!
//! ```text
//!        core (pricing)
//!              │
//!              ▼
//!   storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```
//!
//! All writes go through a single writer task ([`WriteHandle`]), each in an
//! immediate transaction. Reads use the connection pool directly.

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod catalog;
pub mod discounts;
pub mod scholarships;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, open, run_migrations, spawn_writer,
    DbConnection, DbPool, WriteHandle,
};

// Re-export repositories
pub use catalog::CatalogRepository;
pub use discounts::DiscountCodeRepository;
pub use scholarships::ScholarshipRepository;

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from enrollwise-core for convenience
pub use enrollwise_core::errors::{DatabaseError, Error, Result};
