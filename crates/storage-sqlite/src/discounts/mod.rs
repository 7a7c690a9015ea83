//! SQLite storage implementation for discount codes and their usage ledger.

mod model;
mod repository;

pub use model::{DiscountCodeChangesDB, DiscountCodeDB};
pub use repository::DiscountCodeRepository;
