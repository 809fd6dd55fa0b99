//! Category aggregate
//!
//! Contains the Category entity, write models, and repository interface.

pub mod model;
pub mod repository;

pub use model::{Category, CategoryChanges, NewCategory};
pub use repository::CategoryRepositoryInterface;
