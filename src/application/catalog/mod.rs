//! Catalog module — category management

pub mod service;

pub use service::{CategoryInput, CategoryService, CATEGORY_UNAVAILABLE};
