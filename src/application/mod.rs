//! Application layer: use-case services sitting between the HTTP interface
//! and the stores.

pub mod catalog;
pub mod identity;

pub use catalog::CategoryService;
pub use identity::UserService;
