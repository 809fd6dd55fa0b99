//! Database entities module

pub mod category;
pub mod user;

pub use category::Entity as Category;
pub use user::Entity as User;
