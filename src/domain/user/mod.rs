//! User aggregate
//!
//! Contains the User entity, write models, login identifier, and repository
//! interface.

pub mod login;
pub mod model;
pub mod repository;

pub use login::LoginIdentifier;
pub use model::{NewUser, User, UserChanges};
pub use repository::UserRepositoryInterface;
