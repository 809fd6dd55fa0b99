//! Domain layer: entities, write models, store error model and the ports the
//! services depend on.

pub mod category;
pub mod ports;
pub mod store;
pub mod user;

pub use category::{Category, CategoryChanges, CategoryRepositoryInterface, NewCategory};
pub use ports::{CredentialHasher, CryptoError};
pub use store::{StoreError, StoreResult, UniqueConstraint, UniqueViolation};
pub use user::{LoginIdentifier, NewUser, User, UserChanges, UserRepositoryInterface};

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::{DomainError, DomainResult};
