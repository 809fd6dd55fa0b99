//! Infrastructure layer - external concerns

pub mod crypto;
pub mod database;
pub mod storage;

pub use crypto::Sha256Hasher;
pub use database::repositories::{CategoryRepository, UserRepository};
pub use database::{init_database, DatabaseConfig};
pub use storage::InMemoryStorage;
