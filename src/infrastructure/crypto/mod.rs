pub mod password;

pub use password::Sha256Hasher;
