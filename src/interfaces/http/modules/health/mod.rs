//! Health module — liveness and database ping

pub mod handlers;

pub use handlers::*;
