//! # Turistae catalog service
//!
//! REST backend for a tourism catalog: spot categories and user accounts.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: entities, store interfaces and the structured store errors
//! - **application**: category and user services
//! - **infrastructure**: SeaORM persistence, in-memory store, password hashing
//! - **interfaces**: axum REST API with Swagger documentation
//! - **shared**: domain errors, clock, shutdown coordination

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::{init_database, DatabaseConfig};

pub use interfaces::http::create_api_router;
