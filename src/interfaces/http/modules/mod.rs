//! HTTP resource modules: DTOs and handlers per resource

pub mod categories;
pub mod health;
pub mod metrics;
pub mod request_id;
pub mod users;
