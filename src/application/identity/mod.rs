//! Identity module — user management & authentication
//!
//! Contains the `UserService` which orchestrates registration, profile
//! updates, deletion and login.

pub mod service;

pub use service::{
    RegisterUser, UpdateUser, UserService, EMAIL_ALREADY_REGISTERED, ERROR_REGISTERING_USER,
    USERNAME_UNAVAILABLE,
};
