//! User DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::identity::{RegisterUser, UpdateUser};
use crate::domain::User;

/// User API representation. The password hash is never exposed.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: String,
    pub edited_at: String,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            created_at: u.created_at,
            edited_at: u.edited_at,
        }
    }
}

/// Register user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "username": "alice",
    "email": "alice@example.com",
    "password": "s3cret-pass"
}))]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 50, message = "username must be 3-50 characters"))]
    pub username: String,
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, max = 128, message = "password must be 6-128 characters"))]
    pub password: String,
}

impl From<CreateUserRequest> for RegisterUser {
    fn from(r: CreateUserRequest) -> Self {
        Self {
            username: r.username,
            email: r.email,
            password: r.password,
        }
    }
}

/// Update user request. Omit `password` to keep the current one.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, max = 50, message = "username must be 3-50 characters"))]
    pub username: String,
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, max = 128, message = "password must be 6-128 characters"))]
    pub password: Option<String>,
}

impl From<UpdateUserRequest> for UpdateUser {
    fn from(r: UpdateUserRequest) -> Self {
        Self {
            username: r.username,
            email: r.email,
            password: r.password,
        }
    }
}

/// Login request: `username` or `email`, plus `password`.
///
/// Every field is optional and carries no rules, so incomplete forms are
/// answered with the same 401 as wrong credentials. Malformed bodies are
/// still rejected with the 400 envelope by `ValidatedJson`.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[schema(example = json!({"username": "alice", "password": "s3cret-pass"}))]
pub struct LoginRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}
