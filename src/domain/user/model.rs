use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Output of the credential hasher, never the plaintext.
    pub password_hash: String,
    pub created_at: String,
    pub edited_at: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: String,
    pub edited_at: String,
}

#[derive(Debug, Clone)]
pub struct UserChanges {
    pub username: String,
    pub email: String,
    /// `None` keeps the stored hash.
    pub password_hash: Option<String>,
    pub edited_at: String,
}
