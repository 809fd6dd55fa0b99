use serde::{Deserialize, Serialize};

/// A tourism-spot category as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    /// `yyyy-MM-dd-HH-mm-ss`
    pub created_at: String,
    /// `yyyy-MM-dd-HH-mm-ss`
    pub edited_at: String,
}

/// Insert payload, already stamped by the service.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub created_at: String,
    pub edited_at: String,
}

/// Update payload. The creation stamp is never part of an update.
#[derive(Debug, Clone)]
pub struct CategoryChanges {
    pub name: String,
    pub edited_at: String,
}
