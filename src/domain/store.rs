//! Entity store error model
//!
//! Repositories report failures through [`StoreError`]. A broken uniqueness
//! rule is reported as a structured [`UniqueViolation`] so callers can
//! `match` on the constraint that fired.

use std::fmt;

use thiserror::Error;

/// Unique constraints declared by the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniqueConstraint {
    CategoryName,
    Username,
    Email,
    /// The store reported a uniqueness violation it could not attribute.
    Unknown,
}

impl UniqueConstraint {
    /// Every constraint the schema knows by name.
    pub const KNOWN: [UniqueConstraint; 3] = [
        UniqueConstraint::CategoryName,
        UniqueConstraint::Username,
        UniqueConstraint::Email,
    ];

    /// Index name used by the migrations.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CategoryName => "uq_categories_name",
            Self::Username => "uq_users_username",
            Self::Email => "uq_users_email",
            Self::Unknown => "unknown",
        }
    }

    pub fn table(&self) -> Option<&'static str> {
        match self {
            Self::CategoryName => Some("categories"),
            Self::Username | Self::Email => Some("users"),
            Self::Unknown => None,
        }
    }

    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            Self::CategoryName => &["name"],
            Self::Username => &["username"],
            Self::Email => &["email"],
            Self::Unknown => &[],
        }
    }
}

impl fmt::Display for UniqueConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which uniqueness rule a write broke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueViolation {
    pub constraint: UniqueConstraint,
    pub fields: Vec<String>,
}

impl UniqueViolation {
    pub fn new(constraint: UniqueConstraint) -> Self {
        Self {
            constraint,
            fields: constraint.fields().iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl fmt::Display for UniqueViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unique constraint {} violated", self.constraint)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{0}")]
    UniqueViolation(UniqueViolation),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("{0}")]
    Backend(String),
}

impl StoreError {
    pub fn unique(constraint: UniqueConstraint) -> Self {
        Self::UniqueViolation(UniqueViolation::new(constraint))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
