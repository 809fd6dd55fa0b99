use thiserror::Error;

use crate::domain::StoreError;

/// Caller-facing errors produced by the application services.
///
/// The `Display` text of every variant except `Storage` is safe to hand to an
/// HTTP client as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// A uniqueness rule was broken; carries the translated message.
    #[error("{0}")]
    Conflict(String),

    /// Credential hashing failed; carries the hasher's own message.
    #[error("{0}")]
    Crypto(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }
}

/// Untranslated pass-through used where a service does not shield store
/// errors (deletes, reads).
impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => DomainError::NotFound {
                entity,
                field: "id",
                value: id.to_string(),
            },
            StoreError::UniqueViolation(violation) => DomainError::Conflict(format!(
                "Unique constraint {} violated",
                violation.constraint.name()
            )),
            StoreError::Backend(msg) => DomainError::Storage(msg),
        }
    }
}

/// Result type for service operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{UniqueConstraint, UniqueViolation};

    #[test]
    fn invalid_credentials_message_is_fixed() {
        assert_eq!(
            DomainError::InvalidCredentials.to_string(),
            "Invalid username or password"
        );
    }

    #[test]
    fn conflict_displays_message_verbatim() {
        assert_eq!(
            DomainError::conflict("Category unavailable").to_string(),
            "Category unavailable"
        );
    }

    #[test]
    fn store_not_found_keeps_the_id() {
        let err: DomainError = StoreError::NotFound {
            entity: "Category",
            id: 7,
        }
        .into();
        assert_eq!(
            err,
            DomainError::NotFound {
                entity: "Category",
                field: "id",
                value: "7".into()
            }
        );
    }

    #[test]
    fn store_unique_violation_names_the_constraint() {
        let err: DomainError =
            StoreError::UniqueViolation(UniqueViolation::new(UniqueConstraint::Email)).into();
        assert_eq!(err.to_string(), "Unique constraint uq_users_email violated");
    }
}
