//! Attribution of driver-level uniqueness failures
//!
//! Drivers only report a violated unique index as text. This is the one place
//! that reads that text; it recognizes the indexes created by the migrations,
//! either by index name (PostgreSQL, MySQL) or by `table.column` (SQLite), and
//! hands the rest of the crate a structured [`UniqueViolation`].

use sea_orm::{DbErr, SqlErr};

use crate::domain::{StoreError, UniqueConstraint, UniqueViolation};

/// Match a driver message against the known unique constraints.
pub fn classify_unique_violation(message: &str) -> UniqueViolation {
    let constraint = UniqueConstraint::KNOWN
        .into_iter()
        .find(|c| mentions(message, *c))
        .unwrap_or(UniqueConstraint::Unknown);

    UniqueViolation::new(constraint)
}

fn mentions(message: &str, constraint: UniqueConstraint) -> bool {
    if message.contains(constraint.name()) {
        return true;
    }

    let Some(table) = constraint.table() else {
        return false;
    };
    constraint
        .fields()
        .iter()
        .all(|field| message.contains(&format!("{table}.{field}")))
}

/// Map a SeaORM error onto the store error model.
pub fn store_err(e: DbErr) -> StoreError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) => {
            StoreError::UniqueViolation(classify_unique_violation(&message))
        }
        _ => StoreError::Backend(format!("Database error: {}", e)),
    }
}

/// Like [`store_err`], for the write half of a read-then-update. A row
/// deleted in between makes SeaORM report `RecordNotUpdated`.
pub fn update_err(entity: &'static str, id: i64) -> impl Fn(DbErr) -> StoreError {
    move |e| match e {
        DbErr::RecordNotUpdated => StoreError::NotFound { entity, id },
        other => store_err(other),
    }
}
