//! Category service — application-layer orchestration
//!
//! Stamps timestamps, delegates to the category store and turns uniqueness
//! violations into a caller-safe conflict.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{
    Category, CategoryChanges, CategoryRepositoryInterface, DomainError, DomainResult,
    NewCategory, StoreError,
};
use crate::shared::SharedClock;

pub const CATEGORY_UNAVAILABLE: &str = "Category unavailable";

/// Validated category payload coming from the HTTP layer.
#[derive(Debug, Clone)]
pub struct CategoryInput {
    pub name: String,
}

pub struct CategoryService {
    repo: Arc<dyn CategoryRepositoryInterface>,
    clock: SharedClock,
}

impl CategoryService {
    pub fn new(repo: Arc<dyn CategoryRepositoryInterface>, clock: SharedClock) -> Self {
        Self { repo, clock }
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn list(&self) -> DomainResult<Vec<Category>> {
        Ok(self.repo.list_categories().await?)
    }

    pub async fn get_by_id(&self, id: i64) -> DomainResult<Option<Category>> {
        Ok(self.repo.get_category_by_id(id).await?)
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Create a category; both stamps get the same instant.
    pub async fn create(&self, input: CategoryInput) -> DomainResult<i64> {
        let now = self.clock.stamp();
        let category = NewCategory {
            name: input.name,
            created_at: now.clone(),
            edited_at: now,
        };

        let id = self
            .repo
            .create_category(category)
            .await
            .map_err(translate_conflict)?;

        info!(category_id = id, "Category created");
        Ok(id)
    }

    /// Update a category; only the edit stamp moves.
    pub async fn update(&self, id: i64, input: CategoryInput) -> DomainResult<()> {
        let changes = CategoryChanges {
            name: input.name,
            edited_at: self.clock.stamp(),
        };

        self.repo
            .update_category(id, changes)
            .await
            .map_err(translate_conflict)?;

        info!(category_id = id, "Category updated");
        Ok(())
    }

    /// Store errors are passed through as-is.
    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        self.repo.delete_category(id).await?;
        info!(category_id = id, "Category deleted");
        Ok(())
    }
}

fn translate_conflict(err: StoreError) -> DomainError {
    match err {
        StoreError::UniqueViolation(violation) => {
            debug!(constraint = %violation.constraint, "Category write rejected");
            DomainError::conflict(CATEGORY_UNAVAILABLE)
        }
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryStorage;
    use crate::shared::{is_valid_stamp, FixedClock, SystemClock};
    use chrono::NaiveDate;

    fn clock_at(h: u32, m: u32, s: u32) -> SharedClock {
        let naive = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap();
        Arc::new(FixedClock::at(naive).unwrap())
    }

    fn input(name: &str) -> CategoryInput {
        CategoryInput { name: name.into() }
    }

    #[tokio::test]
    async fn create_stamps_equal_timestamps() {
        let store = Arc::new(InMemoryStorage::new());
        let service = CategoryService::new(store, Arc::new(SystemClock));

        let id = service.create(input("Beaches")).await.unwrap();
        let category = service.get_by_id(id).await.unwrap().unwrap();

        assert_eq!(category.name, "Beaches");
        assert_eq!(category.created_at, category.edited_at);
        assert!(is_valid_stamp(&category.created_at));
    }

    #[tokio::test]
    async fn duplicate_name_is_category_unavailable() {
        let store = Arc::new(InMemoryStorage::new());
        let service = CategoryService::new(store, Arc::new(SystemClock));

        service.create(input("Museums")).await.unwrap();
        let err = service.create(input("Museums")).await.unwrap_err();

        assert_eq!(err, DomainError::Conflict(CATEGORY_UNAVAILABLE.into()));
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_moves_only_the_edit_stamp() {
        let store = Arc::new(InMemoryStorage::new());
        let id = CategoryService::new(store.clone(), clock_at(8, 0, 0))
            .create(input("Parks"))
            .await
            .unwrap();

        let later = CategoryService::new(store, clock_at(9, 30, 15));
        later.update(id, input("City parks")).await.unwrap();

        let category = later.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(category.name, "City parks");
        assert_eq!(category.created_at, "2024-05-01-08-00-00");
        assert_eq!(category.edited_at, "2024-05-01-09-30-15");
    }

    #[tokio::test]
    async fn update_into_taken_name_is_category_unavailable() {
        let store = Arc::new(InMemoryStorage::new());
        let service = CategoryService::new(store, Arc::new(SystemClock));
        service.create(input("Food")).await.unwrap();
        let id = service.create(input("Drinks")).await.unwrap();

        let err = service.update(id, input("Food")).await.unwrap_err();
        assert_eq!(err.to_string(), CATEGORY_UNAVAILABLE);
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let store = Arc::new(InMemoryStorage::new());
        let service = CategoryService::new(store, Arc::new(SystemClock));

        let err = service.update(42, input("Ghost")).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Category", .. }));
    }

    #[tokio::test]
    async fn delete_passes_store_errors_through() {
        let store = Arc::new(InMemoryStorage::new());
        let service = CategoryService::new(store, Arc::new(SystemClock));
        let id = service.create(input("Hiking")).await.unwrap();

        service.delete(id).await.unwrap();
        assert!(service.get_by_id(id).await.unwrap().is_none());

        let err = service.delete(id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
