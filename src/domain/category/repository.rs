use async_trait::async_trait;

use super::{Category, CategoryChanges, NewCategory};
use crate::domain::StoreResult;

#[async_trait]
pub trait CategoryRepositoryInterface: Send + Sync {
    /// Returns the id assigned by the store.
    async fn create_category(&self, category: NewCategory) -> StoreResult<i64>;

    async fn list_categories(&self) -> StoreResult<Vec<Category>>;
    async fn get_category_by_id(&self, id: i64) -> StoreResult<Option<Category>>;

    /// `StoreError::NotFound` when `id` does not exist.
    async fn update_category(&self, id: i64, changes: CategoryChanges) -> StoreResult<()>;
    /// `StoreError::NotFound` when `id` does not exist.
    async fn delete_category(&self, id: i64) -> StoreResult<()>;
}
