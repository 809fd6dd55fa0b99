use async_trait::async_trait;

use super::{LoginIdentifier, NewUser, User, UserChanges};
use crate::domain::StoreResult;

#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    /// Returns the id assigned by the store.
    async fn create_user(&self, user: NewUser) -> StoreResult<i64>;

    async fn list_users(&self) -> StoreResult<Vec<User>>;
    async fn get_user_by_id(&self, id: i64) -> StoreResult<Option<User>>;

    /// The user whose identifier field matches and whose stored hash equals
    /// `password_hash`.
    async fn find_by_credentials(
        &self,
        identifier: &LoginIdentifier,
        password_hash: &str,
    ) -> StoreResult<Option<User>>;

    /// `StoreError::NotFound` when `id` does not exist.
    async fn update_user(&self, id: i64, changes: UserChanges) -> StoreResult<()>;
    /// `StoreError::NotFound` when `id` does not exist.
    async fn delete_user(&self, id: i64) -> StoreResult<()>;
}
