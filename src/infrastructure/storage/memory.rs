//! In-memory storage implementation
//!
//! Implements both store interfaces on `DashMap`s. Unique keys are reserved
//! through secondary indexes with the map's entry API, so two concurrent
//! writers can never both claim the same name. Updates hold the record's
//! entry guard while swapping keys, so racing updates of one id serialize.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::{
    Category, CategoryChanges, CategoryRepositoryInterface, LoginIdentifier, NewCategory,
    NewUser, StoreError, StoreResult, UniqueConstraint, User, UserChanges,
    UserRepositoryInterface,
};

/// In-memory storage for development and testing
pub struct InMemoryStorage {
    categories: DashMap<i64, Category>,
    category_names: DashMap<String, i64>,
    users: DashMap<i64, User>,
    usernames: DashMap<String, i64>,
    emails: DashMap<String, i64>,
    category_counter: AtomicI64,
    user_counter: AtomicI64,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            categories: DashMap::new(),
            category_names: DashMap::new(),
            users: DashMap::new(),
            usernames: DashMap::new(),
            emails: DashMap::new(),
            category_counter: AtomicI64::new(1),
            user_counter: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

/// Claim `key` for `id`. Re-claiming a key the same id already owns is fine.
fn reserve(
    index: &DashMap<String, i64>,
    key: &str,
    id: i64,
    constraint: UniqueConstraint,
) -> StoreResult<()> {
    match index.entry(key.to_string()) {
        Entry::Occupied(owner) if *owner.get() != id => Err(StoreError::unique(constraint)),
        Entry::Occupied(_) => Ok(()),
        Entry::Vacant(slot) => {
            slot.insert(id);
            Ok(())
        }
    }
}

fn release(index: &DashMap<String, i64>, key: &str, id: i64) {
    index.remove_if(key, |_, owner| *owner == id);
}

fn sorted_by_id<T: Clone>(map: &DashMap<i64, T>) -> Vec<T> {
    let mut items: Vec<(i64, T)> = map.iter().map(|e| (*e.key(), e.value().clone())).collect();
    items.sort_by_key(|(id, _)| *id);
    items.into_iter().map(|(_, item)| item).collect()
}

#[async_trait]
impl CategoryRepositoryInterface for InMemoryStorage {
    async fn create_category(&self, category: NewCategory) -> StoreResult<i64> {
        let id = self.category_counter.fetch_add(1, Ordering::SeqCst);
        reserve(
            &self.category_names,
            &category.name,
            id,
            UniqueConstraint::CategoryName,
        )?;

        self.categories.insert(
            id,
            Category {
                id,
                name: category.name,
                created_at: category.created_at,
                edited_at: category.edited_at,
            },
        );
        Ok(id)
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        Ok(sorted_by_id(&self.categories))
    }

    async fn get_category_by_id(&self, id: i64) -> StoreResult<Option<Category>> {
        Ok(self.categories.get(&id).map(|c| c.value().clone()))
    }

    async fn update_category(&self, id: i64, changes: CategoryChanges) -> StoreResult<()> {
        // The record guard is held until the old name is released, so
        // concurrent updates of one id are serialized.
        let mut category = self.categories.get_mut(&id).ok_or(StoreError::NotFound {
            entity: "Category",
            id,
        })?;

        reserve(
            &self.category_names,
            &changes.name,
            id,
            UniqueConstraint::CategoryName,
        )?;

        let old_name = std::mem::replace(&mut category.name, changes.name);
        category.edited_at = changes.edited_at;

        if old_name != category.name {
            release(&self.category_names, &old_name, id);
        }
        Ok(())
    }

    async fn delete_category(&self, id: i64) -> StoreResult<()> {
        let (_, removed) = self.categories.remove(&id).ok_or(StoreError::NotFound {
            entity: "Category",
            id,
        })?;
        release(&self.category_names, &removed.name, id);
        Ok(())
    }
}

#[async_trait]
impl UserRepositoryInterface for InMemoryStorage {
    async fn create_user(&self, user: NewUser) -> StoreResult<i64> {
        let id = self.user_counter.fetch_add(1, Ordering::SeqCst);

        reserve(&self.usernames, &user.username, id, UniqueConstraint::Username)?;
        if let Err(e) = reserve(&self.emails, &user.email, id, UniqueConstraint::Email) {
            release(&self.usernames, &user.username, id);
            return Err(e);
        }

        self.users.insert(
            id,
            User {
                id,
                username: user.username,
                email: user.email,
                password_hash: user.password_hash,
                created_at: user.created_at,
                edited_at: user.edited_at,
            },
        );
        Ok(id)
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(sorted_by_id(&self.users))
    }

    async fn get_user_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.value().clone()))
    }

    async fn find_by_credentials(
        &self,
        identifier: &LoginIdentifier,
        password_hash: &str,
    ) -> StoreResult<Option<User>> {
        let index = match identifier {
            LoginIdentifier::Username(_) => &self.usernames,
            LoginIdentifier::Email(_) => &self.emails,
        };
        let Some(id) = index.get(identifier.value()).map(|e| *e.value()) else {
            return Ok(None);
        };

        Ok(self
            .users
            .get(&id)
            .filter(|u| u.password_hash == password_hash)
            .map(|u| u.value().clone()))
    }

    async fn update_user(&self, id: i64, changes: UserChanges) -> StoreResult<()> {
        // Held across reserve, write and release; a concurrent delete either
        // waits for it or has already removed the record.
        let mut user = self
            .users
            .get_mut(&id)
            .ok_or(StoreError::NotFound { entity: "User", id })?;

        reserve(&self.usernames, &changes.username, id, UniqueConstraint::Username)?;
        if let Err(e) = reserve(&self.emails, &changes.email, id, UniqueConstraint::Email) {
            if user.username != changes.username {
                release(&self.usernames, &changes.username, id);
            }
            return Err(e);
        }

        let old_username = std::mem::replace(&mut user.username, changes.username);
        let old_email = std::mem::replace(&mut user.email, changes.email);
        if let Some(hash) = changes.password_hash {
            user.password_hash = hash;
        }
        user.edited_at = changes.edited_at;

        if old_username != user.username {
            release(&self.usernames, &old_username, id);
        }
        if old_email != user.email {
            release(&self.emails, &old_email, id);
        }
        Ok(())
    }

    async fn delete_user(&self, id: i64) -> StoreResult<()> {
        let (_, removed) = self
            .users
            .remove(&id)
            .ok_or(StoreError::NotFound { entity: "User", id })?;
        release(&self.usernames, &removed.username, id);
        release(&self.emails, &removed.email, id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.into(),
            email: email.into(),
            password_hash: "h".into(),
            created_at: "2024-01-01-00-00-00".into(),
            edited_at: "2024-01-01-00-00-00".into(),
        }
    }

    #[tokio::test]
    async fn failed_email_reservation_frees_the_username() {
        let store = InMemoryStorage::new();
        store.create_user(new_user("ann", "shared@example.com")).await.unwrap();

        let err = store
            .create_user(new_user("ben", "shared@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::unique(UniqueConstraint::Email));

        // "ben" must be claimable again
        store.create_user(new_user("ben", "ben@example.com")).await.unwrap();
    }

    #[tokio::test]
    async fn renamed_category_frees_old_name() {
        let store = InMemoryStorage::new();
        let id = store
            .create_category(NewCategory {
                name: "Old".into(),
                created_at: "c".into(),
                edited_at: "c".into(),
            })
            .await
            .unwrap();
        store
            .update_category(
                id,
                CategoryChanges {
                    name: "New".into(),
                    edited_at: "e".into(),
                },
            )
            .await
            .unwrap();

        store
            .create_category(NewCategory {
                name: "Old".into(),
                created_at: "c".into(),
                edited_at: "c".into(),
            })
            .await
            .unwrap();
        assert_eq!(store.list_categories().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn credentials_must_match_hash() {
        let store = InMemoryStorage::new();
        store.create_user(new_user("cat", "cat@example.com")).await.unwrap();

        let found = store
            .find_by_credentials(&LoginIdentifier::Email("cat@example.com".into()), "h")
            .await
            .unwrap();
        assert!(found.is_some());

        let wrong = store
            .find_by_credentials(&LoginIdentifier::Username("cat".into()), "x")
            .await
            .unwrap();
        assert!(wrong.is_none());
    }

    fn changes(username: &str, email: &str) -> UserChanges {
        UserChanges {
            username: username.into(),
            email: email.into(),
            password_hash: None,
            edited_at: "2024-01-02-00-00-00".into(),
        }
    }

    /// Every index entry must point at a record that currently holds that key.
    fn assert_indexes_consistent(store: &InMemoryStorage) {
        for entry in store.usernames.iter() {
            let user = store.users.get(entry.value()).unwrap();
            assert_eq!(&user.username, entry.key(), "stale username reserved");
        }
        for entry in store.emails.iter() {
            let user = store.users.get(entry.value()).unwrap();
            assert_eq!(&user.email, entry.key(), "stale email reserved");
        }
        assert_eq!(store.usernames.len(), store.users.len());
        assert_eq!(store.emails.len(), store.users.len());
    }

    #[test]
    fn racing_updates_of_one_user_leave_no_stale_keys() {
        let rt = tokio::runtime::Runtime::new().unwrap();

        for round in 0..500 {
            let store = std::sync::Arc::new(InMemoryStorage::new());
            let id = rt
                .block_on(store.create_user(new_user("olga", "olga@example.com")))
                .unwrap();

            let handles: Vec<_> = ["pam", "quinn"]
                .into_iter()
                .map(|name| {
                    let store = store.clone();
                    std::thread::spawn(move || {
                        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
                        rt.block_on(store.update_user(
                            id,
                            changes(name, &format!("{name}@example.com")),
                        ))
                    })
                })
                .collect();
            for h in handles {
                h.join().unwrap().unwrap();
            }

            assert_indexes_consistent(&store);
            let current = rt.block_on(store.get_user_by_id(id)).unwrap().unwrap();
            for name in ["olga", "pam", "quinn"] {
                let found = rt
                    .block_on(
                        store.find_by_credentials(&LoginIdentifier::Username(name.into()), "h"),
                    )
                    .unwrap();
                assert_eq!(
                    found.is_some(),
                    name == current.username,
                    "round {round}: login as {name}"
                );
            }
        }
    }

    #[test]
    fn update_racing_delete_never_leaks_keys() {
        let rt = tokio::runtime::Runtime::new().unwrap();

        for _ in 0..500 {
            let store = std::sync::Arc::new(InMemoryStorage::new());
            let id = rt
                .block_on(store.create_user(new_user("rita", "rita@example.com")))
                .unwrap();

            let updater = {
                let store = store.clone();
                std::thread::spawn(move || {
                    let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
                    rt.block_on(store.update_user(id, changes("sam", "sam@example.com")))
                })
            };
            let deleter = {
                let store = store.clone();
                std::thread::spawn(move || {
                    let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
                    rt.block_on(store.delete_user(id))
                })
            };

            let updated = updater.join().unwrap();
            deleter.join().unwrap().unwrap();

            // either the update ran first or it saw the record gone
            if let Err(e) = updated {
                assert_eq!(e, StoreError::NotFound { entity: "User", id });
            }
            assert!(store.users.is_empty());
            assert!(store.usernames.is_empty());
            assert!(store.emails.is_empty());
        }
    }

    #[tokio::test]
    async fn update_of_missing_user_is_not_found() {
        let store = InMemoryStorage::new();
        let err = store
            .update_user(9, changes("tom", "tom@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::NotFound { entity: "User", id: 9 });
        assert!(store.usernames.is_empty());
    }

    #[test]
    fn racing_category_renames_leave_no_stale_names() {
        let rt = tokio::runtime::Runtime::new().unwrap();

        for _ in 0..500 {
            let store = std::sync::Arc::new(InMemoryStorage::new());
            let id = rt
                .block_on(store.create_category(NewCategory {
                    name: "Lakes".into(),
                    created_at: "c".into(),
                    edited_at: "c".into(),
                }))
                .unwrap();

            let handles: Vec<_> = ["Rivers", "Caves"]
                .into_iter()
                .map(|name| {
                    let store = store.clone();
                    std::thread::spawn(move || {
                        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
                        rt.block_on(store.update_category(
                            id,
                            CategoryChanges {
                                name: name.into(),
                                edited_at: "e".into(),
                            },
                        ))
                    })
                })
                .collect();
            for h in handles {
                h.join().unwrap().unwrap();
            }

            let current = store.categories.get(&id).unwrap().name.clone();
            assert_eq!(store.category_names.len(), 1);
            assert_eq!(*store.category_names.get(&current).unwrap(), id);
        }
    }
}
