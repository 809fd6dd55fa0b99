use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::domain::{
    LoginIdentifier, NewUser, StoreError, StoreResult, User, UserChanges,
    UserRepositoryInterface,
};
use crate::infrastructure::database::constraint::{store_err, update_err};
use crate::infrastructure::database::entities::user;

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        created_at: model.created_at,
        edited_at: model.edited_at,
    }
}

fn not_found(id: i64) -> StoreError {
    StoreError::NotFound { entity: "User", id }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for UserRepository {
    async fn create_user(&self, new: NewUser) -> StoreResult<i64> {
        let model = user::ActiveModel {
            id: NotSet,
            username: Set(new.username),
            email: Set(new.email),
            password_hash: Set(new.password_hash),
            created_at: Set(new.created_at),
            edited_at: Set(new.edited_at),
        };

        let result = user::Entity::insert(model)
            .exec(&self.db)
            .await
            .map_err(store_err)?;

        Ok(result.last_insert_id)
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let models = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(store_err)?;

        Ok(models.into_iter().map(user_model_to_domain).collect())
    }

    async fn get_user_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(store_err)?;

        Ok(model.map(user_model_to_domain))
    }

    async fn find_by_credentials(
        &self,
        identifier: &LoginIdentifier,
        password_hash: &str,
    ) -> StoreResult<Option<User>> {
        let by_identifier = match identifier {
            LoginIdentifier::Username(username) => user::Column::Username.eq(username.as_str()),
            LoginIdentifier::Email(email) => user::Column::Email.eq(email.as_str()),
        };

        let model = user::Entity::find()
            .filter(by_identifier)
            .filter(user::Column::PasswordHash.eq(password_hash))
            .one(&self.db)
            .await
            .map_err(store_err)?;

        Ok(model.map(user_model_to_domain))
    }

    async fn update_user(&self, id: i64, changes: UserChanges) -> StoreResult<()> {
        let existing = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(store_err)?
            .ok_or_else(|| not_found(id))?;

        let mut active: user::ActiveModel = existing.into();
        active.username = Set(changes.username);
        active.email = Set(changes.email);
        if let Some(hash) = changes.password_hash {
            active.password_hash = Set(hash);
        }
        active.edited_at = Set(changes.edited_at);
        active
            .update(&self.db)
            .await
            .map_err(update_err("User", id))?;

        Ok(())
    }

    async fn delete_user(&self, id: i64) -> StoreResult<()> {
        let result = user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(store_err)?;

        if result.rows_affected == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }
}
