use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, EntityTrait, QueryOrder, Set,
};

use crate::domain::{
    Category, CategoryChanges, CategoryRepositoryInterface, NewCategory, StoreError, StoreResult,
};
use crate::infrastructure::database::constraint::{store_err, update_err};
use crate::infrastructure::database::entities::category;

pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn category_model_to_domain(model: category::Model) -> Category {
    Category {
        id: model.id,
        name: model.name,
        created_at: model.created_at,
        edited_at: model.edited_at,
    }
}

fn not_found(id: i64) -> StoreError {
    StoreError::NotFound {
        entity: "Category",
        id,
    }
}

#[async_trait]
impl CategoryRepositoryInterface for CategoryRepository {
    async fn create_category(&self, new: NewCategory) -> StoreResult<i64> {
        let model = category::ActiveModel {
            id: NotSet,
            name: Set(new.name),
            created_at: Set(new.created_at),
            edited_at: Set(new.edited_at),
        };

        let result = category::Entity::insert(model)
            .exec(&self.db)
            .await
            .map_err(store_err)?;

        Ok(result.last_insert_id)
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let models = category::Entity::find()
            .order_by_asc(category::Column::Id)
            .all(&self.db)
            .await
            .map_err(store_err)?;

        Ok(models.into_iter().map(category_model_to_domain).collect())
    }

    async fn get_category_by_id(&self, id: i64) -> StoreResult<Option<Category>> {
        let model = category::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(store_err)?;

        Ok(model.map(category_model_to_domain))
    }

    async fn update_category(&self, id: i64, changes: CategoryChanges) -> StoreResult<()> {
        let existing = category::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(store_err)?
            .ok_or_else(|| not_found(id))?;

        let mut active: category::ActiveModel = existing.into();
        active.name = Set(changes.name);
        active.edited_at = Set(changes.edited_at);
        active
            .update(&self.db)
            .await
            .map_err(update_err("Category", id))?;

        Ok(())
    }

    async fn delete_category(&self, id: i64) -> StoreResult<()> {
        let result = category::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(store_err)?;

        if result.rows_affected == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }
}
