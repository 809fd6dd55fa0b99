//! Category DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::catalog::CategoryInput;
use crate::domain::Category;

/// Category API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": 1,
    "name": "Beaches",
    "created_at": "2024-05-01-08-00-00",
    "edited_at": "2024-05-01-08-00-00"
}))]
pub struct CategoryDto {
    pub id: i64,
    pub name: String,
    /// `yyyy-MM-dd-HH-mm-ss`
    pub created_at: String,
    /// `yyyy-MM-dd-HH-mm-ss`
    pub edited_at: String,
}

impl From<Category> for CategoryDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            created_at: c.created_at,
            edited_at: c.edited_at,
        }
    }
}

/// Create / update category request. Timestamps are assigned by the server.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({"name": "Beaches"}))]
pub struct CategoryRequest {
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub name: String,
}

impl From<CategoryRequest> for CategoryInput {
    fn from(r: CategoryRequest) -> Self {
        Self { name: r.name }
    }
}
