//! Category API handlers
//!
//! Thin wrappers over `CategoryService`.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{CategoryDto, CategoryRequest};
use crate::application::CategoryService;
use crate::interfaces::http::common::{
    domain_error_response, ApiError, ApiResponse, CreatedResponse, ValidatedJson,
};

#[derive(Clone)]
pub struct CategoryHandlerState {
    pub category_service: Arc<CategoryService>,
}

#[utoipa::path(
    get,
    path = "/api/categoria",
    tag = "Categories",
    responses(
        (status = 200, description = "All categories", body = ApiResponse<Vec<CategoryDto>>)
    )
)]
pub async fn list_categories(
    State(state): State<CategoryHandlerState>,
) -> Result<Json<ApiResponse<Vec<CategoryDto>>>, ApiError<Vec<CategoryDto>>> {
    let categories = state
        .category_service
        .list()
        .await
        .map_err(domain_error_response)?;

    Ok(Json(ApiResponse::success(
        categories.into_iter().map(CategoryDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/categoria/{id}",
    tag = "Categories",
    params(("id" = i64, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category details", body = ApiResponse<CategoryDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_category(
    State(state): State<CategoryHandlerState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<CategoryDto>>, ApiError<CategoryDto>> {
    match state.category_service.get_by_id(id).await {
        Ok(Some(category)) => Ok(Json(ApiResponse::success(CategoryDto::from(category)))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Category '{}' not found", id))),
        )),
        Err(e) => Err(domain_error_response(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/categoria",
    tag = "Categories",
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CreatedResponse>),
        (status = 400, description = "Malformed JSON"),
        (status = 409, description = "Category unavailable"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_category(
    State(state): State<CategoryHandlerState>,
    ValidatedJson(request): ValidatedJson<CategoryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedResponse>>), ApiError<CreatedResponse>> {
    let id = state
        .category_service
        .create(request.into())
        .await
        .map_err(domain_error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(CreatedResponse { id })),
    ))
}

#[utoipa::path(
    put,
    path = "/api/categoria/{id}",
    tag = "Categories",
    params(("id" = i64, Path, description = "Category ID")),
    request_body = CategoryRequest,
    responses(
        (status = 204, description = "Category updated"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Category unavailable"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn update_category(
    State(state): State<CategoryHandlerState>,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<CategoryRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .category_service
        .update(id, request.into())
        .await
        .map_err(domain_error_response)?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/categoria/{id}",
    tag = "Categories",
    params(("id" = i64, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_category(
    State(state): State<CategoryHandlerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .category_service
        .delete(id)
        .await
        .map_err(domain_error_response)?;

    Ok(StatusCode::NO_CONTENT)
}
