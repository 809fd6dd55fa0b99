//! User API handlers
//!
//! Registration, profile maintenance and login.
//! Delegates to `UserService` from the application/identity layer.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{CreateUserRequest, LoginRequest, UpdateUserRequest, UserDto};
use crate::application::UserService;
use crate::domain::LoginIdentifier;
use crate::interfaces::http::common::{
    domain_error_response, ApiError, ApiResponse, CreatedResponse, ValidatedJson,
};

#[derive(Clone)]
pub struct UserHandlerState {
    pub user_service: Arc<UserService>,
}

#[utoipa::path(
    get,
    path = "/api/usuario",
    tag = "Users",
    responses(
        (status = 200, description = "User list", body = ApiResponse<Vec<UserDto>>)
    )
)]
pub async fn list_users(
    State(state): State<UserHandlerState>,
) -> Result<Json<ApiResponse<Vec<UserDto>>>, ApiError<Vec<UserDto>>> {
    let users = state
        .user_service
        .list()
        .await
        .map_err(domain_error_response)?;

    Ok(Json(ApiResponse::success(
        users.into_iter().map(UserDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/usuario/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = ApiResponse<UserDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_user(
    State(state): State<UserHandlerState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError<UserDto>> {
    match state.user_service.get_by_id(id).await {
        Ok(Some(user)) => Ok(Json(ApiResponse::success(UserDto::from(user)))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("User '{}' not found", id))),
        )),
        Err(e) => Err(domain_error_response(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/usuario",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User registered", body = ApiResponse<CreatedResponse>),
        (status = 400, description = "Malformed JSON"),
        (status = 409, description = "Username or email already taken"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_user(
    State(state): State<UserHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedResponse>>), ApiError<CreatedResponse>> {
    let id = state
        .user_service
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
    path = "/api/usuario/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 204, description = "User updated"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Username or email already taken"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn update_user(
    State(state): State<UserHandlerState>,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .user_service
        .update(id, request.into())
        .await
        .map_err(domain_error_response)?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/usuario/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_user(
    State(state): State<UserHandlerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .user_service
        .delete(id)
        .await
        .map_err(domain_error_response)?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/usuario/login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<UserDto>),
        (status = 400, description = "Malformed JSON"),
        (status = 401, description = "Invalid username or password")
    )
)]
pub async fn login(
    State(state): State<UserHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError<UserDto>> {
    let identifier =
        LoginIdentifier::from_fields(request.username.as_deref(), request.email.as_deref());

    let user = state
        .user_service
        .login(identifier, request.password.as_deref())
        .await
        .map_err(domain_error_response)?;

    Ok(Json(ApiResponse::success(UserDto::from(user))))
}
