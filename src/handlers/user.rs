//! 用户管理的 HTTP 处理器

use crate::{
    auth::AuthenticatedIdentity,
    error::AppError,
    handlers::{auth::validate_user_request, parse_user_id},
    middleware::AppState,
    models::user::*,
};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

/// 获取当前用户资料
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    identity: AuthenticatedIdentity,
) -> Result<impl IntoResponse, AppError> {
    let user = state.user_service.get_profile(identity.subject_id).await?;

    Ok(Json(json!({
        "message": "Profile retrieved successfully",
        "user": user
    })))
}

/// 更新当前用户资料
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    identity: AuthenticatedIdentity,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    apply_update(&state, identity.subject_id, req).await
}

/// 删除当前用户
pub async fn delete_profile(
    State(state): State<Arc<AppState>>,
    identity: AuthenticatedIdentity,
) -> Result<impl IntoResponse, AppError> {
    state.user_service.delete_user(identity.subject_id).await?;

    Ok(Json(json!({"message": "User deleted successfully"})))
}

/// 列出用户
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = Pagination::from(query);
    let users = state.user_service.list_users(page).await?;

    Ok(Json(json!({
        "message": "Users retrieved successfully",
        "count": users.len(),
        "users": users,
        "limit": page.limit,
        "offset": page.offset
    })))
}

/// 创建用户
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    identity: AuthenticatedIdentity,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    validate_user_request(&req)?;

    let user = state.user_service.create_user(req).await?;

    tracing::info!(
        actor_id = identity.subject_id,
        user_id = user.id,
        "User created via management API"
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User created successfully",
            "user": user
        })),
    ))
}

/// 获取用户详情
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = parse_user_id(&id)?;
    let user = state.user_service.get_user(user_id).await?;

    Ok(Json(json!({
        "message": "User retrieved successfully",
        "user": user
    })))
}

/// 更新用户
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = parse_user_id(&id)?;
    let Json(req) = payload?;
    apply_update(&state, user_id, req).await
}

/// 删除用户
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = parse_user_id(&id)?;
    state.user_service.delete_user(user_id).await?;

    Ok(Json(json!({"message": "User deleted successfully"})))
}

async fn apply_update(
    state: &AppState,
    user_id: UserId,
    req: UpdateUserRequest,
) -> Result<Json<serde_json::Value>, AppError> {
    let req = req.normalized();
    req.validate()?;

    let user = state.user_service.update_user(user_id, req).await?;

    Ok(Json(json!({
        "message": "User updated successfully",
        "user": user
    })))
}
