//! 认证相关的 HTTP 处理器

use crate::{
    error::AppError,
    middleware::AppState,
    models::{auth::LoginRequest, user::UserRequest},
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

/// 注册
pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    validate_user_request(&req)?;

    let user = state.user_service.register(req).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User registered successfully",
            "user": user
        })),
    ))
}

/// 登录
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;

    if req.email.is_empty() || req.password.is_empty() {
        return Err(AppError::BadRequest(
            "Email and password are required".to_string(),
        ));
    }

    let response = state.user_service.login(req).await?;

    Ok(Json(json!({
        "message": "Login successful",
        "token": response.token,
        "user": response.user
    })))
}

/// 注册与创建用户共用的入参校验
pub(crate) fn validate_user_request(req: &UserRequest) -> Result<(), AppError> {
    if !req.has_required_fields() {
        return Err(AppError::BadRequest(
            "Name, email, and password are required".to_string(),
        ));
    }
    req.validate()?;
    Ok(())
}
