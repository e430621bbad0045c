//! HTTP 处理器模块

pub mod auth;
pub mod health;
pub mod user;

use crate::error::AppError;
use crate::models::user::UserId;

/// 解析路径中的用户 ID
pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, AppError> {
    raw.parse::<UserId>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::BadRequest("Invalid user ID".to_string()))
}
