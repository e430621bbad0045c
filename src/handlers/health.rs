//! 健康检查与服务信息处理器
//! 提供 /、/health 和 /api/v1/version 端点

use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

const SERVICE_NAME: &str = env!("CARGO_PKG_NAME");
const API_VERSION: &str = "1.0.0";

/// 存活探针响应
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// 存活探针
/// 快速响应，不检查依赖
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// 根路径：欢迎信息与端点索引
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the user service API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health",
            "auth": "/api/auth/*",
            "profile": "/api/profile",
            "users": "/api/users",
            "versioned_api": "/api/v1/*",
            "api_version": "/api/v1/version"
        }
    }))
}

/// API 版本信息
pub async fn version() -> Json<Value> {
    Json(json!({
        "api_version": API_VERSION,
        "service": SERVICE_NAME,
        "status": "active",
        "features": ["user_management", "jwt_authentication", "crud_operations"]
    }))
}
