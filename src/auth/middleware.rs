//! JWT 认证中间件

use crate::auth::{claims::AuthenticatedIdentity, error::AuthError, jwt::TokenCodec};
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

const BEARER_PREFIX: &str = "Bearer ";

/// 从 Authorization 头提取 Bearer 令牌
///
/// The scheme is matched literally: `Bearer` followed by exactly one space.
pub fn extract_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingCredential)?
        .to_str()
        .map_err(|_| AuthError::MalformedHeader)?;

    let token = value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthError::MalformedHeader)?;

    if token.is_empty() {
        return Err(AuthError::MissingCredential);
    }

    Ok(token)
}

/// 验证请求并返回已认证身份
pub fn authenticate(codec: &TokenCodec, headers: &HeaderMap) -> Result<AuthenticatedIdentity, AuthError> {
    let token = extract_token(headers)?;
    let claims = codec.validate(token)?;

    Ok(AuthenticatedIdentity::from(claims))
}

/// JWT 认证中间件 - 必须认证
///
/// Rejections end the pipeline with a 401; the downstream handler never runs.
pub async fn jwt_auth_middleware(
    State(codec): State<Arc<TokenCodec>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let identity = match authenticate(&codec, req.headers()) {
        Ok(identity) => identity,
        Err(e) => {
            metrics::counter!("auth_rejections_total", "reason" => e.reason()).increment(1);
            tracing::warn!(
                reason = e.reason(),
                uri = %req.uri(),
                "Rejected unauthenticated request"
            );
            return Err(e);
        }
    };

    tracing::debug!(subject_id = identity.subject_id, "Request authenticated");

    // 附加到请求扩展
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
