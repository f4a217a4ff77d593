use axum::{
    extract::{Request, State},
    http::{HeaderMap, Method, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::state::AppState;

/// 从 Authorization 头中取出 Bearer token
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let raw = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Authentication required".into()))?
        .trim();
    let token = raw
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Authorization must use the Bearer scheme".into()))?
        .trim();
    if token.is_empty() {
        return Err(AppError::Unauthorized("Bearer token is empty".into()));
    }
    Ok(token)
}

fn is_read_only(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

/// 写接口保护：非只读方法必须携带登录接口下发的 token。
///
/// 以 `route_layer` 挂在内容路由上，登录、退出与留言表单不经过此中间件。
pub async fn require_write_token(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    if !state.auth.protect_writes || is_read_only(req.method()) {
        return next.run(req).await;
    }

    let verdict = extract_bearer_token(req.headers()).and_then(|token| {
        if token == state.auth.token {
            Ok(())
        } else {
            tracing::warn!("写请求 token 无效: {} {}", req.method(), req.uri().path());
            Err(AppError::Unauthorized("Invalid token".into()))
        }
    });

    match verdict {
        Ok(()) => next.run(req).await,
        Err(e) => e.into_response(),
    }
}
