use axum::{Router, extract::State, response::Json, routing::post};

use super::models::{AdminUser, LoginRequest, LoginResponse};
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::features::MessageResponse;
use crate::state::AppState;

/// 管理员只有一个，id 固定
const ADMIN_ID: u64 = 1;

#[utoipa::path(
    post,
    path = "/auth/login",
    summary = "管理员登录",
    description = "用户名与密码需与配置 auth.username / auth.password 完全一致；成功后返回写接口使用的 token。",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "登录成功", body = LoginResponse),
        (status = 401, description = "用户名或密码错误", body = AppError)
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let auth = &state.auth;
    if req.username != auth.username || req.password != auth.password {
        tracing::warn!("登录失败: username={}", req.username);
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    tracing::info!("管理员 {} 登录", auth.username);
    Ok(Json(LoginResponse {
        token: auth.token.clone(),
        user: AdminUser {
            id: ADMIN_ID,
            username: auth.username.clone(),
            email: auth.email.clone(),
        },
    }))
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    summary = "退出登录",
    description = "token 为静态配置，服务端无会话需要清理。",
    responses((status = 200, description = "已退出", body = MessageResponse)),
    tag = "Auth"
)]
pub async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse::new("Logged out successfully"))
}

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}
