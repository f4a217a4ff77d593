use axum::{Router, response::Json, routing::post};
use serde::Deserialize;

use crate::extract::JsonBody;
use crate::features::MessageResponse;
use crate::state::AppState;

/// 官网留言表单
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// 感兴趣的服务
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub message: String,
}

#[utoipa::path(
    post,
    path = "/contact",
    summary = "提交留言",
    description = "留言只写入日志，不做持久化。无需登录。",
    request_body = ContactRequest,
    responses((status = 200, description = "已收到", body = MessageResponse)),
    tag = "Contact"
)]
pub async fn submit_contact(JsonBody(req): JsonBody<ContactRequest>) -> Json<MessageResponse> {
    tracing::info!(
        name = %req.name,
        email = %req.email,
        phone = %req.phone,
        service = %req.service,
        "收到官网留言: {}",
        req.message
    );
    Json(MessageResponse::new("感谢您的留言，我们会尽快与您联系！"))
}

pub fn create_contact_router() -> Router<AppState> {
    Router::new().route("/contact", post(submit_contact))
}
