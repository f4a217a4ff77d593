pub mod ai_resources;
pub mod auth;
pub mod carousel;
pub mod contact;
pub mod dashboard;
pub mod health;
pub mod news;
pub mod partners;
pub mod posts;
pub mod profile;
pub mod services;
pub mod uploads;

use serde::Serialize;

/// 只携带提示文本的响应（删除、登出等）
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Service deleted successfully")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// 非空时覆盖原值（管理端会把未修改的字段以空串提交）
pub(crate) fn assign_non_empty(target: &mut String, value: Option<String>) {
    if let Some(v) = value.filter(|v| !v.trim().is_empty()) {
        *target = v;
    }
}
