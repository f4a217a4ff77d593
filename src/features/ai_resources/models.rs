use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// AI 工具/资源导航条目
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AiResource {
    pub id: u64,
    #[schema(example = "ChatGPT")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    #[schema(example = "对话AI")]
    pub category: String,
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AiResourceRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub url: Option<String>,
    pub is_active: Option<bool>,
}
