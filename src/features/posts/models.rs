use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::features::uploads::flexible_bool;

/// 新闻动态（博客文章）
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub content: String,
    #[serde(default)]
    #[schema(example = "XUELONG AI")]
    pub author: String,
    #[serde(default)]
    pub published: bool,
    /// 配图 URL
    #[serde(default)]
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// 新建/编辑文章；JSON 或 multipart 均可，multipart 时可附带 `image` 文件
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    /// 接受布尔值或 "true"/"false"
    #[serde(default, deserialize_with = "flexible_bool")]
    #[schema(value_type = Option<bool>)]
    pub published: Option<bool>,
}
