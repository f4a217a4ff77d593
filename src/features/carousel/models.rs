use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// 轮播图中的一张图片
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarouselImage {
    /// 图片 id（新上传为 UUID；旧数据中的数字 id 读取时转为字符串）
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    #[schema(example = "/uploads/images-1712345678901-123456789.png")]
    pub url: String,
    /// uploads 目录下的文件名，删除时据此清理文件
    pub filename: String,
    #[serde(default)]
    pub original_name: String,
    pub uploaded_at: DateTime<Utc>,
}

fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "invalid carousel image id: {other}"
        ))),
    }
}

/// 核心服务轮播
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Carousel {
    pub id: u64,
    #[schema(example = "核心服务轮播图片")]
    pub title: String,
    #[serde(default)]
    pub images: Vec<CarouselImage>,
    pub is_active: bool,
    pub auto_play: bool,
    /// 自动切换间隔（毫秒）
    #[schema(example = 3000)]
    pub interval: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 轮播设置（浅合并；空 title 与 0 interval 视为未提供）
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCarouselRequest {
    pub title: Option<String>,
    pub is_active: Option<bool>,
    pub auto_play: Option<bool>,
    pub interval: Option<u64>,
}

/// 轮播图片上传表单（multipart/form-data）
#[derive(Debug, utoipa::ToSchema)]
#[allow(dead_code)]
pub struct CarouselUploadForm {
    /// 图片文件（最多 10 个）
    #[schema(value_type = Vec<String>, format = Binary)]
    pub images: Vec<Vec<u8>>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CarouselUploadResponse {
    pub message: String,
    /// 本次新增的图片
    pub images: Vec<CarouselImage>,
    pub carousel: Carousel,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CarouselResponse {
    pub message: String,
    pub carousel: Carousel,
}
