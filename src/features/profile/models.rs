use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 公司基本信息
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    pub id: u64,
    #[schema(example = "XUELONG AI")]
    pub name: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub slogan: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    pub updated_at: DateTime<Utc>,
}

/// 创始人信息
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FounderInfo {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// 照片 URL（站内静态资源或 /uploads 下的上传文件）
    #[serde(default)]
    pub photo: String,
    pub updated_at: DateTime<Utc>,
}

/// 公司简介（按段落存储）
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyIntro {
    pub id: u64,
    #[serde(default)]
    pub paragraphs: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompanyRequest {
    pub name: Option<String>,
    pub subtitle: Option<String>,
    pub slogan: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// 编辑创始人信息；multipart 提交时可附带 `photo` 文件，优先于 `photo` 文本字段
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFounderRequest {
    pub name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub photo: Option<String>,
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIntroRequest {
    pub paragraphs: Option<Vec<String>>,
}
