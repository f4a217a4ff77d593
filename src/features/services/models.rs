use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 海报模板类型
///
/// 竖版/横版/九宫格为多图模板，使用 `posterImages`；
/// 其他取值（含 `single` 与未知值）按单图模板处理，使用 `posterImage`。
/// 未知值原样保存，读写数据文件时不会被改写。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TemplateType {
    #[default]
    Vertical,
    Horizontal,
    Grid,
    Single,
    Other(String),
}

impl TemplateType {
    pub fn as_str(&self) -> &str {
        match self {
            TemplateType::Vertical => "vertical",
            TemplateType::Horizontal => "horizontal",
            TemplateType::Grid => "grid",
            TemplateType::Single => "single",
            TemplateType::Other(raw) => raw,
        }
    }

    pub fn is_multi_image(&self) -> bool {
        matches!(
            self,
            TemplateType::Vertical | TemplateType::Horizontal | TemplateType::Grid
        )
    }
}

impl From<String> for TemplateType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "vertical" => TemplateType::Vertical,
            "horizontal" => TemplateType::Horizontal,
            "grid" => TemplateType::Grid,
            "single" => TemplateType::Single,
            _ => TemplateType::Other(raw),
        }
    }
}

impl From<TemplateType> for String {
    fn from(t: TemplateType) -> Self {
        match t {
            TemplateType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for TemplateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 核心服务
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    #[schema(value_type = String, example = "vertical")]
    pub template_type: TemplateType,
    #[serde(default)]
    pub features: Vec<String>,
    /// 单图模板的海报 URL
    #[serde(default)]
    pub poster_image: Option<String>,
    /// 多图模板的海报 URL 列表（有序）
    #[serde(default)]
    pub poster_images: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub order: i64,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

impl Service {
    /// 按模板类型设置海报，并清空非当前模板使用的字段。
    ///
    /// 多图模板：`existing ++ uploaded`；单图模板：优先取第一张新上传，其次第一张保留图。
    pub fn apply_posters(&mut self, existing: Vec<String>, uploaded: Vec<String>) {
        if self.template_type.is_multi_image() {
            let mut images = existing;
            images.extend(uploaded);
            self.poster_images = images;
            self.poster_image = None;
        } else {
            self.poster_image = uploaded.into_iter().next().or_else(|| existing.into_iter().next());
            self.poster_images = Vec::new();
        }
    }

    /// 切换模板后，把当前生效的图片迁移到新模板使用的字段上
    pub fn normalize_posters(&mut self) {
        let current: Vec<String> = self
            .poster_image
            .take()
            .into_iter()
            .chain(std::mem::take(&mut self.poster_images))
            .collect();
        self.apply_posters(current, Vec::new());
    }

    /// 当前展示的第一张海报
    pub fn primary_poster(&self) -> Option<&str> {
        self.poster_image
            .as_deref()
            .or_else(|| self.poster_images.first().map(String::as_str))
    }
}

/// 新建服务
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    #[schema(value_type = Option<String>, example = "single")]
    pub template_type: Option<TemplateType>,
    pub features: Option<Vec<String>>,
    pub is_active: Option<bool>,
    pub order: Option<i64>,
}

/// 编辑服务（未提供或为空的字段保持原值；海报只能通过海报接口修改）
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    #[schema(value_type = Option<String>, example = "single")]
    pub template_type: Option<TemplateType>,
    pub features: Option<Vec<String>>,
    pub is_active: Option<bool>,
    pub order: Option<i64>,
}

/// 海报上传表单（multipart/form-data）
#[derive(Debug, utoipa::ToSchema)]
#[allow(dead_code)]
pub struct PosterUploadForm {
    /// 需要保留的已有图片 URL，JSON 数组字符串
    #[schema(example = r#"["/uploads/posters-1-2.png"]"#)]
    pub existing_images: Option<String>,
    /// 新上传的海报文件（最多 10 个）
    #[schema(value_type = Vec<String>, format = Binary)]
    pub posters: Vec<Vec<u8>>,
}

/// 海报更新结果
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PosterUpdateResponse {
    pub message: String,
    pub service: Service,
    pub poster_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(template_type: TemplateType) -> Service {
        Service {
            id: 1,
            title: "t".into(),
            description: String::new(),
            icon: String::new(),
            template_type,
            features: Vec::new(),
            poster_image: Some("/uploads/old.png".into()),
            poster_images: vec!["/uploads/old-list.png".into()],
            is_active: true,
            order: 1,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn urls(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn unknown_template_types_are_single_image_and_kept_verbatim() {
        let t: TemplateType = serde_json::from_str("\"carousel\"").expect("parse");
        assert_eq!(t, TemplateType::Other("carousel".into()));
        assert!(!t.is_multi_image());
        assert_eq!(serde_json::to_string(&t).expect("serialize"), "\"carousel\"");

        let t: TemplateType = serde_json::from_str("\"grid\"").expect("parse");
        assert_eq!(t, TemplateType::Grid);
        assert_eq!(serde_json::to_string(&t).expect("serialize"), "\"grid\"");
    }

    #[test]
    fn stored_unknown_template_survives_a_rewrite() {
        let raw = r#"{"id":9,"title":"t","templateType":"Card","isActive":true,"order":1,
            "createdAt":"2024-01-05T00:00:00Z"}"#;
        let s: Service = serde_json::from_str(raw).expect("parse");
        let v = serde_json::to_value(&s).expect("serialize");
        assert_eq!(v["templateType"], "Card");
    }

    #[test]
    fn multi_image_templates_concatenate_existing_then_new() {
        for t in [TemplateType::Vertical, TemplateType::Horizontal, TemplateType::Grid] {
            let mut s = service(t);
            s.apply_posters(urls(&["/a", "/b"]), urls(&["/c"]));
            assert_eq!(s.poster_images, urls(&["/a", "/b", "/c"]));
            assert_eq!(s.poster_image, None);
        }
    }

    #[test]
    fn single_template_prefers_new_upload_then_existing() {
        let mut s = service(TemplateType::Single);
        s.apply_posters(urls(&["/keep"]), urls(&["/new1", "/new2"]));
        assert_eq!(s.poster_image.as_deref(), Some("/new1"));
        assert!(s.poster_images.is_empty());

        s.apply_posters(urls(&["/keep"]), Vec::new());
        assert_eq!(s.poster_image.as_deref(), Some("/keep"));

        s.apply_posters(Vec::new(), Vec::new());
        assert_eq!(s.poster_image, None);
    }

    #[test]
    fn normalize_moves_images_to_active_field() {
        let mut s = service(TemplateType::Grid);
        s.poster_image = Some("/single.png".into());
        s.poster_images = Vec::new();
        s.normalize_posters();
        assert_eq!(s.poster_images, urls(&["/single.png"]));
        assert_eq!(s.poster_image, None);

        s.template_type = TemplateType::Single;
        s.poster_images = urls(&["/x", "/y"]);
        s.normalize_posters();
        assert_eq!(s.poster_image.as_deref(), Some("/x"));
        assert!(s.poster_images.is_empty());
    }

    #[test]
    fn legacy_records_without_poster_fields_still_parse() {
        let raw = r#"{"id":3,"title":"校企合作","description":"d","icon":"Award",
            "features":["课程共建"],"posterImage":null,"isActive":true,"order":3,
            "createdAt":"2024-01-05T00:00:00Z"}"#;
        let s: Service = serde_json::from_str(raw).expect("parse");
        assert_eq!(s.template_type, TemplateType::Vertical);
        assert!(s.poster_images.is_empty());
        assert_eq!(s.primary_poster(), None);
    }
}
