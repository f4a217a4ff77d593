use axum::{
    Json,
    extract::{FromRequest, Multipart, Request, multipart::MultipartError},
    http::{StatusCode, header},
};
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::{Map, Value};

use super::store::{StoredFile, UploadStore};
use crate::error::AppError;

/// 允许上传文件的表单字段及其数量上限
#[derive(Debug, Clone, Copy)]
pub struct FileField {
    pub name: &'static str,
    pub max_count: usize,
}

impl FileField {
    pub const fn new(name: &'static str, max_count: usize) -> Self {
        Self { name, max_count }
    }
}

/// 解析后的 multipart 表单：文本字段 + 已落盘的文件
#[derive(Debug, Default)]
pub struct UploadForm {
    pub fields: Map<String, Value>,
    pub files: Vec<StoredFile>,
}

impl UploadForm {
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    pub fn files_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a StoredFile> + 'a {
        self.files.iter().filter(move |f| f.field == field)
    }

    pub fn first_file(&self, field: &str) -> Option<&StoredFile> {
        self.files.iter().find(|f| f.field == field)
    }
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Upload exceeds the request size limit".into())
    } else {
        AppError::BadRequest(format!("Invalid multipart body: {}", e.body_text()))
    }
}

/// 读取整个 multipart 请求；任一步失败都会清理本次已写入的文件。
pub async fn collect_form(
    mut multipart: Multipart,
    uploads: &UploadStore,
    file_fields: &[FileField],
) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();
    if let Err(e) = read_fields(&mut multipart, uploads, file_fields, &mut form).await {
        uploads.remove_all(&form.files).await;
        return Err(e);
    }
    Ok(form)
}

async fn read_fields(
    multipart: &mut Multipart,
    uploads: &UploadStore,
    file_fields: &[FileField],
    form: &mut UploadForm,
) -> Result<(), AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        if let Some(spec) = file_fields.iter().find(|f| f.name == name) {
            let original_name = field.file_name().unwrap_or_default().to_string();
            let data = field.bytes().await.map_err(multipart_error)?;
            // 浏览器在未选择文件时会提交空文件名的空字段
            if original_name.is_empty() && data.is_empty() {
                continue;
            }
            if form.files_for(spec.name).count() >= spec.max_count {
                return Err(AppError::BadRequest(format!(
                    "Too many files for field '{}' (max {})",
                    spec.name, spec.max_count
                )));
            }
            let stored = uploads.save(spec.name, &original_name, &data).await?;
            form.files.push(stored);
        } else if field.file_name().is_some() {
            return Err(AppError::BadRequest(format!(
                "Unexpected file field '{name}'"
            )));
        } else {
            let text = field.text().await.map_err(multipart_error)?;
            form.fields.insert(name, Value::String(text));
        }
    }
    Ok(())
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.trim_start().starts_with("multipart/form-data"))
}

/// 同一接口既接受 JSON 也接受 multipart（管理端两种方式都会用）。
///
/// multipart 的文本字段按字符串反序列化到 `T`，文件落盘后随表单返回；
/// JSON 请求返回空表单。
pub async fn read_submission<T: DeserializeOwned>(
    req: Request,
    uploads: &UploadStore,
    file_fields: &[FileField],
) -> Result<(T, UploadForm), AppError> {
    if !is_multipart(&req) {
        let Json(body) = Json::<T>::from_request(req, &()).await?;
        return Ok((body, UploadForm::default()));
    }

    let multipart = Multipart::from_request(req, &())
        .await
        .map_err(|rej| AppError::BadRequest(rej.body_text()))?;
    let mut form = collect_form(multipart, uploads, file_fields).await?;
    let fields = std::mem::take(&mut form.fields);
    match serde_json::from_value::<T>(Value::Object(fields.clone())) {
        Ok(body) => {
            form.fields = fields;
            Ok((body, form))
        }
        Err(e) => {
            uploads.remove_all(&form.files).await;
            Err(AppError::BadRequest(format!("Invalid form fields: {e}")))
        }
    }
}

/// 接受 JSON 布尔值或表单里的 "true"/"false" 字符串
pub fn flexible_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None => None,
        Some(Raw::Bool(b)) => Some(b),
        Some(Raw::Text(s)) => match s.trim() {
            "" => None,
            t => Some(t.eq_ignore_ascii_case("true") || t == "1" || t.eq_ignore_ascii_case("on")),
        },
    })
}
