use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// 应用统一错误类型
#[derive(Error, Debug, utoipa::ToSchema)]
pub enum AppError {
    /// 资源不存在（如 id 未命中）
    #[error("{0}")]
    NotFound(String),

    /// 请求参数错误（缺少必填字段、JSON 格式错误等）
    #[error("{0}")]
    BadRequest(String),

    /// 认证失败
    #[error("{0}")]
    Unauthorized(String),

    /// 上传内容超出限制
    #[error("{0}")]
    PayloadTooLarge(String),

    /// 持久化错误
    #[error("存储错误: {0}")]
    Storage(#[from] StorageError),

    /// 内部服务器错误
    #[error("{0}")]
    Internal(String),

    /// 处理函数 panic（由 catch-panic 层转换）
    #[error("Something went wrong!")]
    Panic,
}

/// 文档存储错误类型
#[derive(Error, Debug, utoipa::ToSchema)]
pub enum StorageError {
    /// I/O 错误
    #[error("I/O 错误 ({path}): {message}")]
    Io { path: String, message: String },

    /// 序列化/反序列化错误
    #[error("JSON 错误 ({name}): {message}")]
    Json { name: String, message: String },
}

impl StorageError {
    pub fn io(path: impl std::fmt::Display, err: std::io::Error) -> Self {
        StorageError::Io {
            path: path.to_string(),
            message: err.to_string(),
        }
    }

    pub fn json(name: impl Into<String>, err: serde_json::Error) -> Self {
        StorageError::Json {
            name: name.into(),
            message: err.to_string(),
        }
    }
}

/// RFC7807 风格的错误响应（Problem Details）。
///
/// 额外携带 `message` 字段：管理端前端直接展示该字段。
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDetails {
    /// 问题类型（URI），无细分类型时为 about:blank。
    #[serde(rename = "type")]
    #[schema(example = "about:blank")]
    pub type_url: String,

    /// 简短标题
    #[schema(example = "Not Found")]
    pub title: String,

    /// HTTP 状态码（与响应 status 一致）
    #[schema(example = 404)]
    pub status: u16,

    /// 人类可读的详细信息
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// 与 detail 相同的提示文本，供前端展示
    #[schema(example = "Service not found")]
    pub message: String,

    /// 稳定的错误码，用于程序化处理
    #[schema(example = "NOT_FOUND")]
    pub code: String,

    /// 请求追踪 ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Storage(_) | AppError::Internal(_) | AppError::Panic => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn stable_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Internal(_) | AppError::Panic => "INTERNAL_ERROR",
        }
    }

    fn title(&self) -> &'static str {
        match self.status_code() {
            StatusCode::BAD_REQUEST => "Bad Request",
            StatusCode::UNAUTHORIZED => "Unauthorized",
            StatusCode::NOT_FOUND => "Not Found",
            StatusCode::PAYLOAD_TOO_LARGE => "Payload Too Large",
            StatusCode::INTERNAL_SERVER_ERROR => "Internal Server Error",
            _ => "Error",
        }
    }

    /// 对外展示的文本：内部错误不泄露细节。
    fn public_message(&self) -> String {
        match self {
            AppError::Storage(_) | AppError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge("Request body exceeds the size limit".into())
        } else {
            AppError::BadRequest(rejection.body_text())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("请求处理失败: {}", self);
        }
        let message = self.public_message();

        let problem = ProblemDetails {
            type_url: "about:blank".to_string(),
            title: self.title().to_string(),
            status: status.as_u16(),
            detail: Some(message.clone()),
            message,
            code: self.stable_code().to_string(),
            request_id: crate::request_id::current_request_id(),
        };

        let mut res = Json(problem).into_response();
        *res.status_mut() = status;
        res.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/problem+json"),
        );
        res
    }
}
