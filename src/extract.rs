//! 请求体提取器：拒绝统一转换为 [`AppError`]，以 problem+json 返回 400。

use axum::extract::FromRequest;

use crate::error::AppError;

/// 代替 `axum::Json` 作为请求体提取器（响应仍使用 `axum::Json`）。
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
