use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

tokio::task_local! {
    static TASK_REQUEST_ID: String;
}

/// 当前异步任务绑定的 request_id（错误响应透传用）
pub fn current_request_id() -> Option<String> {
    TASK_REQUEST_ID.try_with(|v| v.clone()).ok()
}

fn accept_client_id(raw: &str) -> Option<&str> {
    let raw = raw.trim();
    let safe = !raw.is_empty()
        && raw.len() <= 128
        && raw
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'));
    safe.then_some(raw)
}

/// 全局 request_id 中间件：透传合法的 `X-Request-Id`，否则生成；
/// 请求在携带该 id 的 tracing span 中执行，并回写到响应头。
pub async fn request_id_middleware(req: Request, next: Next) -> Response {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(accept_client_id)
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().simple().to_string());

    let span = tracing::info_span!(
        "request",
        id = %request_id,
        method = %req.method(),
        path = %req.uri().path()
    );

    let mut res = TASK_REQUEST_ID
        .scope(request_id.clone(), next.run(req).instrument(span))
        .await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    res
}
