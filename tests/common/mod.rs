#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use xuelong_site::storage::{DocumentBackend, MemoryBackend};
use xuelong_site::{AppConfig, AppState, build_app};

pub const TOKEN: &str = "test-admin-token";
pub const BOUNDARY: &str = "----xuelong-test-boundary";

/// 测试应用：内存文档存储 + 临时上传目录
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub backend: Arc<MemoryBackend>,
    pub uploads: TempDir,
}

pub fn test_config(uploads: &TempDir) -> AppConfig {
    let mut config = AppConfig::default();
    config.storage.uploads_dir = uploads.path().display().to_string();
    config.auth.token = TOKEN.to_string();
    config
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

pub async fn spawn_app_with(customize: impl FnOnce(&mut AppConfig)) -> TestApp {
    let uploads = tempfile::tempdir().expect("tempdir");
    let mut config = test_config(&uploads);
    customize(&mut config);

    let backend = Arc::new(MemoryBackend::new());
    let dyn_backend: Arc<dyn DocumentBackend> = backend.clone();
    let state = AppState::new(&config, dyn_backend).await.expect("state");
    let router = build_app(state.clone(), &config);
    TestApp {
        router,
        state,
        backend,
        uploads,
    }
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        call(&self.router, req).await
    }

    pub fn upload_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.uploads.path())
            .expect("read uploads dir")
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

/// 调用路由并把响应体解析为 JSON（空响应体为 Null）
pub async fn call(router: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = router.clone().oneshot(req).await.expect("call app");
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.expect("body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request")
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn authed(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
        .body(Body::empty())
        .expect("request")
}

/// multipart 表单的一个字段
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        field: &'a str,
        filename: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                field,
                filename,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_request(method: &str, uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
        .body(Body::from(multipart_body(parts)))
        .expect("request")
}

pub fn png(field: &'static str, filename: &'static str) -> Part<'static> {
    Part::File {
        field,
        filename,
        content_type: "image/png",
        data: b"\x89PNG\r\n\x1a\nfake-image-bytes",
    }
}
