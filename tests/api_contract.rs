mod common;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use common::{get, json_request, spawn_app, spawn_app_with};

#[tokio::test]
async fn health_reports_service_and_version() {
    let app = spawn_app().await;

    let (status, body) = app.send(get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["message"], "XUELONG AI Server is running");
    assert_eq!(body["service"], "xuelong-site");
    assert!(body["version"].as_str().is_some_and(|v| !v.is_empty()));
}

#[tokio::test]
async fn unknown_route_is_problem_json_with_request_id() {
    let app = spawn_app().await;

    let resp = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/nope")
                .header("x-request-id", "client.req-404")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("call");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("application/problem+json")
    );
    assert_eq!(
        resp.headers().get("x-request-id").and_then(|v| v.to_str().ok()),
        Some("client.req-404")
    );

    let bytes = to_bytes(resp.into_body(), usize::MAX).await.expect("body");
    let body: Value = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(body["status"], 404);
    assert_eq!(body["message"], "Route not found");
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["requestId"], "client.req-404");
}

#[tokio::test]
async fn request_id_is_generated_for_unsafe_or_missing_values() {
    let app = spawn_app().await;

    for header_value in [None, Some("bad id/with spaces")] {
        let mut builder = Request::builder().uri("/api/health");
        if let Some(v) = header_value {
            builder = builder.header("x-request-id", v);
        }
        let resp = app
            .router
            .clone()
            .oneshot(builder.body(Body::empty()).expect("request"))
            .await
            .expect("call");
        let id = resp
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert!(!id.is_empty());
        assert_ne!(Some(id), header_value);
    }
}

async fn send_raw_json(app: &common::TestApp, uri: &str, raw: &str) -> (StatusCode, String, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", common::TOKEN))
        .header("x-request-id", "json.req-001")
        .body(Body::from(raw.to_string()))
        .expect("request");
    let resp = app.router.clone().oneshot(req).await.expect("call");
    let status = resp.status();
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.expect("body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, content_type, body)
}

#[tokio::test]
async fn bad_json_bodies_are_400_problem_details() {
    let app = spawn_app().await;

    for (uri, raw) in [
        ("/api/ai-resources", "{not json"),
        ("/api/news", r#"{"content":"x","priority":"high"}"#),
        ("/api/contact", r#"{"name": 42}"#),
    ] {
        let (status, content_type, body) = send_raw_json(&app, uri, raw).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(content_type, "application/problem+json", "{uri}");
        assert_eq!(body["code"], "BAD_REQUEST", "{uri}");
        assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()), "{uri}");
        assert_eq!(body["requestId"], "json.req-001", "{uri}");
    }

    let (_, list) = app.send(get("/api/news?includeInactive=true")).await;
    assert_eq!(list["news"].as_array().map(Vec::len), Some(5));
}

#[tokio::test]
async fn dashboard_counts_follow_content() {
    let app = spawn_app().await;

    let (_, stats) = app.send(get("/api/dashboard/stats")).await;
    assert_eq!(
        stats,
        json!({
            "totalPosts": 3,
            "totalPartners": 6,
            "totalAiResources": 6,
            "totalServices": 3,
            "activeAiResources": 6,
            "activeServices": 3
        })
    );

    app.send(json_request(
        "PUT",
        "/api/ai-resources/2",
        &json!({ "isActive": false }),
    ))
    .await;
    let (_, stats) = app.send(get("/api/dashboard/stats")).await;
    assert_eq!(stats["totalAiResources"], 6);
    assert_eq!(stats["activeAiResources"], 5);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = spawn_app().await;

    let (status, doc) = app.send(get("/api-docs/openapi.json")).await;
    assert_eq!(status, StatusCode::OK);
    let paths = doc["paths"].as_object().expect("paths");
    assert!(paths.contains_key("/services/{id}/poster"));
    assert!(paths.contains_key("/news-settings"));
    assert!(paths.contains_key("/auth/login"));
}

#[tokio::test]
async fn cors_allows_configured_origin_only() {
    let app = spawn_app_with(|c| {
        c.cors.allowed_origins = vec!["https://xuelongai.com".to_string()];
        c.cors.allowed_methods = vec!["GET".to_string(), "POST".to_string()];
    })
    .await;

    let resp = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/news")
                .header(header::ORIGIN, "https://xuelongai.com")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("call");
    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("https://xuelongai.com")
    );
    let methods = resp
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_METHODS)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(methods.contains("POST"));

    let resp = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/news")
                .header(header::ORIGIN, "https://evil.example")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("call");
    assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[tokio::test]
async fn empty_prefix_mounts_api_at_root() {
    let app = spawn_app_with(|c| c.api.prefix = "/".to_string()).await;

    let (status, body) = app.send(get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");

    let (status, _) = app.send(get("/api/health")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
