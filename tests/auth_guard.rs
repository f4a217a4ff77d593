mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::json;

use common::{get, json_request, spawn_app, spawn_app_with};

fn unauthenticated(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

#[tokio::test]
async fn writes_without_token_are_rejected_and_change_nothing() {
    let app = spawn_app().await;

    let (status, body) = app
        .send(unauthenticated(
            "POST",
            "/api/news",
            json!({ "content": "未授权" }),
        ))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Authentication required");

    let (_, list) = app.send(get("/api/news?includeInactive=true")).await;
    assert_eq!(list["news"].as_array().map(Vec::len), Some(5));
}

#[tokio::test]
async fn wrong_token_is_rejected() {
    let app = spawn_app().await;

    let req = Request::builder()
        .method("DELETE")
        .uri("/api/partners/1")
        .header(header::AUTHORIZATION, "Bearer not-the-token")
        .body(Body::empty())
        .expect("request");
    let (status, body) = app.send(req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid token");

    let (_, partners) = app.send(get("/api/partners")).await;
    assert_eq!(partners.as_array().map(Vec::len), Some(6));
}

#[tokio::test]
async fn reads_are_public() {
    let app = spawn_app().await;

    for uri in [
        "/api/company",
        "/api/founder",
        "/api/company-intro",
        "/api/ai-resources",
        "/api/services",
        "/api/core-service-carousel",
        "/api/news",
        "/api/posts",
        "/api/partners",
        "/api/dashboard/stats",
    ] {
        let (status, _) = app.send(get(uri)).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
    }
}

#[tokio::test]
async fn login_returns_configured_token() {
    let app = spawn_app().await;

    let (status, body) = app
        .send(unauthenticated(
            "POST",
            "/api/auth/login",
            json!({ "username": "admin", "password": "admin123" }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["token"], common::TOKEN);
    assert_eq!(body["user"]["username"], "admin");
    assert_eq!(body["user"]["email"], "admin@xuelongai.com");

    let (status, body) = app
        .send(unauthenticated(
            "POST",
            "/api/auth/login",
            json!({ "username": "admin", "password": "wrong" }),
        ))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");

    let (status, body) = app
        .send(unauthenticated("POST", "/api/auth/logout", json!({})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Logged out successfully");
}

#[tokio::test]
async fn token_from_login_unlocks_writes() {
    let app = spawn_app().await;

    let (_, login) = app
        .send(unauthenticated(
            "POST",
            "/api/auth/login",
            json!({ "username": "admin", "password": "admin123" }),
        ))
        .await;
    let token = login["token"].as_str().expect("token");

    let req = Request::builder()
        .method("POST")
        .uri("/api/partners")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(json!({ "name": "新伙伴" }).to_string()))
        .expect("request");
    let (status, body) = app.send(req).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["id"], 7);
}

#[tokio::test]
async fn contact_form_needs_no_token() {
    let app = spawn_app().await;

    let (status, body) = app
        .send(unauthenticated(
            "POST",
            "/api/contact",
            json!({ "name": "张三", "email": "z@example.com", "message": "合作咨询" }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "感谢您的留言，我们会尽快与您联系！");
}

#[tokio::test]
async fn protection_can_be_switched_off() {
    let app = spawn_app_with(|c| c.auth.protect_writes = false).await;

    let (status, _) = app
        .send(unauthenticated(
            "PUT",
            "/api/company",
            json!({ "name": "雪珑" }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);

    // 带 token 同样可用
    let (status, body) = app
        .send(json_request("PUT", "/api/company", &json!({ "phone": "123" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "雪珑");
}
