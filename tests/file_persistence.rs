mod common;

use axum::Router;
use axum::http::StatusCode;
use serde_json::{Value, json};
use tempfile::TempDir;

use common::{authed, call, get, json_request, test_config};
use xuelong_site::startup::run_startup_checks;
use xuelong_site::{AppState, build_app};

/// 以 `storage.data_dir` 下的 JSON 文件为存储启动应用，与二进制入口一致
async fn open_app(data: &TempDir, uploads: &TempDir) -> Router {
    let mut config = test_config(uploads);
    config.storage.data_dir = data.path().display().to_string();
    run_startup_checks(&config).expect("startup checks");
    let state = AppState::from_config(&config).await.expect("state");
    build_app(state, &config)
}

fn read_document(data: &TempDir, name: &str) -> (String, Value) {
    let text = std::fs::read_to_string(data.path().join(format!("{name}.json")))
        .expect("read document");
    let value = serde_json::from_str(&text).expect("document is json");
    (text, value)
}

#[tokio::test]
async fn first_start_writes_default_documents() {
    let data = tempfile::tempdir().expect("tempdir");
    let uploads = tempfile::tempdir().expect("tempdir");
    let _app = open_app(&data, &uploads).await;

    for name in [
        "company",
        "founder",
        "intro",
        "ai-resources",
        "services",
        "core-service-carousel",
        "news",
        "posts",
        "partners",
        "sequences",
    ] {
        assert!(
            data.path().join(format!("{name}.json")).is_file(),
            "{name}.json missing"
        );
    }

    let (_, services) = read_document(&data, "services");
    assert_eq!(services.as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn changes_survive_restart_and_ids_stay_unique() {
    let data = tempfile::tempdir().expect("tempdir");
    let uploads = tempfile::tempdir().expect("tempdir");

    let app = open_app(&data, &uploads).await;
    let (status, created) = call(
        &app,
        json_request("POST", "/api/services", &json!({ "title": "数据标注" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 4);

    let (status, _) = call(
        &app,
        json_request("PUT", "/api/services/2", &json!({ "templateType": "card" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(&app, authed("DELETE", "/api/services/4")).await;
    assert_eq!(status, StatusCode::OK);

    // 带缩进的 JSON 数组，字段为 camelCase
    let (text, services) = read_document(&data, "services");
    assert!(text.contains("\n  "), "document should be pretty-printed");
    let list = services.as_array().expect("services array");
    assert_eq!(list.len(), 3);
    assert_eq!(list[1]["templateType"], "card");
    assert!(list.iter().all(|s| s["id"] != 4));
    let (_, sequences) = read_document(&data, "sequences");
    assert_eq!(sequences["services"], 4);
    drop(app);

    let app = open_app(&data, &uploads).await;
    let (_, fetched) = call(&app, get("/api/services/2")).await;
    assert_eq!(fetched["templateType"], "card");

    let (status, again) = call(
        &app,
        json_request("POST", "/api/services", &json!({ "title": "模型评测" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(again["id"], 5);

    let (_, list) = call(&app, get("/api/services")).await;
    assert_eq!(list.as_array().map(Vec::len), Some(4));
}
