use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use chrono::Utc;

use super::models::{AiResource, AiResourceRequest};
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::features::{MessageResponse, assign_non_empty};
use crate::state::AppState;
use crate::storage::max_id;

fn not_found() -> AppError {
    AppError::NotFound("AI Resource not found".into())
}

#[utoipa::path(
    get,
    path = "/ai-resources",
    summary = "AI 资源列表",
    responses((status = 200, description = "全部资源（含停用）", body = [AiResource])),
    tag = "AiResources"
)]
pub async fn list_resources(State(state): State<AppState>) -> Json<Vec<AiResource>> {
    Json(state.content.ai_resources.snapshot().await)
}

#[utoipa::path(
    get,
    path = "/ai-resources/{id}",
    summary = "AI 资源详情",
    params(("id" = u64, Path, description = "资源 id")),
    responses(
        (status = 200, description = "资源", body = AiResource),
        (status = 404, description = "资源不存在", body = AppError)
    ),
    tag = "AiResources"
)]
pub async fn get_resource(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<AiResource>, AppError> {
    state
        .content
        .ai_resources
        .view(|list| list.iter().find(|r| r.id == id).cloned())
        .await
        .map(Json)
        .ok_or_else(not_found)
}

#[utoipa::path(
    post,
    path = "/ai-resources",
    summary = "新建 AI 资源",
    request_body = AiResourceRequest,
    responses(
        (status = 201, description = "已创建", body = AiResource),
        (status = 400, description = "缺少 name", body = AppError)
    ),
    tag = "AiResources"
)]
pub async fn create_resource(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<AiResourceRequest>,
) -> Result<(StatusCode, Json<AiResource>), AppError> {
    let name = req
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Name is required".into()))?;

    let store = &state.content;
    let observed = store.ai_resources.view(|l| max_id(l, |r| r.id)).await;
    let id = store.ids.next(store.ai_resources.name(), observed).await?;

    let resource = AiResource {
        id,
        name,
        description: req.description.unwrap_or_default(),
        category: req.category.unwrap_or_default(),
        url: req.url.unwrap_or_default(),
        is_active: req.is_active.unwrap_or(true),
        created_at: Utc::now(),
        updated_at: None,
    };
    store
        .ai_resources
        .mutate(|list| {
            list.push(resource.clone());
            Ok(())
        })
        .await?;
    Ok((StatusCode::CREATED, Json(resource)))
}

#[utoipa::path(
    put,
    path = "/ai-resources/{id}",
    summary = "编辑 AI 资源",
    params(("id" = u64, Path, description = "资源 id")),
    request_body = AiResourceRequest,
    responses(
        (status = 200, description = "已更新", body = AiResource),
        (status = 404, description = "资源不存在", body = AppError)
    ),
    tag = "AiResources"
)]
pub async fn update_resource(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    JsonBody(req): JsonBody<AiResourceRequest>,
) -> Result<Json<AiResource>, AppError> {
    let updated = state
        .content
        .ai_resources
        .mutate(|list| {
            let r = list.iter_mut().find(|r| r.id == id).ok_or_else(not_found)?;
            assign_non_empty(&mut r.name, req.name);
            assign_non_empty(&mut r.description, req.description);
            assign_non_empty(&mut r.category, req.category);
            assign_non_empty(&mut r.url, req.url);
            if let Some(active) = req.is_active {
                r.is_active = active;
            }
            r.updated_at = Some(Utc::now());
            Ok(r.clone())
        })
        .await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/ai-resources/{id}",
    summary = "删除 AI 资源",
    params(("id" = u64, Path, description = "资源 id")),
    responses(
        (status = 200, description = "已删除", body = MessageResponse),
        (status = 404, description = "资源不存在", body = AppError)
    ),
    tag = "AiResources"
)]
pub async fn delete_resource(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .content
        .ai_resources
        .mutate(|list| {
            let idx = list.iter().position(|r| r.id == id).ok_or_else(not_found)?;
            list.remove(idx);
            Ok(())
        })
        .await?;
    Ok(Json(MessageResponse::new("AI Resource deleted successfully")))
}

pub fn create_ai_resources_router() -> Router<AppState> {
    Router::new()
        .route("/ai-resources", get(list_resources).post(create_resource))
        .route(
            "/ai-resources/:id",
            get(get_resource)
                .put(update_resource)
                .delete(delete_resource),
        )
}
