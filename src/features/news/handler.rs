use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
};
use chrono::Utc;

use super::models::{
    NewsItem, NewsListResponse, NewsQuery, NewsRequest, NewsSettings, UpdateNewsSettingsRequest,
    default_kind,
};
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::features::MessageResponse;
use crate::state::AppState;
use crate::storage::max_id;

fn not_found() -> AppError {
    AppError::NotFound("News item not found".into())
}

#[utoipa::path(
    get,
    path = "/news",
    summary = "滚动快讯",
    description = "默认只返回启用条目，按 priority 升序并截断到 settings.maxDisplayItems；\
includeInactive=true 时返回全部条目（管理端使用）。",
    params(NewsQuery),
    responses((status = 200, description = "快讯与展示参数", body = NewsListResponse)),
    tag = "News"
)]
pub async fn list_news(
    State(state): State<AppState>,
    Query(query): Query<NewsQuery>,
) -> Json<NewsListResponse> {
    let include_inactive = query.include_inactive.unwrap_or(false);
    let (news, settings) = state
        .content
        .news
        .view(|board| (board.visible(include_inactive), board.settings.clone()))
        .await;
    Json(NewsListResponse { news, settings })
}

#[utoipa::path(
    get,
    path = "/news/{id}",
    summary = "快讯详情",
    params(("id" = u64, Path, description = "快讯 id")),
    responses(
        (status = 200, description = "快讯", body = NewsItem),
        (status = 404, description = "快讯不存在", body = AppError)
    ),
    tag = "News"
)]
pub async fn get_news(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<NewsItem>, AppError> {
    state
        .content
        .news
        .view(|board| board.news.iter().find(|n| n.id == id).cloned())
        .await
        .map(Json)
        .ok_or_else(not_found)
}

#[utoipa::path(
    post,
    path = "/news",
    summary = "新增快讯",
    description = "content 必填；type 默认 general，priority 默认为条目数 + 1，isActive 默认 true。",
    request_body = NewsRequest,
    responses(
        (status = 201, description = "已创建", body = NewsItem),
        (status = 400, description = "缺少 content", body = AppError)
    ),
    tag = "News"
)]
pub async fn create_news(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<NewsRequest>,
) -> Result<(StatusCode, Json<NewsItem>), AppError> {
    let content = req
        .content
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Content is required".into()))?;

    let store = &state.content;
    let observed = store.news.view(|b| max_id(&b.news, |n| n.id)).await;
    let id = store.ids.next(store.news.name(), observed).await?;

    let item = store
        .news
        .mutate(|board| {
            let item = NewsItem {
                id,
                content,
                icon: req.icon.filter(|i| !i.is_empty()),
                kind: req.kind.filter(|k| !k.is_empty()).unwrap_or_else(default_kind),
                priority: req
                    .priority
                    .filter(|p| *p != 0)
                    .unwrap_or(board.news.len() as i64 + 1),
                is_active: req.is_active.unwrap_or(true),
                created_at: Utc::now(),
                updated_at: None,
            };
            board.news.push(item.clone());
            Ok(item)
        })
        .await?;

    tracing::info!("新增快讯 id={} priority={}", item.id, item.priority);
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    put,
    path = "/news/{id}",
    summary = "编辑快讯",
    description = "只修改请求中出现的字段。",
    params(("id" = u64, Path, description = "快讯 id")),
    request_body = NewsRequest,
    responses(
        (status = 200, description = "已更新", body = NewsItem),
        (status = 404, description = "快讯不存在", body = AppError)
    ),
    tag = "News"
)]
pub async fn update_news(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    JsonBody(req): JsonBody<NewsRequest>,
) -> Result<Json<NewsItem>, AppError> {
    let item = state
        .content
        .news
        .mutate(|board| {
            let n = board.news.iter_mut().find(|n| n.id == id).ok_or_else(not_found)?;
            if let Some(v) = req.content {
                n.content = v;
            }
            if let Some(v) = req.icon {
                n.icon = Some(v);
            }
            if let Some(v) = req.kind {
                n.kind = v;
            }
            if let Some(v) = req.priority {
                n.priority = v;
            }
            if let Some(v) = req.is_active {
                n.is_active = v;
            }
            n.updated_at = Some(Utc::now());
            Ok(n.clone())
        })
        .await?;
    Ok(Json(item))
}

#[utoipa::path(
    delete,
    path = "/news/{id}",
    summary = "删除快讯",
    params(("id" = u64, Path, description = "快讯 id")),
    responses(
        (status = 200, description = "已删除", body = MessageResponse),
        (status = 404, description = "快讯不存在", body = AppError)
    ),
    tag = "News"
)]
pub async fn delete_news(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .content
        .news
        .mutate(|board| {
            let idx = board.news.iter().position(|n| n.id == id).ok_or_else(not_found)?;
            board.news.remove(idx);
            Ok(())
        })
        .await?;
    Ok(Json(MessageResponse::new("News item deleted successfully")))
}

#[utoipa::path(
    put,
    path = "/news-settings",
    summary = "更新快讯展示参数",
    request_body = UpdateNewsSettingsRequest,
    responses((status = 200, description = "更新后的参数", body = NewsSettings)),
    tag = "News"
)]
pub async fn update_settings(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<UpdateNewsSettingsRequest>,
) -> Result<Json<NewsSettings>, AppError> {
    let settings = state
        .content
        .news
        .mutate(|board| {
            let s = &mut board.settings;
            if let Some(v) = req.scroll_speed {
                s.scroll_speed = v;
            }
            if let Some(v) = req.max_display_items {
                s.max_display_items = v;
            }
            if let Some(v) = req.auto_refresh {
                s.auto_refresh = v;
            }
            if let Some(v) = req.refresh_interval {
                s.refresh_interval = v;
            }
            if let Some(v) = req.animation_delay {
                s.animation_delay = Some(v);
            }
            Ok(s.clone())
        })
        .await?;
    Ok(Json(settings))
}

pub fn create_news_router() -> Router<AppState> {
    Router::new()
        .route("/news", get(list_news).post(create_news))
        .route(
            "/news/:id",
            get(get_news).put(update_news).delete(delete_news),
        )
        .route("/news-settings", put(update_settings))
}
