use axum::{
    Router,
    extract::{Path, Request, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use chrono::Utc;

use super::models::{Post, PostRequest};
use crate::error::AppError;
use crate::features::uploads::{FileField, UploadForm, read_submission};
use crate::features::{MessageResponse, assign_non_empty};
use crate::state::AppState;
use crate::storage::max_id;

const IMAGE_FIELD: FileField = FileField::new("image", 1);
const DEFAULT_AUTHOR: &str = "XUELONG AI";

fn not_found() -> AppError {
    AppError::NotFound("Post not found".into())
}

fn required(value: Option<String>, message: &str) -> Result<String, AppError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest(message.to_string()))
}

#[utoipa::path(
    get,
    path = "/posts",
    summary = "文章列表",
    description = "按存储顺序返回（新文章在前）。",
    responses((status = 200, description = "文章列表", body = [Post])),
    tag = "Posts"
)]
pub async fn list_posts(State(state): State<AppState>) -> Json<Vec<Post>> {
    Json(state.content.posts.snapshot().await)
}

#[utoipa::path(
    get,
    path = "/posts/{id}",
    summary = "文章详情",
    params(("id" = u64, Path, description = "文章 id")),
    responses(
        (status = 200, description = "文章", body = Post),
        (status = 404, description = "文章不存在", body = AppError)
    ),
    tag = "Posts"
)]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Post>, AppError> {
    state
        .content
        .posts
        .view(|list| list.iter().find(|p| p.id == id).cloned())
        .await
        .map(Json)
        .ok_or_else(not_found)
}

#[utoipa::path(
    post,
    path = "/posts",
    summary = "发布文章",
    description = "JSON 或 multipart（可附带 image 文件）。title 与 content 必填；author 默认 XUELONG AI；新文章插入列表最前。",
    request_body = PostRequest,
    responses(
        (status = 201, description = "已创建", body = Post),
        (status = 400, description = "缺少 title 或 content", body = AppError)
    ),
    tag = "Posts"
)]
pub async fn create_post(
    State(state): State<AppState>,
    req: Request,
) -> Result<(StatusCode, Json<Post>), AppError> {
    let (body, form) = read_submission::<PostRequest>(req, &state.uploads, &[IMAGE_FIELD]).await?;
    match insert_post(&state, body, &form).await {
        Ok(post) => Ok((StatusCode::CREATED, Json(post))),
        Err(e) => {
            state.uploads.remove_all(&form.files).await;
            Err(e)
        }
    }
}

async fn insert_post(state: &AppState, body: PostRequest, form: &UploadForm) -> Result<Post, AppError> {
    let title = required(body.title, "Title is required")?;
    let content = required(body.content, "Content is required")?;

    let store = &state.content;
    let observed = store.posts.view(|l| max_id(l, |p| p.id)).await;
    let id = store.ids.next(store.posts.name(), observed).await?;

    let post = Post {
        id,
        title,
        content,
        author: body
            .author
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
        published: body.published.unwrap_or(false),
        image: form.first_file(IMAGE_FIELD.name).map(|f| f.url.clone()),
        created_at: Utc::now(),
        updated_at: None,
    };
    store
        .posts
        .mutate(|list| {
            list.insert(0, post.clone());
            Ok(())
        })
        .await?;

    tracing::info!("发布文章 id={} title={}", post.id, post.title);
    Ok(post)
}

#[utoipa::path(
    put,
    path = "/posts/{id}",
    summary = "编辑文章",
    description = "非空字段覆盖原值；附带 image 文件时替换配图。",
    params(("id" = u64, Path, description = "文章 id")),
    request_body = PostRequest,
    responses(
        (status = 200, description = "已更新", body = Post),
        (status = 404, description = "文章不存在", body = AppError)
    ),
    tag = "Posts"
)]
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    req: Request,
) -> Result<Json<Post>, AppError> {
    let exists = state.content.posts.view(|l| l.iter().any(|p| p.id == id)).await;
    if !exists {
        return Err(not_found());
    }

    let (body, form) = read_submission::<PostRequest>(req, &state.uploads, &[IMAGE_FIELD]).await?;
    let image = form.first_file(IMAGE_FIELD.name).map(|f| f.url.clone());

    let result = state
        .content
        .posts
        .mutate(|list| {
            let p = list.iter_mut().find(|p| p.id == id).ok_or_else(not_found)?;
            assign_non_empty(&mut p.title, body.title);
            assign_non_empty(&mut p.content, body.content);
            assign_non_empty(&mut p.author, body.author);
            if let Some(v) = body.published {
                p.published = v;
            }
            if image.is_some() {
                p.image = image;
            }
            p.updated_at = Some(Utc::now());
            Ok(p.clone())
        })
        .await;

    match result {
        Ok(post) => Ok(Json(post)),
        Err(e) => {
            state.uploads.remove_all(&form.files).await;
            Err(e)
        }
    }
}

#[utoipa::path(
    delete,
    path = "/posts/{id}",
    summary = "删除文章",
    params(("id" = u64, Path, description = "文章 id")),
    responses(
        (status = 200, description = "已删除", body = MessageResponse),
        (status = 404, description = "文章不存在", body = AppError)
    ),
    tag = "Posts"
)]
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .content
        .posts
        .mutate(|list| {
            let idx = list.iter().position(|p| p.id == id).ok_or_else(not_found)?;
            list.remove(idx);
            Ok(())
        })
        .await?;
    Ok(Json(MessageResponse::new("Post deleted successfully")))
}

pub fn create_posts_router() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/:id",
            get(get_post).put(update_post).delete(delete_post),
        )
}
