use axum::{
    Router,
    extract::{Multipart, Path, State},
    response::Json,
    routing::{delete, get, post},
};
use chrono::Utc;
use uuid::Uuid;

use super::models::{
    Carousel, CarouselImage, CarouselResponse, CarouselUploadResponse, UpdateCarouselRequest,
};
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::features::uploads::{FileField, collect_form};
use crate::state::AppState;

const IMAGE_FIELD: &str = "images";

#[utoipa::path(
    get,
    path = "/core-service-carousel",
    summary = "核心服务轮播",
    responses((status = 200, description = "轮播设置与图片", body = Carousel)),
    tag = "Carousel"
)]
pub async fn get_carousel(State(state): State<AppState>) -> Json<Carousel> {
    Json(state.content.carousel.snapshot().await)
}

#[utoipa::path(
    put,
    path = "/core-service-carousel",
    summary = "更新轮播设置",
    description = "浅合并 title / isActive / autoPlay / interval；图片列表不受影响。",
    request_body = UpdateCarouselRequest,
    responses((status = 200, description = "更新后的轮播", body = Carousel)),
    tag = "Carousel"
)]
pub async fn update_carousel(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<UpdateCarouselRequest>,
) -> Result<Json<Carousel>, AppError> {
    let carousel = state
        .content
        .carousel
        .mutate(|c| {
            if let Some(title) = req.title.filter(|t| !t.trim().is_empty()) {
                c.title = title;
            }
            if let Some(v) = req.is_active {
                c.is_active = v;
            }
            if let Some(v) = req.auto_play {
                c.auto_play = v;
            }
            if let Some(v) = req.interval.filter(|v| *v > 0) {
                c.interval = v;
            }
            c.updated_at = Utc::now();
            Ok(c.clone())
        })
        .await?;
    Ok(Json(carousel))
}

#[utoipa::path(
    post,
    path = "/core-service-carousel/images",
    summary = "上传轮播图片",
    description = "multipart 字段 images，最多 10 个文件；新图片追加到列表末尾。",
    request_body(content = super::models::CarouselUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "上传成功", body = CarouselUploadResponse),
        (status = 400, description = "文件过多或表单不合法", body = AppError),
        (status = 413, description = "请求体过大", body = AppError)
    ),
    tag = "Carousel"
)]
pub async fn upload_images(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<CarouselUploadResponse>, AppError> {
    let fields = [FileField::new(IMAGE_FIELD, state.limits.max_files)];
    let form = collect_form(multipart, &state.uploads, &fields).await?;

    let now = Utc::now();
    let images: Vec<CarouselImage> = form
        .files_for(IMAGE_FIELD)
        .map(|f| CarouselImage {
            id: Uuid::new_v4().to_string(),
            url: f.url.clone(),
            filename: f.filename.clone(),
            original_name: f.original_name.clone(),
            uploaded_at: now,
        })
        .collect();

    let result = state
        .content
        .carousel
        .mutate(|c| {
            c.images.extend(images.iter().cloned());
            c.updated_at = now;
            Ok(c.clone())
        })
        .await;

    let carousel = match result {
        Ok(c) => c,
        Err(e) => {
            state.uploads.remove_all(&form.files).await;
            return Err(e);
        }
    };

    tracing::info!("轮播新增 {} 张图片，共 {} 张", images.len(), carousel.images.len());
    Ok(Json(CarouselUploadResponse {
        message: "Images uploaded successfully".into(),
        images,
        carousel,
    }))
}

#[utoipa::path(
    delete,
    path = "/core-service-carousel/images/{imageId}",
    summary = "删除单张轮播图片",
    description = "从列表移除并尽力删除对应文件；文件删除失败只记录日志。",
    params(("imageId" = String, Path, description = "图片 id")),
    responses(
        (status = 200, description = "已删除", body = CarouselResponse),
        (status = 404, description = "图片不存在", body = AppError)
    ),
    tag = "Carousel"
)]
pub async fn delete_image(
    State(state): State<AppState>,
    Path(image_id): Path<String>,
) -> Result<Json<CarouselResponse>, AppError> {
    let (removed, carousel) = state
        .content
        .carousel
        .mutate(|c| {
            let idx = c
                .images
                .iter()
                .position(|img| img.id == image_id)
                .ok_or_else(|| AppError::NotFound("Image not found".into()))?;
            let removed = c.images.remove(idx);
            c.updated_at = Utc::now();
            Ok((removed, c.clone()))
        })
        .await?;

    state.uploads.remove(&removed.filename).await;

    Ok(Json(CarouselResponse {
        message: "Image deleted successfully".into(),
        carousel,
    }))
}

#[utoipa::path(
    delete,
    path = "/core-service-carousel/images",
    summary = "清空轮播图片",
    responses((status = 200, description = "已清空", body = CarouselResponse)),
    tag = "Carousel"
)]
pub async fn clear_images(
    State(state): State<AppState>,
) -> Result<Json<CarouselResponse>, AppError> {
    let (removed, carousel) = state
        .content
        .carousel
        .mutate(|c| {
            let removed = std::mem::take(&mut c.images);
            c.updated_at = Utc::now();
            Ok((removed, c.clone()))
        })
        .await?;

    for image in &removed {
        state.uploads.remove(&image.filename).await;
    }
    tracing::info!("轮播图片已清空，移除 {} 张", removed.len());

    Ok(Json(CarouselResponse {
        message: "All images cleared successfully".into(),
        carousel,
    }))
}

pub fn create_carousel_router() -> Router<AppState> {
    Router::new()
        .route(
            "/core-service-carousel",
            get(get_carousel).put(update_carousel),
        )
        .route(
            "/core-service-carousel/images",
            post(upload_images).delete(clear_images),
        )
        .route("/core-service-carousel/images/:image_id", delete(delete_image))
}
