use axum::{
    Router,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use chrono::Utc;

use super::models::{
    CreateServiceRequest, PosterUpdateResponse, Service, UpdateServiceRequest,
};
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::features::{MessageResponse, assign_non_empty};
use crate::features::uploads::{FileField, collect_form};
use crate::state::AppState;
use crate::storage::max_id;

const POSTER_FIELD: &str = "posters";

fn not_found() -> AppError {
    AppError::NotFound("Service not found".into())
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

#[utoipa::path(
    get,
    path = "/services",
    summary = "服务列表",
    description = "返回全部核心服务，按 order 升序。",
    responses((status = 200, description = "服务列表", body = [Service])),
    tag = "Services"
)]
pub async fn list_services(State(state): State<AppState>) -> Json<Vec<Service>> {
    let mut services = state.content.services.snapshot().await;
    services.sort_by_key(|s| s.order);
    Json(services)
}

#[utoipa::path(
    get,
    path = "/services/{id}",
    summary = "服务详情",
    params(("id" = u64, Path, description = "服务 id")),
    responses(
        (status = 200, description = "服务", body = Service),
        (status = 404, description = "服务不存在", body = AppError)
    ),
    tag = "Services"
)]
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Service>, AppError> {
    state
        .content
        .services
        .view(|list| list.iter().find(|s| s.id == id).cloned())
        .await
        .map(Json)
        .ok_or_else(not_found)
}

#[utoipa::path(
    post,
    path = "/services",
    summary = "新建服务",
    description = "title 必填；海报通过 /services/{id}/poster 单独上传。",
    request_body = CreateServiceRequest,
    responses(
        (status = 201, description = "已创建", body = Service),
        (status = 400, description = "缺少 title", body = AppError)
    ),
    tag = "Services"
)]
pub async fn create_service(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateServiceRequest>,
) -> Result<(StatusCode, Json<Service>), AppError> {
    let title = non_empty(req.title).ok_or_else(|| AppError::BadRequest("Title is required".into()))?;

    let store = &state.content;
    let observed = store.services.view(|l| max_id(l, |s| s.id)).await;
    let id = store.ids.next(store.services.name(), observed).await?;

    let created = store
        .services
        .mutate(|list| {
            let service = Service {
                id,
                title,
                description: req.description.unwrap_or_default(),
                icon: req.icon.unwrap_or_default(),
                template_type: req
                    .template_type
                    .filter(|t| !t.as_str().trim().is_empty())
                    .unwrap_or_default(),
                features: req.features.unwrap_or_default(),
                poster_image: None,
                poster_images: Vec::new(),
                is_active: req.is_active.unwrap_or(true),
                order: req.order.filter(|o| *o != 0).unwrap_or(list.len() as i64 + 1),
                created_at: Utc::now(),
                updated_at: None,
            };
            list.push(service.clone());
            Ok(service)
        })
        .await?;

    tracing::info!("新建服务 id={} title={}", created.id, created.title);
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/services/{id}",
    summary = "编辑服务",
    description = "未提供或为空的字段保持原值；修改 templateType 时海报会迁移到新模板使用的字段。",
    params(("id" = u64, Path, description = "服务 id")),
    request_body = UpdateServiceRequest,
    responses(
        (status = 200, description = "已更新", body = Service),
        (status = 404, description = "服务不存在", body = AppError)
    ),
    tag = "Services"
)]
pub async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    JsonBody(req): JsonBody<UpdateServiceRequest>,
) -> Result<Json<Service>, AppError> {
    let updated = state
        .content
        .services
        .mutate(|list| {
            let service = list.iter_mut().find(|s| s.id == id).ok_or_else(not_found)?;
            assign_non_empty(&mut service.title, req.title);
            assign_non_empty(&mut service.description, req.description);
            assign_non_empty(&mut service.icon, req.icon);
            if let Some(v) = req.features {
                service.features = v;
            }
            if let Some(v) = req.is_active {
                service.is_active = v;
            }
            if let Some(v) = req.order {
                service.order = v;
            }
            if let Some(t) = req.template_type.filter(|t| !t.as_str().trim().is_empty()) {
                if t != service.template_type {
                    service.template_type = t;
                    service.normalize_posters();
                }
            }
            service.updated_at = Some(Utc::now());
            Ok(service.clone())
        })
        .await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/services/{id}",
    summary = "删除服务",
    description = "只删除记录，已上传的海报文件保留。",
    params(("id" = u64, Path, description = "服务 id")),
    responses(
        (status = 200, description = "已删除", body = MessageResponse),
        (status = 404, description = "服务不存在", body = AppError)
    ),
    tag = "Services"
)]
pub async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .content
        .services
        .mutate(|list| {
            let idx = list.iter().position(|s| s.id == id).ok_or_else(not_found)?;
            list.remove(idx);
            Ok(())
        })
        .await?;
    Ok(Json(MessageResponse::new("Service deleted successfully")))
}

#[utoipa::path(
    post,
    path = "/services/{id}/poster",
    summary = "更新服务海报",
    description = "multipart 表单：existingImages 为需保留的图片 URL（JSON 数组），posters 为新文件（最多 10 个）。\
结果固定为 existingImages ++ 新图片 URL；查询参数 append 仅为兼容前端而接受，不改变结果。\
多图模板（vertical/horizontal/grid）写入 posterImages 并清空 posterImage，其余模板只保留一张 posterImage。",
    params(
        ("id" = u64, Path, description = "服务 id"),
        ("append" = Option<bool>, Query, description = "兼容参数，无实际效果")
    ),
    request_body(content = super::models::PosterUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "海报已更新", body = PosterUpdateResponse),
        (status = 400, description = "existingImages 不是合法 JSON 数组或文件过多", body = AppError),
        (status = 404, description = "服务不存在", body = AppError)
    ),
    tag = "Services"
)]
pub async fn upload_poster(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    multipart: Multipart,
) -> Result<Json<PosterUpdateResponse>, AppError> {
    // 先确认服务存在，避免为不存在的服务写入文件
    let exists = state
        .content
        .services
        .view(|list| list.iter().any(|s| s.id == id))
        .await;
    if !exists {
        return Err(not_found());
    }

    let fields = [FileField::new(POSTER_FIELD, state.limits.max_files)];
    let form = collect_form(multipart, &state.uploads, &fields).await?;

    let existing = match parse_existing_images(form.text("existingImages")) {
        Ok(v) => v,
        Err(e) => {
            state.uploads.remove_all(&form.files).await;
            return Err(e);
        }
    };
    let uploaded: Vec<String> = form.files_for(POSTER_FIELD).map(|f| f.url.clone()).collect();
    let uploaded_count = uploaded.len();

    let result = state
        .content
        .services
        .mutate(|list| {
            let service = list.iter_mut().find(|s| s.id == id).ok_or_else(not_found)?;
            service.apply_posters(existing, uploaded);
            service.updated_at = Some(Utc::now());
            Ok(service.clone())
        })
        .await;

    let service = match result {
        Ok(s) => s,
        Err(e) => {
            // 服务在上传期间被删除或写盘失败：本次文件不再被引用
            state.uploads.remove_all(&form.files).await;
            return Err(e);
        }
    };

    tracing::info!(
        "服务 {} 海报已更新: template={} 新上传={} 当前图片数={}",
        service.id,
        service.template_type,
        uploaded_count,
        service.poster_images.len() + usize::from(service.poster_image.is_some())
    );

    Ok(Json(PosterUpdateResponse {
        message: "Poster updated successfully".into(),
        poster_url: service.primary_poster().map(str::to_string),
        service,
    }))
}

/// 解析 existingImages：缺省或空白视为空列表，非法 JSON 返回 400
pub(crate) fn parse_existing_images(raw: Option<&str>) -> Result<Vec<String>, AppError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(Vec::new());
    };
    serde_json::from_str::<Vec<String>>(raw).map_err(|e| {
        tracing::warn!("existingImages 解析失败: {}", e);
        AppError::BadRequest(format!("existingImages must be a JSON array of strings: {e}"))
    })
}

pub fn create_services_router() -> Router<AppState> {
    Router::new()
        .route("/services", get(list_services).post(create_service))
        .route(
            "/services/:id",
            get(get_service).put(update_service).delete(delete_service),
        )
        .route("/services/:id/poster", post(upload_poster))
}
