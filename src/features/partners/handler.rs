use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
};
use chrono::Utc;

use super::models::{Partner, PartnerRequest};
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::features::{MessageResponse, assign_non_empty};
use crate::state::AppState;
use crate::storage::max_id;

fn not_found() -> AppError {
    AppError::NotFound("Partner not found".into())
}

#[utoipa::path(
    get,
    path = "/partners",
    summary = "合作伙伴列表",
    responses((status = 200, description = "合作伙伴", body = [Partner])),
    tag = "Partners"
)]
pub async fn list_partners(State(state): State<AppState>) -> Json<Vec<Partner>> {
    Json(state.content.partners.snapshot().await)
}

#[utoipa::path(
    post,
    path = "/partners",
    summary = "新增合作伙伴",
    request_body = PartnerRequest,
    responses(
        (status = 201, description = "已创建", body = Partner),
        (status = 400, description = "缺少 name", body = AppError)
    ),
    tag = "Partners"
)]
pub async fn create_partner(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<PartnerRequest>,
) -> Result<(StatusCode, Json<Partner>), AppError> {
    let name = req
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Name is required".into()))?;

    let store = &state.content;
    let observed = store.partners.view(|l| max_id(l, |p| p.id)).await;
    let id = store.ids.next(store.partners.name(), observed).await?;

    let partner = Partner {
        id,
        name,
        description: req.description.unwrap_or_default(),
        logo: req.logo.filter(|l| !l.is_empty()),
        website: req.website.unwrap_or_default(),
        created_at: Some(Utc::now()),
        updated_at: None,
    };
    store
        .partners
        .mutate(|list| {
            list.push(partner.clone());
            Ok(())
        })
        .await?;

    tracing::info!("新增合作伙伴 id={} name={}", partner.id, partner.name);
    Ok((StatusCode::CREATED, Json(partner)))
}

#[utoipa::path(
    put,
    path = "/partners/{id}",
    summary = "编辑合作伙伴",
    params(("id" = u64, Path, description = "合作伙伴 id")),
    request_body = PartnerRequest,
    responses(
        (status = 200, description = "已更新", body = Partner),
        (status = 404, description = "合作伙伴不存在", body = AppError)
    ),
    tag = "Partners"
)]
pub async fn update_partner(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    JsonBody(req): JsonBody<PartnerRequest>,
) -> Result<Json<Partner>, AppError> {
    let updated = state
        .content
        .partners
        .mutate(|list| {
            let p = list.iter_mut().find(|p| p.id == id).ok_or_else(not_found)?;
            assign_non_empty(&mut p.name, req.name);
            assign_non_empty(&mut p.description, req.description);
            assign_non_empty(&mut p.website, req.website);
            if let Some(logo) = req.logo.filter(|l| !l.is_empty()) {
                p.logo = Some(logo);
            }
            p.updated_at = Some(Utc::now());
            Ok(p.clone())
        })
        .await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/partners/{id}",
    summary = "删除合作伙伴",
    params(("id" = u64, Path, description = "合作伙伴 id")),
    responses(
        (status = 200, description = "已删除", body = MessageResponse),
        (status = 404, description = "合作伙伴不存在", body = AppError)
    ),
    tag = "Partners"
)]
pub async fn delete_partner(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .content
        .partners
        .mutate(|list| {
            let idx = list.iter().position(|p| p.id == id).ok_or_else(not_found)?;
            list.remove(idx);
            Ok(())
        })
        .await?;
    Ok(Json(MessageResponse::new("Partner deleted successfully")))
}

pub fn create_partners_router() -> Router<AppState> {
    Router::new()
        .route("/partners", get(list_partners).post(create_partner))
        .route("/partners/:id", put(update_partner).delete(delete_partner))
}
