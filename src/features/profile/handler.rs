use axum::{
    Router,
    extract::{Request, State},
    response::Json,
    routing::get,
};
use chrono::Utc;

use super::models::{
    CompanyInfo, CompanyIntro, FounderInfo, UpdateCompanyRequest, UpdateFounderRequest,
    UpdateIntroRequest,
};
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::features::assign_non_empty;
use crate::features::uploads::{FileField, read_submission};
use crate::state::AppState;

const PHOTO_FIELD: FileField = FileField::new("photo", 1);

#[utoipa::path(
    get,
    path = "/company",
    summary = "公司信息",
    responses((status = 200, description = "公司信息", body = CompanyInfo)),
    tag = "Profile"
)]
pub async fn get_company(State(state): State<AppState>) -> Json<CompanyInfo> {
    Json(state.content.company.snapshot().await)
}

#[utoipa::path(
    put,
    path = "/company",
    summary = "编辑公司信息",
    description = "非空字段覆盖原值，其余保持不变。",
    request_body = UpdateCompanyRequest,
    responses((status = 200, description = "更新后的公司信息", body = CompanyInfo)),
    tag = "Profile"
)]
pub async fn update_company(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<UpdateCompanyRequest>,
) -> Result<Json<CompanyInfo>, AppError> {
    let info = state
        .content
        .company
        .mutate(|c| {
            assign_non_empty(&mut c.name, req.name);
            assign_non_empty(&mut c.subtitle, req.subtitle);
            assign_non_empty(&mut c.slogan, req.slogan);
            assign_non_empty(&mut c.description, req.description);
            assign_non_empty(&mut c.address, req.address);
            assign_non_empty(&mut c.phone, req.phone);
            assign_non_empty(&mut c.email, req.email);
            c.updated_at = Utc::now();
            Ok(c.clone())
        })
        .await?;
    Ok(Json(info))
}

#[utoipa::path(
    get,
    path = "/founder",
    summary = "创始人信息",
    responses((status = 200, description = "创始人信息", body = FounderInfo)),
    tag = "Profile"
)]
pub async fn get_founder(State(state): State<AppState>) -> Json<FounderInfo> {
    Json(state.content.founder.snapshot().await)
}

#[utoipa::path(
    put,
    path = "/founder",
    summary = "编辑创始人信息",
    description = "接受 JSON 或 multipart；multipart 可附带 photo 文件。",
    request_body = UpdateFounderRequest,
    responses(
        (status = 200, description = "更新后的创始人信息", body = FounderInfo),
        (status = 400, description = "表单不合法", body = AppError)
    ),
    tag = "Profile"
)]
pub async fn update_founder(
    State(state): State<AppState>,
    req: Request,
) -> Result<Json<FounderInfo>, AppError> {
    let (body, form) =
        read_submission::<UpdateFounderRequest>(req, &state.uploads, &[PHOTO_FIELD]).await?;
    let uploaded = form.first_file(PHOTO_FIELD.name).map(|f| f.url.clone());

    let result = state
        .content
        .founder
        .mutate(|f| {
            assign_non_empty(&mut f.name, body.name);
            assign_non_empty(&mut f.title, body.title);
            assign_non_empty(&mut f.description, body.description);
            assign_non_empty(&mut f.photo, uploaded.or(body.photo));
            f.updated_at = Utc::now();
            Ok(f.clone())
        })
        .await;

    match result {
        Ok(info) => Ok(Json(info)),
        Err(e) => {
            state.uploads.remove_all(&form.files).await;
            Err(e)
        }
    }
}

#[utoipa::path(
    get,
    path = "/company-intro",
    summary = "公司简介",
    responses((status = 200, description = "公司简介", body = CompanyIntro)),
    tag = "Profile"
)]
pub async fn get_intro(State(state): State<AppState>) -> Json<CompanyIntro> {
    Json(state.content.intro.snapshot().await)
}

#[utoipa::path(
    put,
    path = "/company-intro",
    summary = "编辑公司简介",
    description = "提供 paragraphs 时整体替换段落列表。",
    request_body = UpdateIntroRequest,
    responses((status = 200, description = "更新后的公司简介", body = CompanyIntro)),
    tag = "Profile"
)]
pub async fn update_intro(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<UpdateIntroRequest>,
) -> Result<Json<CompanyIntro>, AppError> {
    let intro = state
        .content
        .intro
        .mutate(|i| {
            if let Some(p) = req.paragraphs {
                i.paragraphs = p;
            }
            i.updated_at = Utc::now();
            Ok(i.clone())
        })
        .await?;
    Ok(Json(intro))
}

pub fn create_profile_router() -> Router<AppState> {
    Router::new()
        .route("/company", get(get_company).put(update_company))
        .route("/founder", get(get_founder).put(update_founder))
        .route("/company-intro", get(get_intro).put(update_intro))
}
