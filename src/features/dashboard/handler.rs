use axum::{Router, extract::State, response::Json, routing::get};
use serde::Serialize;

use crate::state::AppState;

/// 管理端首页统计
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_posts: usize,
    pub total_partners: usize,
    pub total_ai_resources: usize,
    pub total_services: usize,
    pub active_ai_resources: usize,
    pub active_services: usize,
}

#[utoipa::path(
    get,
    path = "/dashboard/stats",
    summary = "管理端统计",
    responses((status = 200, description = "各类内容数量", body = DashboardStats)),
    tag = "Dashboard"
)]
pub async fn dashboard_stats(State(state): State<AppState>) -> Json<DashboardStats> {
    let c = &state.content;
    let total_posts = c.posts.view(Vec::len).await;
    let total_partners = c.partners.view(Vec::len).await;
    let (total_ai_resources, active_ai_resources) = c
        .ai_resources
        .view(|l| (l.len(), l.iter().filter(|r| r.is_active).count()))
        .await;
    let (total_services, active_services) = c
        .services
        .view(|l| (l.len(), l.iter().filter(|s| s.is_active).count()))
        .await;

    Json(DashboardStats {
        total_posts,
        total_partners,
        total_ai_resources,
        total_services,
        active_ai_resources,
        active_services,
    })
}

pub fn create_dashboard_router() -> Router<AppState> {
    Router::new().route("/dashboard/stats", get(dashboard_stats))
}
