//! 路由与中间件装配

use std::any::Any;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    response::{IntoResponse, Response},
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::cors::build_cors_layer;
use crate::error::AppError;
use crate::features::{
    ai_resources, auth, carousel, contact, dashboard, health, news, partners, posts, profile,
    services, uploads::PUBLIC_PREFIX,
};
use crate::openapi::ApiDoc;
use crate::request_id::request_id_middleware;
use crate::state::AppState;

fn compression_predicate() -> impl tower_http::compression::predicate::Predicate {
    use tower_http::compression::predicate::{NotForContentType, Predicate, SizeAbove};
    // 上传文件以图片为主，本身已压缩；只压缩 JSON / 文本 / SVG
    SizeAbove::default()
        .and(NotForContentType::GRPC)
        .and(NotForContentType::IMAGES)
        .and(NotForContentType::SSE)
        .and(NotForContentType::const_new("application/octet-stream"))
        .and(NotForContentType::const_new("application/pdf"))
        .and(NotForContentType::const_new("video/"))
        .and(NotForContentType::const_new("audio/"))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    tracing::error!("请求处理 panic: {}", detail);
    AppError::Panic.into_response()
}

async fn route_not_found() -> AppError {
    AppError::NotFound("Route not found".into())
}

/// 业务接口（挂载在 `api.prefix` 下）。
///
/// 内容类路由的写操作经过 [`auth::require_write_token`]；
/// 健康检查、登录/退出与留言表单不需要 token。
pub fn api_router(state: &AppState) -> Router<AppState> {
    let content = Router::new()
        .merge(profile::create_profile_router())
        .merge(ai_resources::create_ai_resources_router())
        .merge(services::create_services_router())
        .merge(carousel::create_carousel_router())
        .merge(news::create_news_router())
        .merge(posts::create_posts_router())
        .merge(partners::create_partners_router())
        .merge(dashboard::create_dashboard_router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_write_token,
        ));

    Router::new()
        .merge(health::create_health_router())
        .merge(auth::create_auth_router())
        .merge(contact::create_contact_router())
        .merge(content)
}

/// 组装完整应用：业务路由、上传文件静态服务、Swagger UI 与全局中间件。
pub fn build_app(state: AppState, config: &AppConfig) -> Router {
    let prefix = config.api.prefix.trim_end_matches('/');
    let uploads_dir = state.uploads.dir().to_path_buf();

    // axum 不允许在根路径 nest，前缀配置为 "/" 时直接合并
    let api = if prefix.is_empty() {
        api_router(&state)
    } else {
        Router::new().nest(prefix, api_router(&state))
    };

    let mut api = api.nest_service(PUBLIC_PREFIX, ServeDir::new(&uploads_dir));
    if !prefix.is_empty() {
        api = api.nest_service(&format!("{prefix}{PUBLIC_PREFIX}"), ServeDir::new(&uploads_dir));
    }

    let mut app = api
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(route_not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.upload.max_request_bytes))
        .layer(CompressionLayer::new().compress_when(compression_predicate()));

    match build_cors_layer(&config.cors) {
        Some(cors) => app = app.layer(cors),
        None => tracing::info!("CORS 未启用"),
    }

    app.layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(request_id_middleware))
}

#[cfg(test)]
mod tests {
    use super::compression_predicate;
    use axum::body::Body;
    use axum::http::{Response as HttpResponse, header};
    use tower_http::compression::predicate::Predicate;

    fn should_compress_for(ct: &str) -> bool {
        let body_bytes = vec![b'x'; 2048];
        let resp = HttpResponse::builder()
            .header(header::CONTENT_TYPE, ct)
            .body(Body::from(body_bytes))
            .expect("response");
        compression_predicate().should_compress(&resp)
    }

    #[test]
    fn json_is_compressed_but_uploaded_images_are_not() {
        assert!(should_compress_for("application/json"));
        assert!(should_compress_for("application/problem+json"));
        assert!(!should_compress_for("image/png"));
        assert!(!should_compress_for("image/jpeg"));
        assert!(should_compress_for("image/svg+xml"));
    }
}
