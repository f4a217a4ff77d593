use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::openapi::server::{ServerBuilder, ServerVariableBuilder};
use utoipa::{Modify, OpenApi};

/// 注入管理端写接口使用的 Bearer 安全定义（token 由 /auth/login 下发）。
struct AdminBearerSecurity;

impl Modify for AdminBearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "AdminBearer",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
    }
}

/// Swagger UI 的 server 配置：paths 不含 `config.api.prefix`，由 server 变量补齐。
struct ApiServers;

impl Modify for ApiServers {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let api = ServerBuilder::new()
            .url("{api_prefix}")
            .description(Some("业务接口（默认 /api）"))
            .parameter(
                "api_prefix",
                ServerVariableBuilder::new()
                    .default_value("/api")
                    .description(Some(
                        "业务接口前缀：对应 config.api.prefix（可通过 APP__API__PREFIX 覆盖）",
                    )),
            )
            .build();

        openapi.servers = Some(vec![api]);
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::features::health::handler::health_check,
        crate::features::auth::handler::login,
        crate::features::auth::handler::logout,
        crate::features::profile::handler::get_company,
        crate::features::profile::handler::update_company,
        crate::features::profile::handler::get_founder,
        crate::features::profile::handler::update_founder,
        crate::features::profile::handler::get_intro,
        crate::features::profile::handler::update_intro,
        crate::features::ai_resources::handler::list_resources,
        crate::features::ai_resources::handler::get_resource,
        crate::features::ai_resources::handler::create_resource,
        crate::features::ai_resources::handler::update_resource,
        crate::features::ai_resources::handler::delete_resource,
        crate::features::services::handler::list_services,
        crate::features::services::handler::get_service,
        crate::features::services::handler::create_service,
        crate::features::services::handler::update_service,
        crate::features::services::handler::delete_service,
        crate::features::services::handler::upload_poster,
        crate::features::carousel::handler::get_carousel,
        crate::features::carousel::handler::update_carousel,
        crate::features::carousel::handler::upload_images,
        crate::features::carousel::handler::delete_image,
        crate::features::carousel::handler::clear_images,
        crate::features::news::handler::list_news,
        crate::features::news::handler::get_news,
        crate::features::news::handler::create_news,
        crate::features::news::handler::update_news,
        crate::features::news::handler::delete_news,
        crate::features::news::handler::update_settings,
        crate::features::posts::handler::list_posts,
        crate::features::posts::handler::get_post,
        crate::features::posts::handler::create_post,
        crate::features::posts::handler::update_post,
        crate::features::posts::handler::delete_post,
        crate::features::partners::handler::list_partners,
        crate::features::partners::handler::create_partner,
        crate::features::partners::handler::update_partner,
        crate::features::partners::handler::delete_partner,
        crate::features::contact::handler::submit_contact,
        crate::features::dashboard::handler::dashboard_stats,
    ),
    components(schemas(crate::error::ProblemDetails)),
    modifiers(&AdminBearerSecurity, &ApiServers),
    tags(
        (name = "Health", description = "健康检查：服务探活。"),
        (name = "Auth", description = "管理员登录；写接口需携带登录返回的 Bearer token。"),
        (name = "Profile", description = "公司信息、创始人信息与公司简介。"),
        (name = "AiResources", description = "AI 工具导航。"),
        (
            name = "Services",
            description = "核心服务，含海报上传（单图/多图模板）。"
        ),
        (name = "Carousel", description = "核心服务轮播图片。"),
        (name = "News", description = "首页滚动快讯及展示参数。"),
        (name = "Posts", description = "新闻动态文章。"),
        (name = "Partners", description = "合作伙伴。"),
        (name = "Contact", description = "官网留言。"),
        (name = "Dashboard", description = "管理端统计。"),
    ),
    info(
        title = "XUELONG AI Site API",
        version = env!("CARGO_PKG_VERSION"),
        description = "官网与管理后台的内容接口（Axum + utoipa）。所有接口挂载在 `config.api.prefix`（默认 /api）下，OpenAPI 的 paths 不包含该前缀；上传文件通过 /uploads 与 /api/uploads 静态访问。"
    )
)]
pub struct ApiDoc;
