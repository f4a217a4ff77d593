/// 统一错误处理模块
pub mod error;

/// 配置模块
pub mod config;

/// JSON 文档存储
pub mod storage;

/// 启动检查与默认数据
pub mod startup;

/// 功能聚合模块
pub mod features;

/// 应用状态聚合模块
pub mod state;

/// 路由与中间件装配
pub mod app;

/// OpenAPI 文档
pub mod openapi;

/// CORS 配置
pub mod cors;

/// 请求 ID 透传
pub mod request_id;

/// 请求体提取器
pub mod extract;

/// 优雅退出管理模块
pub mod shutdown;

// 导出常用类型供外部使用
pub use app::build_app;
pub use config::AppConfig;
pub use error::AppError;
pub use shutdown::{ShutdownManager, ShutdownReason};
pub use state::AppState;
