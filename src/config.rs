use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 全局配置单例（仅二进制入口使用，库代码通过参数传递配置）
static CONFIG: OnceCell<AppConfig> = OnceCell::new();

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    pub host: String,
    /// 监听端口
    pub port: u16,
}

/// API 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API 路由前缀
    pub prefix: String,
}

/// 存储目录配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON 文档目录
    pub data_dir: String,
    /// 上传文件目录
    pub uploads_dir: String,
}

/// 上传限制
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// 单个字段允许的最大文件数
    #[serde(default = "UploadConfig::default_max_files")]
    pub max_files: usize,
    /// 单次请求体上限（字节）
    #[serde(default = "UploadConfig::default_max_request_bytes")]
    pub max_request_bytes: usize,
}

impl UploadConfig {
    fn default_max_files() -> usize {
        10
    }
    fn default_max_request_bytes() -> usize {
        50 * 1024 * 1024
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_files: Self::default_max_files(),
            max_request_bytes: Self::default_max_request_bytes(),
        }
    }
}

/// 管理员认证配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
    pub email: String,
    /// 登录成功后下发的固定 Bearer 令牌
    pub token: String,
    /// 是否要求写操作携带 Bearer 令牌
    #[serde(default = "AuthConfig::default_protect_writes")]
    pub protect_writes: bool,
}

impl AuthConfig {
    fn default_protect_writes() -> bool {
        true
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "admin123".to_string(),
            email: "admin@xuelongai.com".to_string(),
            token: "sample-jwt-token".to_string(),
            protect_writes: Self::default_protect_writes(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别（RUST_LOG 优先）
    pub level: String,
    /// 日志格式：full | compact
    pub format: String,
}

/// CORS 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// 是否启用 CORS
    #[serde(default = "CorsConfig::default_enabled")]
    pub enabled: bool,
    /// 允许的 Origin 列表（支持 "*" 表示任意）
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    /// 允许的方法列表（支持 "*" 表示任意）
    #[serde(default)]
    pub allowed_methods: Vec<String>,
    /// 允许的请求头列表（支持 "*" 表示任意）
    #[serde(default)]
    pub allowed_headers: Vec<String>,
    /// 是否允许携带凭证（Cookie/Authorization）
    #[serde(default)]
    pub allow_credentials: bool,
    /// 预检缓存时间（秒）
    #[serde(default)]
    pub max_age_secs: Option<u64>,
}

impl CorsConfig {
    fn default_enabled() -> bool {
        true
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            allowed_origins: vec!["*".to_string()],
            allowed_methods: vec!["*".to_string()],
            allowed_headers: vec!["*".to_string()],
            allow_credentials: false,
            max_age_secs: None,
        }
    }
}

/// 优雅退出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShutdownConfig {
    /// 优雅退出超时时间（秒）
    #[serde(default = "ShutdownConfig::default_timeout")]
    pub timeout_secs: u64,
}

impl ShutdownConfig {
    fn default_timeout() -> u64 {
        10
    }

    pub fn timeout_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            timeout_secs: Self::default_timeout(),
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub shutdown: ShutdownConfig,
}

impl AppConfig {
    /// 加载配置：内置默认值 → config.toml（可选）→ 环境变量覆盖
    ///
    /// 环境变量示例：`APP__SERVER__PORT=8080`、`APP__AUTH__PROTECT_WRITES=false`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path();
        tracing::info!("正在从 {:?} 加载配置文件", config_path);

        let builder = ConfigBuilder::builder()
            .add_source(ConfigBuilder::try_from(&AppConfig::default())?)
            .add_source(File::from(config_path).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        builder.try_deserialize()
    }

    /// 获取全局配置单例
    pub fn global() -> &'static AppConfig {
        CONFIG.get().expect("配置未初始化，请先调用 init_global()")
    }

    /// 初始化全局配置
    pub fn init_global() -> Result<&'static AppConfig, ConfigError> {
        let config = Self::load()?;
        CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("配置已经被初始化".to_string()))?;
        Ok(Self::global())
    }

    fn get_config_path() -> PathBuf {
        std::env::var("APP_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.toml"))
    }

    /// 获取服务器监听地址
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.storage.data_dir)
    }

    pub fn uploads_path(&self) -> PathBuf {
        PathBuf::from(&self.storage.uploads_dir)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            api: ApiConfig {
                prefix: "/api".to_string(),
            },
            storage: StorageConfig {
                data_dir: "./data".to_string(),
                uploads_dir: "./uploads".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "full".to_string(),
            },
            upload: UploadConfig::default(),
            auth: AuthConfig::default(),
            cors: CorsConfig::default(),
            shutdown: ShutdownConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AppConfig;

    #[test]
    fn defaults_serve_api_under_api_prefix() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.api.prefix, "/api");
        assert_eq!(cfg.server_addr(), "0.0.0.0:5000");
        assert_eq!(cfg.upload.max_files, 10);
        assert!(cfg.auth.protect_writes);
    }

    #[test]
    fn defaults_round_trip_through_config_builder() {
        let built = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default()).expect("from defaults"))
            .build()
            .expect("build");
        let cfg: AppConfig = built.try_deserialize().expect("deserialize");
        assert_eq!(cfg.storage.data_dir, "./data");
        assert_eq!(cfg.auth.username, "admin");
    }
}
