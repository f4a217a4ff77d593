use std::future::IntoFuture;

use tracing_subscriber::EnvFilter;
use xuelong_site::config::LoggingConfig;
use xuelong_site::startup::run_startup_checks;
use xuelong_site::{AppConfig, AppState, ShutdownManager, build_app};

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "xuelong_site={level},tower_http={level}",
            level = logging.level
        ))
    });
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if logging.format.eq_ignore_ascii_case("compact") {
        builder.compact().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() {
    // 配置加载先于日志初始化，失败时只能直接输出到 stderr
    let config = match AppConfig::init_global() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("配置加载失败: {e}");
            std::process::exit(1);
        }
    };
    init_tracing(&config.logging);

    let shutdown_manager = ShutdownManager::new();
    if let Err(e) = shutdown_manager.start_signal_handler() {
        tracing::error!("信号处理器启动失败: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run_startup_checks(config) {
        tracing::error!("启动检查失败: {}", e);
        std::process::exit(1);
    }

    let state = match AppState::from_config(config).await {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("加载数据文件失败: {}", e);
            std::process::exit(1);
        }
    };

    let app = build_app(state, config);

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("绑定地址失败 {}: {}", addr, e);
            std::process::exit(1);
        });

    tracing::info!("Server: http://{}", addr);
    tracing::info!("Docs: http://{}/docs", addr);
    tracing::info!("Health: http://{}{}/health", addr, config.api.prefix);
    tracing::info!("Data: {:?}", config.data_path());
    tracing::info!("Uploads: {:?}", config.uploads_path());
    if !config.auth.protect_writes {
        tracing::warn!("写接口保护已关闭（auth.protect_writes = false）");
    }

    let shutdown_timeout = config.shutdown.timeout_duration();
    let signal = shutdown_manager.clone();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        let reason = signal.wait_for_shutdown().await;
        tracing::info!("接收到退出信号: {:?}，开始优雅关闭HTTP服务器...", reason);
    })
    .into_future();

    // 收到退出信号后，最多等待 shutdown.timeout_secs 让在途请求完成
    let deadline = async {
        shutdown_manager.wait_for_shutdown().await;
        tokio::time::sleep(shutdown_timeout).await;
    };

    tokio::select! {
        res = server => {
            if let Err(e) = res {
                tracing::error!("服务器运行错误: {}", e);
                std::process::exit(1);
            }
            tracing::info!("服务器已优雅关闭");
        }
        _ = deadline => {
            tracing::warn!("优雅退出超时（{}秒），强制退出", config.shutdown.timeout_secs);
        }
    }
}
