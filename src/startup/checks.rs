use crate::config::AppConfig;
use crate::error::AppError;
use std::fs;
use std::path::Path;

/// 执行启动检查
///
/// 1. 检查并创建数据目录
/// 2. 检查并创建上传目录
pub fn run_startup_checks(config: &AppConfig) -> Result<(), AppError> {
    tracing::info!("🔍 开始执行启动检查...");

    ensure_folder("数据", &config.data_path())?;
    ensure_folder("上传", &config.uploads_path())?;

    tracing::info!("✅ 启动检查完成");
    Ok(())
}

fn ensure_folder(label: &str, path: &Path) -> Result<(), AppError> {
    if path.is_dir() {
        tracing::info!("✅ {}目录已存在: {:?}", label, path);
        return Ok(());
    }
    if path.exists() {
        return Err(AppError::Internal(format!(
            "{label}目录路径被文件占用: {}",
            path.display()
        )));
    }

    tracing::warn!("📁 未找到{}目录，正在创建: {:?}", label, path);
    fs::create_dir_all(path)
        .map_err(|e| AppError::Internal(format!("创建{label}目录失败: {e}")))?;
    Ok(())
}
