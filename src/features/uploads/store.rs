use rand::Rng;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::AppError;

/// 上传文件对外暴露的 URL 前缀
pub const PUBLIC_PREFIX: &str = "/uploads";

/// 已落盘的上传文件
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    /// 表单字段名
    pub field: String,
    /// 磁盘上的随机文件名
    pub filename: String,
    /// 客户端提供的原始文件名
    pub original_name: String,
    /// 相对 URL（/uploads/<filename>）
    pub url: String,
    pub size: usize,
}

/// 上传目录。文件原样保存，文件名为 `<字段名>-<毫秒时间戳>-<随机数><扩展名>`。
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn save(
        &self,
        field: &str,
        original_name: &str,
        data: &[u8],
    ) -> Result<StoredFile, AppError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AppError::Internal(format!("创建上传目录失败: {e}")))?;

        let filename = random_filename(field, original_name);
        let path = self.dir.join(&filename);
        fs::write(&path, data)
            .await
            .map_err(|e| AppError::Internal(format!("写入上传文件失败 {path:?}: {e}")))?;

        tracing::info!("已保存上传文件: {} ({} bytes)", filename, data.len());
        Ok(StoredFile {
            field: field.to_string(),
            url: public_url(&filename),
            filename,
            original_name: original_name.to_string(),
            size: data.len(),
        })
    }

    /// 尽力删除文件：失败只记录日志，返回是否确实删除了文件
    pub async fn remove(&self, filename: &str) -> bool {
        if !is_plain_filename(filename) {
            tracing::warn!("拒绝删除可疑文件名: {:?}", filename);
            return false;
        }
        let path = self.dir.join(filename);
        match fs::remove_file(&path).await {
            Ok(()) => true,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
            Err(e) => {
                tracing::warn!("删除上传文件失败 {:?}: {}", path, e);
                false
            }
        }
    }

    /// 批量尽力删除
    pub async fn remove_all(&self, files: &[StoredFile]) {
        for f in files {
            self.remove(&f.filename).await;
        }
    }

}

pub fn public_url(filename: &str) -> String {
    format!("{PUBLIC_PREFIX}/{filename}")
}

fn is_plain_filename(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.contains("..")
}

/// 保留原扩展名（仅字母数字，最长 10 个字符），其余部分随机生成
fn random_filename(field: &str, original_name: &str) -> String {
    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.len() <= 10 && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_default();
    let field: String = field
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    let field = if field.is_empty() { "file".to_string() } else { field };
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    format!(
        "{field}-{}-{suffix}{ext}",
        chrono::Utc::now().timestamp_millis()
    )
}
