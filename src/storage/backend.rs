use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::{fs, sync::RwLock};

use crate::error::StorageError;

/// 文档持久化后端。
///
/// 每个文档以名称寻址，整体读写；处理器只通过 [`super::Document`] 访问，
/// 替换后端（例如换成数据库）不影响业务代码。
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    /// 读取文档；文档不存在时返回 `Ok(None)`
    async fn load(&self, name: &str) -> Result<Option<Value>, StorageError>;

    /// 整体覆盖写入文档
    async fn store(&self, name: &str, value: &Value) -> Result<(), StorageError>;
}

/// `<dir>/<name>.json` 形式的文件后端，写入为带缩进的 JSON。
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }
}

#[async_trait]
impl DocumentBackend for FileBackend {
    async fn load(&self, name: &str) -> Result<Option<Value>, StorageError> {
        let path = self.path_for(name);
        let bytes = match fs::read(&path).await {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::io(path.display(), e)),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| StorageError::json(name, e))
    }

    async fn store(&self, name: &str, value: &Value) -> Result<(), StorageError> {
        let path = self.path_for(name);
        let data = serde_json::to_vec_pretty(value).map_err(|e| StorageError::json(name, e))?;

        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StorageError::io(self.dir.display(), e))?;
        // 先写临时文件再 rename，避免写到一半的文件被读到
        let tmp = self.dir.join(format!(".{name}.json.tmp"));
        fs::write(&tmp, &data)
            .await
            .map_err(|e| StorageError::io(tmp.display(), e))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| StorageError::io(path.display(), e))?;
        Ok(())
    }
}

/// 纯内存后端（测试或无需落盘的部署）
#[derive(Debug, Default)]
pub struct MemoryBackend {
    docs: RwLock<HashMap<String, Value>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// 直接读取已存储的原始文档
    pub async fn raw(&self, name: &str) -> Option<Value> {
        self.docs.read().await.get(name).cloned()
    }
}

#[async_trait]
impl DocumentBackend for MemoryBackend {
    async fn load(&self, name: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.docs.read().await.get(name).cloned())
    }

    async fn store(&self, name: &str, value: &Value) -> Result<(), StorageError> {
        self.docs
            .write()
            .await
            .insert(name.to_string(), value.clone());
        Ok(())
    }
}
