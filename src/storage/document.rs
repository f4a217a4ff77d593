use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::DocumentBackend;
use crate::error::{AppError, StorageError};

/// 单个 JSON 文档的内存镜像。
///
/// 读操作直接读镜像；写操作在写锁内对副本修改，落盘成功后才替换镜像，
/// 因此同一文档的写入是串行的，且写盘失败不会留下半更新的镜像。
pub struct Document<T> {
    name: &'static str,
    backend: Arc<dyn DocumentBackend>,
    mirror: RwLock<T>,
}

impl<T> Document<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    /// 打开文档：不存在时写入默认值；存在但无法解析时记录错误并在内存中使用默认值，
    /// 原文件保留到下一次写入。
    pub async fn open(
        backend: Arc<dyn DocumentBackend>,
        name: &'static str,
        default: impl FnOnce() -> T,
    ) -> Result<Self, StorageError> {
        let value = match backend.load(name).await {
            Ok(Some(raw)) => match serde_json::from_value::<T>(raw) {
                Ok(v) => v,
                Err(e) => {
                    tracing::error!("文档 {} 解析失败，使用默认数据: {}", name, e);
                    default()
                }
            },
            Ok(None) => {
                let v = default();
                let raw = serde_json::to_value(&v).map_err(|e| StorageError::json(name, e))?;
                backend.store(name, &raw).await?;
                tracing::info!("文档 {} 不存在，已写入默认数据", name);
                v
            }
            Err(StorageError::Json { message, .. }) => {
                tracing::error!("文档 {} 解析失败，使用默认数据: {}", name, message);
                default()
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            name,
            backend,
            mirror: RwLock::new(value),
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 镜像的完整副本
    pub async fn snapshot(&self) -> T {
        self.mirror.read().await.clone()
    }

    /// 在读锁下计算结果，避免整体克隆
    pub async fn view<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&*self.mirror.read().await)
    }

    /// 修改文档并整体落盘。闭包返回错误时不写盘、不改镜像。
    pub async fn mutate<R>(
        &self,
        f: impl FnOnce(&mut T) -> Result<R, AppError>,
    ) -> Result<R, AppError> {
        let mut guard = self.mirror.write().await;
        let mut working = guard.clone();
        let out = f(&mut working)?;

        let raw = serde_json::to_value(&working).map_err(|e| StorageError::json(self.name, e))?;
        self.backend.store(self.name, &raw).await?;
        *guard = working;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBackend;
    use serde_json::json;

    #[tokio::test]
    async fn open_persists_default_when_missing() {
        let backend = Arc::new(MemoryBackend::new());
        let doc = Document::open(backend.clone(), "partners", || vec![1u64, 2, 3])
            .await
            .expect("open");

        assert_eq!(doc.snapshot().await, vec![1, 2, 3]);
        assert_eq!(backend.raw("partners").await, Some(json!([1, 2, 3])));
    }

    #[tokio::test]
    async fn open_falls_back_to_default_without_overwriting_bad_shape() {
        let backend = Arc::new(MemoryBackend::new());
        backend
            .store("posts", &json!({"unexpected": true}))
            .await
            .expect("seed");

        let doc = Document::<Vec<u64>>::open(backend.clone(), "posts", Vec::new)
            .await
            .expect("open");

        assert!(doc.snapshot().await.is_empty());
        assert_eq!(backend.raw("posts").await, Some(json!({"unexpected": true})));
    }

    #[tokio::test]
    async fn failed_mutation_leaves_mirror_and_backend_untouched() {
        let backend = Arc::new(MemoryBackend::new());
        let doc = Document::open(backend.clone(), "news", || vec![1u64])
            .await
            .expect("open");

        let res: Result<(), AppError> = doc
            .mutate(|v| {
                v.push(2);
                Err(AppError::BadRequest("nope".into()))
            })
            .await;
        assert!(res.is_err());
        assert_eq!(doc.snapshot().await, vec![1]);
        assert_eq!(backend.raw("news").await, Some(json!([1])));

        doc.mutate(|v| {
            v.push(2);
            Ok(())
        })
        .await
        .expect("mutate");
        assert_eq!(backend.raw("news").await, Some(json!([1, 2])));
    }
}
