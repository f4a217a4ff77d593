use std::collections::BTreeMap;
use std::sync::Arc;

use super::{Document, DocumentBackend};
use crate::error::{AppError, StorageError};

/// 持久化的单调 id 分配器，每个集合一个计数器。
///
/// 计数器记录已分配过的最大 id，删除记录后 id 也不会被复用（包括重启之后）。
pub struct IdSequence {
    counters: Document<BTreeMap<String, u64>>,
}

impl IdSequence {
    pub const DOCUMENT: &'static str = "sequences";

    pub async fn open(backend: Arc<dyn DocumentBackend>) -> Result<Self, StorageError> {
        Ok(Self {
            counters: Document::open(backend, Self::DOCUMENT, BTreeMap::new).await?,
        })
    }

    /// 为集合分配下一个 id；`observed_max` 为集合中现存的最大 id，
    /// 用于兼容手工编辑过或旧版本写出的数据文件。
    pub async fn next(&self, collection: &str, observed_max: u64) -> Result<u64, AppError> {
        self.counters
            .mutate(|counters| {
                let high = counters.entry(collection.to_string()).or_insert(0);
                *high = (*high).max(observed_max) + 1;
                Ok(*high)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBackend;

    #[tokio::test]
    async fn ids_are_monotonic_and_survive_reopen() {
        let backend: Arc<dyn DocumentBackend> = Arc::new(MemoryBackend::new());
        let seq = IdSequence::open(backend.clone()).await.expect("open");

        assert_eq!(seq.next("services", 3).await.expect("next"), 4);
        // 集合中的最大 id 被删除后（observed_max 变小），也不会回退
        assert_eq!(seq.next("services", 2).await.expect("next"), 5);
        assert_eq!(seq.next("news", 0).await.expect("next"), 1);

        let reopened = IdSequence::open(backend).await.expect("reopen");
        assert_eq!(reopened.next("services", 0).await.expect("next"), 6);
    }
}
