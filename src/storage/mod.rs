//! JSON 文档持久化：后端抽象、内存镜像与 id 分配

mod backend;
mod document;
mod sequence;

pub use backend::{DocumentBackend, FileBackend, MemoryBackend};
pub use document::Document;
pub use sequence::IdSequence;

/// 集合中最大的 id（空集合为 0）
pub fn max_id<T>(items: &[T], id_of: impl Fn(&T) -> u64) -> u64 {
    items.iter().map(id_of).max().unwrap_or(0)
}
