use std::sync::Arc;

use crate::config::{AppConfig, AuthConfig, UploadConfig};
use crate::error::StorageError;
use crate::features::ai_resources::AiResource;
use crate::features::carousel::Carousel;
use crate::features::news::NewsBoard;
use crate::features::partners::Partner;
use crate::features::posts::Post;
use crate::features::profile::{CompanyInfo, CompanyIntro, FounderInfo};
use crate::features::services::Service;
use crate::features::uploads::UploadStore;
use crate::startup::seed;
use crate::storage::{Document, DocumentBackend, FileBackend, IdSequence};

/// 站点全部内容文档
pub struct ContentStore {
    pub company: Document<CompanyInfo>,
    pub founder: Document<FounderInfo>,
    pub intro: Document<CompanyIntro>,
    pub ai_resources: Document<Vec<AiResource>>,
    pub services: Document<Vec<Service>>,
    pub carousel: Document<Carousel>,
    pub news: Document<NewsBoard>,
    pub posts: Document<Vec<Post>>,
    pub partners: Document<Vec<Partner>>,
    pub ids: IdSequence,
}

impl ContentStore {
    /// 打开（必要时初始化）所有文档
    pub async fn open(backend: Arc<dyn DocumentBackend>) -> Result<Self, StorageError> {
        let b = || backend.clone();
        Ok(Self {
            company: Document::open(b(), "company", seed::company).await?,
            founder: Document::open(b(), "founder", seed::founder).await?,
            intro: Document::open(b(), "intro", seed::intro).await?,
            ai_resources: Document::open(b(), "ai-resources", seed::ai_resources).await?,
            services: Document::open(b(), "services", seed::services).await?,
            carousel: Document::open(b(), "core-service-carousel", seed::carousel).await?,
            news: Document::open(b(), "news", seed::news).await?,
            posts: Document::open(b(), "posts", seed::posts).await?,
            partners: Document::open(b(), "partners", seed::partners).await?,
            ids: IdSequence::open(b()).await?,
        })
    }
}

/// 聚合的应用共享状态
#[derive(Clone)]
pub struct AppState {
    pub content: Arc<ContentStore>,
    pub uploads: Arc<UploadStore>,
    pub auth: Arc<AuthConfig>,
    pub limits: UploadConfig,
}

impl AppState {
    pub async fn new(
        config: &AppConfig,
        backend: Arc<dyn DocumentBackend>,
    ) -> Result<Self, StorageError> {
        Ok(Self {
            content: Arc::new(ContentStore::open(backend).await?),
            uploads: Arc::new(UploadStore::new(config.uploads_path())),
            auth: Arc::new(config.auth.clone()),
            limits: config.upload.clone(),
        })
    }

    /// 使用 `storage.data_dir` 下的 JSON 文件作为存储
    pub async fn from_config(config: &AppConfig) -> Result<Self, StorageError> {
        let backend: Arc<dyn DocumentBackend> = Arc::new(FileBackend::new(config.data_path()));
        Self::new(config, backend).await
    }
}
