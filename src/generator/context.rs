use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Mutex;

use crate::cache::CacheManager;
use crate::config::Config;
use crate::llm::client::{LLMClient, TextGenerator};
use crate::store::LocalStore;

#[derive(Clone)]
pub struct GeneratorContext {
    /// 文本生成服务，用于与AI通信。
    pub generator: Arc<dyn TextGenerator>,
    /// 配置
    pub config: Config,
    /// 缓存管理器
    pub cache_manager: Arc<CacheManager>,
    /// 本地持久化存储
    pub store: Arc<Mutex<LocalStore>>,
}

impl GeneratorContext {
    /// 创建新的生成器上下文
    pub fn new(config: Config) -> Result<Self> {
        let llm_client = LLMClient::new(&config.llm)?;
        Self::with_generator(config, Arc::new(llm_client))
    }

    /// 使用指定的生成服务创建上下文
    pub fn with_generator(config: Config, generator: Arc<dyn TextGenerator>) -> Result<Self> {
        let cache_manager = Arc::new(CacheManager::new(config.cache.clone()));
        let store = Arc::new(Mutex::new(LocalStore::open(&config.store_path())?));

        Ok(Self {
            generator,
            config,
            cache_manager,
            store,
        })
    }
}
