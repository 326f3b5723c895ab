//! 应用入口 - 编排层
//!
//! 1. **初始化**：启动日志、加载词表、创建 CorpusService
//! 2. **运行**：加载（或强制重建）语料，输出概览

use crate::config::Config;
use crate::models::Lexicon;
use crate::orchestrator::corpus_service::{CorpusService, LoadOutcome};
use crate::utils::logging;
use anyhow::{Context, Result};
use tracing::{info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    service: CorpusService,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        logging::log_startup(
            &config.source_document.display().to_string(),
            &config.snapshot_path.display().to_string(),
        );

        let lexicon = load_lexicon(&config).await?;
        info!("📚 词表: {} 个词条，每章最多 {} 个", lexicon.len(), lexicon.max_entries());

        let service = CorpusService::new(&config, lexicon);
        Ok(Self { config, service })
    }

    pub fn service(&self) -> &CorpusService {
        &self.service
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        let outcome = if self.config.force_rebuild {
            match self.service.force_rebuild().await {
                Ok(_) => LoadOutcome::Converted,
                Err(e) => {
                    warn!("⚠️ 强制重新转换失败: {}，改为常规加载", e);
                    self.service.load_or_fallback().await
                }
            }
        } else {
            self.service.load_or_fallback().await
        };

        let corpus = self.service.current();
        if corpus.is_empty() {
            warn!("⚠️ 语料为空，源文档中没有识别出任何故事");
        }

        info!("✓ 语料来源: {:?}", outcome);
        logging::log_corpus_summary(&corpus, &self.service.story_list());
        Ok(())
    }
}

/// 有词表文件时从文件加载，否则使用内置词表并应用 MAX_VOCABULARY
async fn load_lexicon(config: &Config) -> Result<Lexicon> {
    match &config.lexicon_file {
        Some(path) => Lexicon::from_toml_file(path)
            .await
            .with_context(|| format!("加载词表失败: {}", path.display())),
        None => Ok(Lexicon::default().with_max_entries(config.max_vocabulary)),
    }
}
