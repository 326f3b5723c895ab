//! 语料服务 - 编排层
//!
//! ## 职责
//!
//! 1. **过期判断**：比较源文档和快照的修改时间，决定复用还是重新转换
//! 2. **转换**：读取文档 → 组装语料 → 写快照
//! 3. **发布**：新语料在旁边构建完毕后，通过一次 `Arc` 替换对读者可见
//! 4. **查询**：故事列表、章节、题目、词汇
//!
//! 读者拿到的是 `Arc<Corpus>`，要么是完整的旧语料，要么是完整的新语料。

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::infrastructure::{file_info, modified_time, FileInfo, SnapshotStore};
use crate::models::snapshot::EXAMPLE_SOURCE;
use crate::models::{
    builtin_corpus, load_paragraphs, reader_for, Chapter, ConversionInfo, Corpus, DocumentReader,
    Lexicon, QuizQuestion, Snapshot, StorySummary, VocabEntry,
};
use crate::services::VocabExtractor;
use crate::workflow::ChapterAssembler;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::{error, info, warn};

/// 过期判断结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheDecision {
    /// 快照可用
    Reuse,
    /// 没有快照，或源文档比快照新
    Rebuild,
    /// 快照和源文档都不存在
    SourceMissing,
}

/// 根据两个文件的状态决定是否需要重新转换
///
/// 只有源文档严格比快照新才重新转换；源文档缺失但快照存在时复用快照
pub fn needs_rebuild(source: &FileInfo, snapshot: &FileInfo) -> CacheDecision {
    match (source.exists, snapshot.exists) {
        (false, false) => CacheDecision::SourceMissing,
        (_, false) => CacheDecision::Rebuild,
        (false, true) => CacheDecision::Reuse,
        (true, true) => match (source.modified, snapshot.modified) {
            (Some(source_time), Some(snapshot_time)) if source_time > snapshot_time => {
                CacheDecision::Rebuild
            }
            _ => CacheDecision::Reuse,
        },
    }
}

/// 加载结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// 复用了已有快照
    Reused,
    /// 从源文档重新转换
    Converted,
    /// 使用内置示例语料
    Builtin,
}

/// 强制重建报告
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RebuildReport {
    pub old_stories_count: usize,
    pub new_stories_count: usize,
    pub stories_changed: bool,
    pub timestamp: DateTime<Local>,
}

/// 数据状态（管理用）
#[derive(Debug, Clone, Serialize)]
pub struct DataInfo {
    pub snapshot: FileInfo,
    pub source: FileInfo,
    pub stories_count: usize,
    /// 当前数据来源的描述
    pub data_source: String,
    pub needs_reconversion: bool,
    pub conversion_info: Option<ConversionInfo>,
}

/// 语料服务
///
/// - 唯一持有当前语料的模块
/// - 转换过程在旁边完成，最后一次性发布
pub struct CorpusService {
    source_path: PathBuf,
    store: SnapshotStore,
    reader: Box<dyn DocumentReader>,
    vocab: VocabExtractor,
    current: RwLock<Arc<Corpus>>,
}

impl CorpusService {
    /// 创建服务，按源文档扩展名选择读取器
    pub fn new(config: &Config, lexicon: Lexicon) -> Self {
        Self {
            reader: reader_for(&config.source_document),
            source_path: config.source_document.clone(),
            store: SnapshotStore::new(config.snapshot_path.clone()),
            vocab: VocabExtractor::new(Arc::new(lexicon)),
            current: RwLock::new(Arc::new(Corpus::new())),
        }
    }

    /// 替换文档读取器
    pub fn with_reader(mut self, reader: Box<dyn DocumentReader>) -> Self {
        self.reader = reader;
        self
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// 当前已发布的语料
    pub fn current(&self) -> Arc<Corpus> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// 发布新语料，返回被替换掉的旧语料
    fn publish(&self, corpus: Corpus) -> Arc<Corpus> {
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        std::mem::replace(&mut *guard, Arc::new(corpus))
    }

    /// 当前的过期判断
    pub async fn decide(&self) -> CacheDecision {
        let source = file_info(&self.source_path).await;
        let snapshot = self.store.info().await;
        needs_rebuild(&source, &snapshot)
    }

    /// 加载语料
    ///
    /// 快照可用时直接读取；否则从源文档转换并写快照；
    /// 两者都不存在时发布并保存内置示例语料。
    /// 出错时之前发布的语料保持可见。
    pub async fn load(&self) -> AppResult<LoadOutcome> {
        match self.decide().await {
            CacheDecision::Reuse => {
                let snapshot = self.store.read().await?;
                if let Some(info) = &snapshot.conversion_info {
                    info!(
                        "✓ 从快照加载 {} 个故事 (来源: {}, 转换时间: {})",
                        info.stories_count,
                        info.source_file,
                        info.timestamp.format("%Y-%m-%d %H:%M:%S")
                    );
                } else {
                    info!("✓ 从旧格式快照加载 {} 个故事", snapshot.stories.len());
                }
                self.publish(snapshot.stories);
                Ok(LoadOutcome::Reused)
            }
            CacheDecision::Rebuild => {
                info!("🔄 快照不存在或已过期，开始转换源文档...");
                let corpus = self.convert().await?;
                self.publish(corpus);
                Ok(LoadOutcome::Converted)
            }
            CacheDecision::SourceMissing => {
                warn!(
                    "⚠️ {}",
                    AppError::source_missing(&self.source_path, self.store.path())
                );
                let corpus = builtin_corpus();
                let snapshot = Snapshot::new(corpus, EXAMPLE_SOURCE, None);
                self.store.write(&snapshot).await?;
                self.publish(snapshot.stories);
                info!("✓ 示例语料已保存到快照");
                Ok(LoadOutcome::Builtin)
            }
        }
    }

    /// 加载语料，失败时不向上传播
    ///
    /// 当前没有任何已发布语料时回退到内置示例语料（不写快照）
    pub async fn load_or_fallback(&self) -> LoadOutcome {
        match self.load().await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("❌ 加载语料失败: {}", e);
                if self.current().is_empty() {
                    warn!("⚠️ 使用内置示例语料");
                    self.publish(builtin_corpus());
                }
                LoadOutcome::Builtin
            }
        }
    }

    /// 读取源文档、组装语料并写快照，不发布
    pub async fn convert(&self) -> AppResult<Corpus> {
        info!("📄 正在转换: {}", self.source_path.display());
        let paragraphs = load_paragraphs(&self.source_path, self.reader.as_ref()).await?;
        let corpus = ChapterAssembler::assemble(&paragraphs);

        let snapshot = Snapshot::new(
            corpus,
            self.source_path.display().to_string(),
            modified_time(&self.source_path).await,
        );
        self.store.write(&snapshot).await?;

        info!("✓ 转换完成，共 {} 个故事", snapshot.stories.len());
        Ok(snapshot.stories)
    }

    /// 强制重新转换
    ///
    /// 源文档不存在时返回 SourceMissing，状态不变。
    /// 新语料先在旁边解析完成，再写快照、发布。
    /// 旧快照由写入时的重命名原子替换，任何一步失败时旧快照都保持不变。
    pub async fn force_rebuild(&self) -> AppResult<RebuildReport> {
        if !file_info(&self.source_path).await.exists {
            return Err(AppError::source_missing(&self.source_path, self.store.path()));
        }
        info!("🔄 强制重新转换: {}", self.source_path.display());

        let paragraphs = load_paragraphs(&self.source_path, self.reader.as_ref()).await?;
        let corpus = ChapterAssembler::assemble(&paragraphs);

        let snapshot = Snapshot::new(
            corpus,
            self.source_path.display().to_string(),
            modified_time(&self.source_path).await,
        );
        self.store.write(&snapshot).await?;

        let new_stories_count = snapshot.stories.len();
        let old = self.publish(snapshot.stories);
        let report = RebuildReport {
            old_stories_count: old.len(),
            new_stories_count,
            stories_changed: old.len() != new_stories_count,
            timestamp: Local::now(),
        };
        crate::utils::logging::log_rebuild_report(report.old_stories_count, report.new_stories_count);
        Ok(report)
    }

    /// 源文档和快照的状态
    pub async fn data_info(&self) -> DataInfo {
        let source = file_info(&self.source_path).await;
        let snapshot = self.store.info().await;

        let decision = needs_rebuild(&source, &snapshot);
        let data_source = match (snapshot.exists, source.exists, decision) {
            (true, true, CacheDecision::Reuse) => "snapshot (up to date)",
            (true, true, _) => "document (newer than snapshot)",
            (true, false, _) => "snapshot only",
            (false, true, _) => "document only",
            (false, false, _) => "example data",
        };

        let conversion_info = if snapshot.exists {
            self.store.read().await.ok().and_then(|s| s.conversion_info)
        } else {
            None
        };

        DataInfo {
            stories_count: self.current().len(),
            data_source: data_source.to_string(),
            needs_reconversion: decision == CacheDecision::Rebuild,
            conversion_info,
            snapshot,
            source,
        }
    }

    // ========== 查询接口 ==========

    pub fn story_list(&self) -> Vec<StorySummary> {
        self.current().story_list()
    }

    pub fn chapter(&self, story_id: u32, chapter_num: u32) -> Option<Chapter> {
        self.current().chapter(story_id, chapter_num).cloned()
    }

    /// 章节题目，章节不存在时为空
    pub fn quiz(&self, story_id: u32, chapter_num: u32) -> Vec<QuizQuestion> {
        self.current()
            .chapter(story_id, chapter_num)
            .map(|c| c.quiz.clone())
            .unwrap_or_default()
    }

    /// 章节词汇：有显式词条时返回显式词条，否则自动挖掘
    pub fn vocabulary(&self, story_id: u32, chapter_num: u32) -> Vec<VocabEntry> {
        self.current()
            .chapter(story_id, chapter_num)
            .map(|c| self.vocab.vocabulary_for(c))
            .unwrap_or_default()
    }
}
