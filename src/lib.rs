//! # Folktale Corpus
//!
//! 把民间故事文档转换成结构化语料（故事 → 章节 → 正文 / 题目 / 词汇），
//! 并以 JSON 快照缓存转换结果
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 只和文件系统打交道
//! - `SnapshotStore` - 快照读写（临时文件 + 重命名）、文件状态
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 纯逻辑，不做 I/O
//! - `classifier` - 段落结构分类
//! - `QuizExtractor` - 三种题目写法的抽取（含跨段落待定状态）
//! - `VocabExtractor` - 显式词条解析与按词表自动挖掘
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个段落流"的完整组装流程
//! - `AssemblyCtx` - 游标（当前故事 / 章节 / 小节）
//! - `ChapterAssembler` - 状态机（段落 → 语料）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/corpus_service` - 过期判断、转换、发布、查询
//! - `orchestrator/app` - 应用生命周期
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::SnapshotStore;
pub use models::{Chapter, Corpus, Lexicon, Paragraph, QuizQuestion, Story, VocabEntry};
pub use orchestrator::{App, CacheDecision, CorpusService, DataInfo, LoadOutcome, RebuildReport};
pub use services::{QuizExtractor, VocabExtractor};
pub use workflow::{AssemblyCtx, ChapterAssembler};
