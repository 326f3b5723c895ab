//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `corpus_service` - 语料服务
//! - 过期判断、转换、快照读写
//! - 持有当前语料并负责一次性发布
//! - 对外提供查询接口
//!
//! ### `app` - 应用入口
//! - 初始化词表和服务
//! - 按配置加载或强制重建，输出概览
//!
//! ## 层次关系
//!
//! ```text
//! app
//!     ↓
//! corpus_service (过期判断 / 发布 / 查询)
//!     ↓
//! workflow::ChapterAssembler (段落流 → 语料)
//!     ↓
//! services (能力层：classifier / quiz / vocab)
//!     ↓
//! infrastructure (基础设施：SnapshotStore)
//! ```

pub mod app;
pub mod corpus_service;

pub use app::App;
pub use corpus_service::{
    needs_rebuild, CacheDecision, CorpusService, DataInfo, LoadOutcome, RebuildReport,
};
