//! 基础设施层（Infrastructure Layer）
//!
//! 只和文件系统打交道，不认识故事 / 章节的业务含义

pub mod snapshot_store;

pub use snapshot_store::{file_info, modified_time, FileInfo, SnapshotStore};
