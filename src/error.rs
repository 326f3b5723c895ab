use std::error::Error as StdError;
use std::path::Path;
use thiserror::Error;

type BoxedSource = Box<dyn StdError + Send + Sync>;

/// 应用程序错误类型
///
/// 只有文档级、结构级的失败才会上升为错误；
/// 单行的题目/词汇记录解析失败在本地丢弃，不会出现在这里。
#[derive(Debug, Error)]
pub enum AppError {
    /// 源文档错误
    #[error("源文档错误: {0}")]
    Source(#[from] SourceError),
    /// 快照文件错误
    #[error("快照错误: {0}")]
    Snapshot(#[from] SnapshotError),
    /// 词表错误
    #[error("词表错误: {0}")]
    Lexicon(#[from] LexiconError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 源文档错误
#[derive(Debug, Error)]
pub enum SourceError {
    /// 快照和源文档都不存在，调用方应回退到内置示例语料
    #[error("源文档与快照均不存在 (文档: {source_path}, 快照: {snapshot_path})")]
    Missing {
        source_path: String,
        snapshot_path: String,
    },
    /// 打开或读取文档失败
    #[error("读取文档失败 ({path}): {source}")]
    Unreadable {
        path: String,
        #[source]
        source: BoxedSource,
    },
}

/// 快照文件错误
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// 读取快照失败
    #[error("读取快照失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: BoxedSource,
    },
    /// 快照内容无法解析或缺少必需字段
    #[error("快照已损坏 ({path}): {reason}")]
    Corrupt { path: String, reason: String },
    /// 写入快照失败
    #[error("写入快照失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: BoxedSource,
    },
}

/// 词表错误
#[derive(Debug, Error)]
pub enum LexiconError {
    /// 读取词表文件失败
    #[error("读取词表文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: BoxedSource,
    },
    /// 词表文件格式错误
    #[error("词表文件格式错误 ({path}): {source}")]
    Invalid {
        path: String,
        #[source]
        source: BoxedSource,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建"源文档缺失"错误
    pub fn source_missing(source_path: impl AsRef<Path>, snapshot_path: impl AsRef<Path>) -> Self {
        AppError::Source(SourceError::Missing {
            source_path: source_path.as_ref().display().to_string(),
            snapshot_path: snapshot_path.as_ref().display().to_string(),
        })
    }

    /// 创建文档读取错误
    pub fn source_unreadable(
        path: impl AsRef<Path>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        AppError::Source(SourceError::Unreadable {
            path: path.as_ref().display().to_string(),
            source: Box::new(source),
        })
    }

    /// 创建快照读取错误
    pub fn snapshot_read_failed(
        path: impl AsRef<Path>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        AppError::Snapshot(SnapshotError::ReadFailed {
            path: path.as_ref().display().to_string(),
            source: Box::new(source),
        })
    }

    /// 创建快照损坏错误
    pub fn snapshot_corrupt(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        AppError::Snapshot(SnapshotError::Corrupt {
            path: path.as_ref().display().to_string(),
            reason: reason.into(),
        })
    }

    /// 创建快照写入错误
    pub fn snapshot_write_failed(
        path: impl AsRef<Path>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        AppError::Snapshot(SnapshotError::WriteFailed {
            path: path.as_ref().display().to_string(),
            source: Box::new(source),
        })
    }

    /// 是否为"源文档缺失"，调用方据此回退到内置语料
    pub fn is_source_missing(&self) -> bool {
        matches!(self, AppError::Source(SourceError::Missing { .. }))
    }

    /// 是否为快照损坏
    pub fn is_snapshot_corrupt(&self) -> bool {
        matches!(self, AppError::Snapshot(SnapshotError::Corrupt { .. }))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
