use crate::error::{AppResult, ConfigError};
use std::path::PathBuf;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 源文档路径（段落转储 .toml 或纯文本）
    pub source_document: PathBuf,
    /// JSON 快照路径
    pub snapshot_path: PathBuf,
    /// 自定义词表文件（TOML），为空时使用内置词表
    pub lexicon_file: Option<PathBuf>,
    /// 启动时是否强制重新转换
    pub force_rebuild: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 自动挖掘词汇的上限
    pub max_vocabulary: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_document: PathBuf::from("assets/BrazilianFolktales.toml"),
            snapshot_path: PathBuf::from("data/stories_data.json"),
            lexicon_file: None,
            force_rebuild: false,
            verbose_logging: false,
            max_vocabulary: 12,
        }
    }
}

impl Config {
    /// 从环境变量读取配置，未设置或无法解析的项使用默认值
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            source_document: std::env::var("SOURCE_DOCUMENT").map(PathBuf::from).unwrap_or(default.source_document),
            snapshot_path: std::env::var("SNAPSHOT_PATH").map(PathBuf::from).unwrap_or(default.snapshot_path),
            lexicon_file: std::env::var("LEXICON_FILE").ok().filter(|v| !v.is_empty()).map(PathBuf::from),
            force_rebuild: std::env::var("FORCE_REBUILD").ok().and_then(|v| v.parse().ok()).unwrap_or(default.force_rebuild),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            max_vocabulary: std::env::var("MAX_VOCABULARY").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_vocabulary),
        }
    }

    /// 严格版本：设置了但无法解析的环境变量会报错，而不是静默回退
    pub fn try_from_env() -> AppResult<Self> {
        let mut config = Self::from_env();
        config.force_rebuild = parse_env_strict("FORCE_REBUILD", "bool", config.force_rebuild)?;
        config.verbose_logging = parse_env_strict("VERBOSE_LOGGING", "bool", config.verbose_logging)?;
        config.max_vocabulary = parse_env_strict("MAX_VOCABULARY", "usize", config.max_vocabulary)?;
        Ok(config)
    }
}

fn parse_env_strict<T: std::str::FromStr>(var_name: &str, expected_type: &str, fallback: T) -> AppResult<T> {
    match std::env::var(var_name) {
        Ok(value) => value.parse().map_err(|_| {
            ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }
            .into()
        }),
        Err(_) => Ok(fallback),
    }
}
