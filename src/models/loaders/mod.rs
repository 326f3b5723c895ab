//! 文档读取器
//!
//! 原始文档 → 段落流。真正的文字处理器文档由外部工具读取，
//! 这里定义读取器接口，并提供 TOML 段落转储与纯文本两种实现。

pub mod text_loader;
pub mod toml_loader;

pub use text_loader::PlainTextReader;
pub use toml_loader::TomlDocumentReader;

use crate::error::{AppError, AppResult};
use crate::models::paragraph::Paragraph;
use std::path::Path;
use tokio::fs;

/// 读取器内部错误
pub type ReadError = Box<dyn std::error::Error + Send + Sync>;

/// 文档读取器
///
/// 只负责把原始文本切分成段落，不做任何结构判断
pub trait DocumentReader: Send + Sync {
    /// 解析原始文本
    fn parse(&self, raw: &str) -> Result<Vec<Paragraph>, ReadError>;

    /// 支持的文件扩展名
    fn supported_extensions(&self) -> Vec<&str>;
}

/// 根据扩展名选择读取器，未知扩展名按纯文本处理
pub fn reader_for(path: &Path) -> Box<dyn DocumentReader> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let toml = TomlDocumentReader::new();
    if toml.supported_extensions().contains(&ext.as_str()) {
        Box::new(toml)
    } else {
        Box::new(PlainTextReader::new())
    }
}

/// 读取文档并切分为段落
///
/// 文件不存在、无法读取或无法解析都会得到 `SourceError::Unreadable`
pub async fn load_paragraphs(path: &Path, reader: &dyn DocumentReader) -> AppResult<Vec<Paragraph>> {
    let raw = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::source_unreadable(path, e))?;

    let paragraphs = reader.parse(&raw).map_err(|e| {
        AppError::source_unreadable(path, std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })?;

    tracing::info!(
        "✓ 已读取文档 {}: {} 个段落",
        path.file_name().unwrap_or_default().to_string_lossy(),
        paragraphs.len()
    );
    Ok(paragraphs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_for_extension() {
        let toml = reader_for(Path::new("assets/book.TOML"));
        assert_eq!(toml.supported_extensions(), vec!["toml"]);

        let text = reader_for(Path::new("assets/book.txt"));
        assert!(text.supported_extensions().contains(&"txt"));

        let unknown = reader_for(Path::new("assets/book"));
        assert!(unknown.supported_extensions().contains(&"txt"));
    }

    #[tokio::test]
    async fn test_load_missing_document_is_unreadable() {
        let reader = PlainTextReader::new();
        let err = load_paragraphs(Path::new("/nonexistent/book.txt"), &reader)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Source(crate::error::SourceError::Unreadable { .. })
        ));
    }
}
