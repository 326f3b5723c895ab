use crate::models::loaders::{DocumentReader, ReadError};
use crate::models::paragraph::Paragraph;
use serde::Deserialize;

/// 段落转储文件结构
///
/// ```toml
/// [[paragraphs]]
/// text = "The Legend of Curupira"
/// bold = true
///
/// [[paragraphs]]
/// text = "Chapter 1: The Forest Guardian"
/// style = "Heading 2"
/// ```
#[derive(Debug, Deserialize)]
struct ParagraphDump {
    #[serde(default)]
    paragraphs: Vec<Paragraph>,
}

/// 读取外部工具导出的 TOML 段落转储
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlDocumentReader;

impl TomlDocumentReader {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentReader for TomlDocumentReader {
    fn parse(&self, raw: &str) -> Result<Vec<Paragraph>, ReadError> {
        let dump: ParagraphDump = toml::from_str(raw)?;
        Ok(dump.paragraphs)
    }

    fn supported_extensions(&self) -> Vec<&str> {
        vec!["toml"]
    }
}
