use serde::{Deserialize, Serialize};

/// 文档段落
///
/// 由外部的文档读取器产出，是解析流水线的输入单元。
/// 段落内部可以包含软换行（`\n`），例如整道题写在同一段里。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// 段落文本
    pub text: String,
    /// 第一个文本片段是否加粗
    #[serde(default, alias = "bold")]
    pub is_bold_first_run: bool,
    /// 段落样式名
    #[serde(default = "default_style", alias = "style")]
    pub style_name: String,
}

fn default_style() -> String {
    "Normal".to_string()
}

impl Paragraph {
    /// 普通段落
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_bold_first_run: false,
            style_name: default_style(),
        }
    }

    /// 首个片段加粗的段落
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            is_bold_first_run: true,
            ..Self::new(text)
        }
    }
}
