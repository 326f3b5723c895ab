use crate::models::loaders::{DocumentReader, ReadError};
use crate::models::paragraph::Paragraph;

/// 纯文本读取器
///
/// - 空行分隔段落，段内换行保留为 `\n`
/// - 段落以 `**...**` 开头时视为首个片段加粗（标记会被去掉）
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextReader;

impl PlainTextReader {
    pub fn new() -> Self {
        Self
    }

    fn build_paragraph(lines: &[&str]) -> Paragraph {
        let text = lines.join("\n");
        match strip_bold_markers(&text) {
            Some(stripped) => Paragraph::bold(stripped),
            None => Paragraph::new(text),
        }
    }
}

/// `**Title** rest` → `Title rest`；不以加粗标记开头时返回 None
fn strip_bold_markers(text: &str) -> Option<String> {
    let rest = text.strip_prefix("**")?;
    let end = rest.find("**")?;
    Some(format!("{}{}", &rest[..end], &rest[end + 2..]))
}

impl DocumentReader for PlainTextReader {
    fn parse(&self, raw: &str) -> Result<Vec<Paragraph>, ReadError> {
        let mut paragraphs = Vec::new();
        let mut block: Vec<&str> = Vec::new();

        for line in raw.lines() {
            if line.trim().is_empty() {
                if !block.is_empty() {
                    paragraphs.push(Self::build_paragraph(&block));
                    block.clear();
                }
            } else {
                block.push(line.trim_end());
            }
        }
        if !block.is_empty() {
            paragraphs.push(Self::build_paragraph(&block));
        }

        Ok(paragraphs)
    }

    fn supported_extensions(&self) -> Vec<&str> {
        vec!["txt", "md", "text"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines_split_paragraphs() {
        let raw = "**The Saci**\n\nChapter 1\n\n1. What is Boitatá?\na) A dog\nb) A snake ✓\n\n\nThe end.";
        let paragraphs = PlainTextReader::new().parse(raw).unwrap();

        assert_eq!(paragraphs.len(), 4);
        assert_eq!(paragraphs[0].text, "The Saci");
        assert!(paragraphs[0].is_bold_first_run);
        assert!(!paragraphs[1].is_bold_first_run);
        assert_eq!(paragraphs[2].text, "1. What is Boitatá?\na) A dog\nb) A snake ✓");
        assert_eq!(paragraphs[3].text, "The end.");
    }

    #[test]
    fn test_unterminated_bold_marker_is_plain() {
        assert!(strip_bold_markers("**not closed").is_none());
        assert_eq!(strip_bold_markers("**Iara** of the river").as_deref(), Some("Iara of the river"));
    }
}
