//! 段落结构分类 - 业务能力层
//!
//! 纯函数：段落 → 标签，不依赖任何 I/O，可以独立测试。

use crate::models::Paragraph;
use once_cell::sync::Lazy;
use regex::Regex;

/// 段落标签
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphKind {
    /// 故事标题
    StoryTitle,
    /// 章节标题
    ChapterHeader,
    /// 词汇小节标题
    VocabularyHeader,
    /// 题目小节触发行
    QuizTrigger,
    /// 正文
    Body,
}

/// 视为"正确答案"标记的字符
pub const CHECKMARKS: [char; 3] = ['✅', '✓', '✔'];

const VOCABULARY_KEYWORDS: [&str; 5] = [
    "vocabulary",
    "vocabulário",
    "key words",
    "palavras-chave",
    "glossary",
];

/// 标题长度上限（按字符计）
const STORY_TITLE_MAX_CHARS: usize = 50;

static CHAPTER_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:chapter|capítulo)\s+\d+").expect("章节正则无效"));

static NUMBERED_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.").expect("编号正则无效"));

static OPTION_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-D]\)").expect("选项正则无效"));

/// 对段落分类，按固定顺序检查，先命中者生效
pub fn classify(paragraph: &Paragraph) -> ParagraphKind {
    let text = paragraph.text.trim();

    if is_story_title(paragraph) {
        ParagraphKind::StoryTitle
    } else if is_chapter_header(text) {
        ParagraphKind::ChapterHeader
    } else if is_vocabulary_header(text) {
        ParagraphKind::VocabularyHeader
    } else if is_quiz_trigger(text) {
        ParagraphKind::QuizTrigger
    } else {
        ParagraphKind::Body
    }
}

/// 首个片段加粗且较短，或全文大写
pub fn is_story_title(paragraph: &Paragraph) -> bool {
    let text = paragraph.text.trim();
    (paragraph.is_bold_first_run && text.chars().count() < STORY_TITLE_MAX_CHARS)
        || is_all_uppercase(text)
}

/// 至少有一个区分大小写的字符，且没有小写字符
fn is_all_uppercase(text: &str) -> bool {
    text.chars().any(|c| c.is_uppercase() || c.is_lowercase())
        && !text.chars().any(char::is_lowercase)
}

pub fn is_chapter_header(text: &str) -> bool {
    CHAPTER_HEADER.is_match(text.trim())
}

pub fn is_vocabulary_header(text: &str) -> bool {
    let lower = text.to_lowercase();
    VOCABULARY_KEYWORDS.iter().any(|k| lower.contains(k))
}

pub fn is_quiz_trigger(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("quiz") || lower.contains("question") || contains_quiz_elements(text)
}

/// 文本是否包含题目元素（编号题干、选项、答案标记等）
pub fn contains_quiz_elements(text: &str) -> bool {
    let text = text.trim();
    NUMBERED_LINE.is_match(text)
        || OPTION_LINE.is_match(text)
        || has_checkmark(text)
        || text.to_lowercase().contains("[resposta:")
        || (text.contains("Q:") && text.contains('?'))
        || (text.contains("A)") && text.contains("B)"))
}

pub fn has_checkmark(text: &str) -> bool {
    text.contains(CHECKMARKS)
}

/// 去掉所有答案标记字符
pub fn strip_checkmarks(text: &str) -> String {
    text.replace(CHECKMARKS, "")
}
