//! 词汇抽取服务 - 业务能力层
//!
//! 两条路径：
//! - 显式词条：词汇小节中的 `word = tradução` 行，转换时解析
//! - 自动挖掘：章节没有任何显式词条时，查询阶段按词表从正文中挖掘
//!
//! 同一章节的词汇要么全是显式的，要么全是挖掘的，不会混合。

use crate::models::{Chapter, Lexicon, VocabEntry};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// 显式词条在转换阶段的占位例句，查询时替换为正文中的真实句子
pub const CONTEXT_PLACEHOLDER: &str = "Used in the context of this chapter.";

const SEPARATORS: [&str; 6] = [" = ", ": ", " - ", " – ", " → ", " -> "];

static BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-•*]\s*").expect("列表符号正则无效"));

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").expect("非单词字符正则无效"));

static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[A-Za-z]{3,}\b").expect("分词正则无效"));

/// 词汇抽取服务
pub struct VocabExtractor {
    lexicon: Arc<Lexicon>,
}

impl VocabExtractor {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    /// 解析一行显式词条，格式不符时返回 None
    ///
    /// 支持 `- word = tradução`、`word: tradução`、`word - tradução`、
    /// `word – tradução`、`word → tradução`、`word -> tradução`。
    /// 只按第一个出现的分隔符切分，切分后校验失败不会再尝试其他分隔符。
    pub fn parse_entry(line: &str) -> Option<VocabEntry> {
        let text = BULLET.replace(line.trim(), "");
        let separator = *SEPARATORS.iter().find(|sep| text.contains(**sep))?;
        let (word, translation) = text.split_once(separator)?;

        let word = NON_WORD.replace_all(word, "").trim().to_string();
        let translation = NON_WORD.replace_all(translation, "").trim().to_string();

        if word.is_empty() || translation.is_empty() || word.chars().count() <= 1 {
            debug!("词条校验失败，已丢弃: {}", line.trim());
            return None;
        }

        Some(VocabEntry {
            word: capitalize(&word),
            translation: translation.to_lowercase(),
            context: CONTEXT_PLACEHOLDER.to_string(),
        })
    }

    /// 查询章节词汇
    ///
    /// 有显式词条时返回它们（占位例句替换为正文句子），否则自动挖掘。
    /// 不修改章节本身。
    pub fn vocabulary_for(&self, chapter: &Chapter) -> Vec<VocabEntry> {
        if chapter.vocabulary.is_empty() {
            return self.mine(&chapter.content);
        }

        chapter
            .vocabulary
            .iter()
            .map(|entry| {
                let mut entry = entry.clone();
                if entry.context.is_empty() || entry.context == CONTEXT_PLACEHOLDER {
                    entry.context = word_context(&chapter.content, &entry.word);
                }
                entry
            })
            .collect()
    }

    /// 按词表从正文中挖掘词汇
    ///
    /// 小写后按 3 个字母以上的连续字母切词，跳过停用词和重复词，
    /// 只保留词表中有译文的词，最多 `max_entries` 个。
    pub fn mine(&self, content: &str) -> Vec<VocabEntry> {
        let lower = content.to_lowercase();
        let max_entries = self.lexicon.max_entries();
        let mut seen = HashSet::new();
        let mut vocabulary = Vec::new();

        for token in TOKEN.find_iter(&lower).map(|m| m.as_str()) {
            if vocabulary.len() >= max_entries {
                break;
            }
            if self.lexicon.is_stop_word(token) || seen.contains(token) {
                continue;
            }
            let Some(translation) = self.lexicon.translate(token) else {
                continue;
            };

            seen.insert(token);
            vocabulary.push(VocabEntry {
                word: capitalize(token),
                translation: translation.to_string(),
                context: word_context(content, token),
            });
        }

        debug!("自动挖掘到 {} 个词汇", vocabulary.len());
        vocabulary
    }
}

/// 找出正文中第一个包含该词的句子（按 "." 切分）
pub fn word_context(text: &str, word: &str) -> String {
    let needle = word.to_lowercase();
    text.split('.')
        .find(|sentence| sentence.to_lowercase().contains(&needle))
        .map(|sentence| format!("{}.", sentence.trim()))
        .unwrap_or_else(|| format!("Used in the story about {}.", word))
}

/// 首字母大写，其余小写
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> VocabExtractor {
        VocabExtractor::new(Arc::new(Lexicon::default()))
    }

    #[test]
    fn test_parse_entry_with_bullet() {
        let entry = VocabExtractor::parse_entry("- Forest = floresta").unwrap();
        assert_eq!(entry.word, "Forest");
        assert_eq!(entry.translation, "floresta");
        assert_eq!(entry.context, CONTEXT_PLACEHOLDER);
    }

    #[test]
    fn test_parse_entry_separators() {
        let cases = [
            ("hunters: Caçadores", "Hunters", "caçadores"),
            ("• backward - para trás", "Backward", "para trás"),
            ("* MIST – névoa", "Mist", "névoa"),
            ("dawn → amanhecer!", "Dawn", "amanhecer"),
            ("glow -> brilho", "Glow", "brilho"),
        ];
        for (line, word, translation) in cases {
            let entry = VocabExtractor::parse_entry(line).unwrap();
            assert_eq!(entry.word, word, "{}", line);
            assert_eq!(entry.translation, translation, "{}", line);
        }
    }

    #[test]
    fn test_parse_entry_rejects_invalid() {
        assert!(VocabExtractor::parse_entry("no separator here").is_none());
        assert!(VocabExtractor::parse_entry("a = um").is_none());
        assert!(VocabExtractor::parse_entry("word = ...").is_none());
        assert!(VocabExtractor::parse_entry("!! = nada").is_none());
    }

    #[test]
    fn test_parse_entry_splits_on_first_separator_only() {
        // " = " 优先于 ": "
        let entry = VocabExtractor::parse_entry("note: x = anotação").unwrap();
        assert_eq!(entry.word, "Note x");
        assert_eq!(entry.translation, "anotação");
    }

    #[test]
    fn test_mine_dedup_and_stop_words() {
        let content = "The forest was dark. The forest was old. Hunters walked with the guide.";
        let vocabulary = extractor().mine(content);

        let words: Vec<_> = vocabulary.iter().map(|v| v.word.as_str()).collect();
        assert_eq!(words, vec!["Forest", "Hunters", "Guide"]);
        assert_eq!(vocabulary[0].translation, "floresta");
        assert_eq!(vocabulary[0].context, "The forest was dark.");
        assert_eq!(vocabulary[1].context, "Hunters walked with the guide.");
    }

    #[test]
    fn test_mine_respects_cap() {
        let lexicon = Lexicon::default().with_max_entries(2);
        let extractor = VocabExtractor::new(Arc::new(lexicon));
        let vocabulary = extractor.mine("forest creature mysterious legendary");
        assert_eq!(vocabulary.len(), 2);
    }

    #[test]
    fn test_mine_with_injected_lexicon() {
        let lexicon = Lexicon::new(
            [("rio".to_string(), "river".to_string())],
            ["the".to_string()],
            5,
        );
        let extractor = VocabExtractor::new(Arc::new(lexicon));
        let vocabulary = extractor.mine("O rio corre. The forest sleeps.");
        assert_eq!(vocabulary.len(), 1);
        assert_eq!(vocabulary[0].word, "Rio");
        assert_eq!(vocabulary[0].translation, "river");
    }

    #[test]
    fn test_explicit_vocabulary_suppresses_mining() {
        let mut chapter = Chapter::new("Chapter 1");
        chapter.content = "The forest hides the creature. Hunters get lost.".to_string();
        chapter.vocabulary.push(VocabExtractor::parse_entry("creature = criatura").unwrap());

        let vocabulary = extractor().vocabulary_for(&chapter);
        assert_eq!(vocabulary.len(), 1);
        assert_eq!(vocabulary[0].word, "Creature");
        assert_eq!(vocabulary[0].context, "The forest hides the creature.");
        // 章节本身保持不变
        assert_eq!(chapter.vocabulary[0].context, CONTEXT_PLACEHOLDER);
    }

    #[test]
    fn test_empty_vocabulary_triggers_mining() {
        let mut chapter = Chapter::new("Chapter 2");
        chapter.content = "The loggers entered the sacred forest.".to_string();
        let vocabulary = extractor().vocabulary_for(&chapter);
        assert!(!vocabulary.is_empty());
        assert_eq!(vocabulary[0].word, "Loggers");
    }

    #[test]
    fn test_word_context_fallback() {
        assert_eq!(word_context("Nothing here.", "curupira"), "Used in the story about curupira.");
    }
}
