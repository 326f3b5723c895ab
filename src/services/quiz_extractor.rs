//! 题目抽取服务 - 业务能力层
//!
//! 把三种历史写法统一成 [`QuizQuestion`]：
//!
//! 1. 编号块（同一段落多行）：
//!    `1. What is Boitatá?\na) A dog\nb) A snake made of fire ✓`
//! 2. 单行旧格式：
//!    `Q: How many legs? A) Two B) One C) Three [resposta: B]`
//! 3. 跨段落：题干单独一段，后续每段一个 `A)`~`D)` 选项
//!
//! 第 3 种写法需要跨行的待定状态 [`PendingQuiz`]，
//! 由抽取器实例持有，在故事/章节边界调用 [`QuizExtractor::reset`] 清空。

use crate::models::QuizQuestion;
use crate::services::classifier::{has_checkmark, strip_checkmarks};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

const OPTION_MARKERS: [&str; 4] = ["A)", "B)", "C)", "D)"];

static NUMBERED_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.").expect("编号正则无效"));

static NUMBERED_QUESTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\s*(.+?)(?:\?|$)").expect("编号题干正则无效"));

static LOWER_OPTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-d]\)").expect("小写选项正则无效"));

static UPPER_OPTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-D]\)").expect("大写选项正则无效"));

static INLINE_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-D]\)").expect("行内选项正则无效"));

static ANSWER_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)resposta:\s*([A-D])").expect("答案标记正则无效"));

/// 跨段落的待定题目
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingQuiz {
    /// 等待选项的题干
    pub question: Option<String>,
    /// 已收集的选项
    pub options: Vec<String>,
    /// 正确选项下标
    pub correct: Option<usize>,
}

impl PendingQuiz {
    pub fn is_empty(&self) -> bool {
        self.question.is_none() && self.options.is_empty() && self.correct.is_none()
    }
}

/// 题目抽取器
///
/// 职责：
/// - 每次只处理一行（一个段落）
/// - 只关心题目格式，不知道当前是哪个故事/章节
#[derive(Debug, Default)]
pub struct QuizExtractor {
    pending: PendingQuiz,
}

impl QuizExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前的待定状态
    pub fn pending(&self) -> &PendingQuiz {
        &self.pending
    }

    /// 清空待定状态（章节边界调用），未完成的题目直接丢弃
    pub fn reset(&mut self) {
        if let Some(question) = &self.pending.question {
            debug!(
                "丢弃未完成的跨段落题目: {} (已有 {} 个选项)",
                question,
                self.pending.options.len()
            );
        }
        self.pending = PendingQuiz::default();
    }

    /// 处理一行文本，凑齐一道完整题目时返回
    pub fn extract(&mut self, line: &str) -> Option<QuizQuestion> {
        let text = line.trim();
        if text.is_empty() {
            return None;
        }

        // 格式 1: 编号块
        if NUMBERED_PREFIX.is_match(text) {
            if let Some(quiz) = parse_numbered_block(text) {
                return Some(quiz);
            }
            debug!("编号题目块不完整，尝试其他格式: {}", first_line(text));
        }

        // 格式 2: 单行旧格式
        if is_inline_format(text) {
            if let Some(quiz) = parse_inline(text) {
                return Some(quiz);
            }
        }

        // 格式 3: 跨段落
        if text.contains('?') && !has_option_marker(text) {
            if let Some(previous) = &self.pending.question {
                debug!("待定题目被新题干替换: {}", previous);
            }
            self.pending = PendingQuiz {
                question: Some(ensure_question_mark(text)),
                ..Default::default()
            };
            return None;
        }

        if self.pending.question.is_some() && (UPPER_OPTION.is_match(text) || has_checkmark(text)) {
            return self.accept_pending_option(text);
        }

        debug!("无法识别的题目行，已丢弃: {}", text);
        None
    }

    fn accept_pending_option(&mut self, text: &str) -> Option<QuizQuestion> {
        let option = clean_option(UPPER_OPTION.replace(text, "").as_ref());
        if option.is_empty() {
            return None;
        }
        if self.pending.options.len() >= QuizQuestion::MAX_OPTIONS {
            debug!("选项已满，忽略: {}", option);
            return None;
        }

        self.pending.options.push(option);
        if has_checkmark(text) {
            self.pending.correct = Some(self.pending.options.len() - 1);
        }

        let correct = self.pending.correct?;
        if self.pending.options.len() < QuizQuestion::MIN_OPTIONS {
            return None;
        }

        let pending = std::mem::take(&mut self.pending);
        QuizQuestion::new(pending.question.unwrap_or_default(), pending.options, correct)
    }
}

/// 格式 1：第一行是题干，后续 `a)`~`d)` 行是选项，恰好一个带勾
fn parse_numbered_block(text: &str) -> Option<QuizQuestion> {
    let mut lines = text.lines();
    let question_line = lines.next()?.trim();
    let caps = NUMBERED_QUESTION.captures(question_line)?;
    let question = ensure_question_mark(caps.get(1)?.as_str().trim());

    let mut options = Vec::new();
    let mut marked = Vec::new();
    for line in lines.map(str::trim).filter(|l| !l.is_empty()) {
        if !LOWER_OPTION.is_match(line) {
            continue;
        }
        let option = clean_option(&line[2..]);
        if option.is_empty() {
            continue;
        }
        if has_checkmark(line) {
            marked.push(options.len());
        }
        options.push(option);
    }

    if options.len() < QuizQuestion::MIN_OPTIONS || marked.len() != 1 {
        return None;
    }
    QuizQuestion::new(question, options, marked[0])
}

fn is_inline_format(text: &str) -> bool {
    text.contains("Q:") || (text.contains('?') && has_option_marker(text))
}

/// 格式 2：`Q: 题干? A) .. B) .. [resposta: X]`
///
/// 没有答案标记时默认第一个选项正确。
fn parse_inline(text: &str) -> Option<QuizQuestion> {
    let (head, rest) = text.split_once('?')?;
    let head = match head.split_once("Q:") {
        Some((_, after)) => after,
        None => head,
    };
    let question = format!("{}?", head.trim());

    let markers: Vec<_> = INLINE_MARKER.find_iter(rest).collect();
    let options: Vec<String> = markers
        .iter()
        .enumerate()
        .filter_map(|(i, m)| {
            let end = markers.get(i + 1).map_or(rest.len(), |next| next.start());
            let segment = &rest[m.end()..end];
            let segment = segment.split('[').next().unwrap_or_default().trim();
            (!segment.is_empty()).then(|| segment.to_string())
        })
        .take(QuizQuestion::MAX_OPTIONS)
        .collect();

    let correct = match ANSWER_MARKER.captures(text) {
        Some(caps) => letter_index(caps.get(1)?.as_str()),
        None => {
            debug!("单行题目没有答案标记，默认第一个选项: {}", question);
            0
        }
    };

    if options.len() < QuizQuestion::MIN_OPTIONS {
        return None;
    }
    let quiz = QuizQuestion::new(question, options, correct);
    if quiz.is_none() {
        debug!("答案标记超出选项范围，已丢弃: {}", text);
    }
    quiz
}

/// A→0 … D→3
fn letter_index(letter: &str) -> usize {
    match letter.to_ascii_uppercase().as_str() {
        "B" => 1,
        "C" => 2,
        "D" => 3,
        _ => 0,
    }
}

fn has_option_marker(text: &str) -> bool {
    OPTION_MARKERS.iter().any(|m| text.contains(m))
}

fn clean_option(text: &str) -> String {
    strip_checkmarks(text).trim().to_string()
}

fn ensure_question_mark(text: &str) -> String {
    if text.ends_with('?') {
        text.to_string()
    } else {
        format!("{}?", text)
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}
