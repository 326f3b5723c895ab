//! 语料数据结构
//!
//! Corpus → Story → Chapter → (QuizQuestion, VocabEntry)
//!
//! 故事编号与章节号在内存中是数字，序列化为 JSON 时会变成字符串键，
//! 反序列化时再解析回数字，因此往返不会丢失信息。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 单选题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// 题干，以 "?" 结尾
    pub question: String,
    /// 选项（2~4 个）
    pub options: Vec<String>,
    /// 正确选项下标（从 0 开始）
    pub correct: usize,
}

impl QuizQuestion {
    /// 选项数量下限
    pub const MIN_OPTIONS: usize = 2;
    /// 选项数量上限
    pub const MAX_OPTIONS: usize = 4;

    /// 构造并校验一道题，不满足约束时返回 None
    pub fn new(question: impl Into<String>, options: Vec<String>, correct: usize) -> Option<Self> {
        let quiz = Self {
            question: question.into(),
            options,
            correct,
        };
        quiz.is_valid().then_some(quiz)
    }

    /// 检查选项数量和正确下标是否合法
    pub fn is_valid(&self) -> bool {
        (Self::MIN_OPTIONS..=Self::MAX_OPTIONS).contains(&self.options.len())
            && self.correct < self.options.len()
    }

    /// 正确选项文本
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct).map(String::as_str)
    }
}

/// 词汇条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabEntry {
    /// 单词（首字母大写）
    pub word: String,
    /// 译文
    pub translation: String,
    /// 例句
    pub context: String,
}

/// 章节
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub title: String,
    /// 正文，每个段落后跟一个换行
    pub content: String,
    pub quiz: Vec<QuizQuestion>,
    /// 文档中显式给出的词汇；为空时查询阶段才会自动挖掘
    pub vocabulary: Vec<VocabEntry>,
}

impl Chapter {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// 故事
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    pub id: u32,
    pub title: String,
    /// 出现过的最大章节号
    pub total_chapters: u32,
    pub chapters: BTreeMap<u32, Chapter>,
}

impl Story {
    pub fn new(id: u32, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            total_chapters: 0,
            chapters: BTreeMap::new(),
        }
    }
}

/// 故事列表项（对外接口）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorySummary {
    pub id: u32,
    pub title: String,
    pub chapters: u32,
}

/// 完整语料：故事编号 → 故事
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Corpus {
    pub stories: BTreeMap<u32, Story>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    /// 下一个故事编号（按检测顺序从 1 开始递增）
    pub fn next_story_id(&self) -> u32 {
        self.stories.len() as u32 + 1
    }

    pub fn story_list(&self) -> Vec<StorySummary> {
        self.stories
            .iter()
            .map(|(id, story)| StorySummary {
                id: *id,
                title: story.title.clone(),
                chapters: story.total_chapters,
            })
            .collect()
    }

    pub fn chapter(&self, story_id: u32, chapter_num: u32) -> Option<&Chapter> {
        self.stories.get(&story_id)?.chapters.get(&chapter_num)
    }

    /// 题目总数
    pub fn quiz_count(&self) -> usize {
        self.stories
            .values()
            .flat_map(|s| s.chapters.values())
            .map(|c| c.quiz.len())
            .sum()
    }

    /// 校验结构约束，返回第一个违反项的描述
    pub fn validate(&self) -> Result<(), String> {
        for (id, story) in &self.stories {
            if story.id != *id {
                return Err(format!("故事键 {} 与 id 字段 {} 不一致", id, story.id));
            }
            for (number, chapter) in &story.chapters {
                if let Some(bad) = chapter.quiz.iter().position(|q| !q.is_valid()) {
                    return Err(format!(
                        "故事 {} 第 {} 章的第 {} 道题不合法",
                        id,
                        number,
                        bad + 1
                    ));
                }
            }
        }
        Ok(())
    }
}
