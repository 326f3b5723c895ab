//! JSON 快照格式
//!
//! ```text
//! { version, conversion_info: {timestamp, source_file, stories_count, source_last_modified},
//!   stories: { "<id>": Story } }
//! ```

use crate::models::corpus::Corpus;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// 当前快照版本
pub const SNAPSHOT_VERSION: &str = "2.0";

/// 使用内置示例语料时写入的来源名
pub const EXAMPLE_SOURCE: &str = "example_data";

/// 转换元信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionInfo {
    /// 转换时间
    pub timestamp: DateTime<Local>,
    /// 源文档路径，示例语料为 "example_data"
    pub source_file: String,
    pub stories_count: usize,
    /// 源文档修改时间
    pub source_last_modified: Option<DateTime<Local>>,
}

/// 持久化快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default = "legacy_version")]
    pub version: String,
    #[serde(default)]
    pub conversion_info: Option<ConversionInfo>,
    pub stories: Corpus,
}

fn legacy_version() -> String {
    "1.0".to_string()
}

impl Snapshot {
    /// 为新转换出的语料生成快照
    pub fn new(
        stories: Corpus,
        source_file: impl Into<String>,
        source_last_modified: Option<DateTime<Local>>,
    ) -> Self {
        let conversion_info = ConversionInfo {
            timestamp: Local::now(),
            source_file: source_file.into(),
            stories_count: stories.len(),
            source_last_modified,
        };
        Self {
            version: SNAPSHOT_VERSION.to_string(),
            conversion_info: Some(conversion_info),
            stories,
        }
    }

    /// 序列化为带缩进的 JSON（非 ASCII 字符原样输出）
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// 从 JSON 文本解析快照
    ///
    /// 兼容没有外层结构、直接以故事表为顶层的旧格式。
    /// 任何缺键、非数字键、题目越界都视为损坏，绝不返回"静默的空语料"。
    pub fn from_json(text: &str) -> Result<Self, String> {
        let value: JsonValue =
            serde_json::from_str(text).map_err(|e| format!("JSON 解析失败: {}", e))?;
        let object = value
            .as_object()
            .ok_or_else(|| "顶层不是 JSON 对象".to_string())?;

        let snapshot = if object.contains_key("stories") {
            serde_json::from_str::<Snapshot>(text).map_err(|e| format!("快照结构错误: {}", e))?
        } else if !object.is_empty() && object.keys().all(|k| k.parse::<u32>().is_ok()) {
            let stories: Corpus =
                serde_json::from_str(text).map_err(|e| format!("旧格式故事表错误: {}", e))?;
            Snapshot {
                version: legacy_version(),
                conversion_info: None,
                stories,
            }
        } else {
            return Err("缺少 stories 字段".to_string());
        };

        snapshot.stories.validate()?;
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::corpus::{Chapter, QuizQuestion, Story};

    fn sample_corpus() -> Corpus {
        let mut chapter = Chapter::new("Chapter 1");
        chapter.content = "Deep in the forest.\n".to_string();
        chapter.quiz.push(
            QuizQuestion::new(
                "Where?",
                vec!["Forest".to_string(), "River".to_string()],
                0,
            )
            .unwrap(),
        );
        let mut story = Story::new(1, "Curupira");
        story.total_chapters = 1;
        story.chapters.insert(1, chapter);

        let mut corpus = Corpus::new();
        corpus.stories.insert(1, story);
        corpus
    }

    #[test]
    fn test_round_trip() {
        let snapshot = Snapshot::new(sample_corpus(), "assets/book.toml", None);
        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"version\": \"2.0\""));

        let back = Snapshot::from_json(&json).unwrap();
        assert_eq!(back.stories, snapshot.stories);
        assert_eq!(back.conversion_info.unwrap().stories_count, 1);
    }

    #[test]
    fn test_legacy_bare_story_map() {
        let json = serde_json::to_string(&sample_corpus()).unwrap();
        let snapshot = Snapshot::from_json(&json).unwrap();
        assert_eq!(snapshot.version, "1.0");
        assert!(snapshot.conversion_info.is_none());
        assert_eq!(snapshot.stories.len(), 1);
    }

    #[test]
    fn test_missing_stories_key_is_corrupt() {
        assert!(Snapshot::from_json(r#"{"version": "2.0"}"#).is_err());
        assert!(Snapshot::from_json("{}").is_err());
        assert!(Snapshot::from_json("[1, 2]").is_err());
        assert!(Snapshot::from_json("not json").is_err());
    }

    #[test]
    fn test_out_of_range_quiz_is_corrupt() {
        let json = r#"{"version": "2.0", "stories": {"1": {"id": 1, "title": "T", "total_chapters": 1,
            "chapters": {"1": {"title": "C", "content": "",
                "quiz": [{"question": "Q?", "options": ["a", "b"], "correct": 5}],
                "vocabulary": []}}}}}"#;
        let err = Snapshot::from_json(json).unwrap_err();
        assert!(err.contains("不合法"));
    }

    #[test]
    fn test_story_without_chapters_key_is_corrupt() {
        let json = r#"{"version": "2.0", "stories": {"1": {"id": 1, "title": "T", "total_chapters": 3}}}"#;
        let err = Snapshot::from_json(json).unwrap_err();
        assert!(err.contains("chapters"), "{}", err);
    }

    #[test]
    fn test_chapter_without_quiz_or_vocabulary_key_is_corrupt() {
        let no_quiz = r#"{"version": "2.0", "stories": {"1": {"id": 1, "title": "T", "total_chapters": 1,
            "chapters": {"1": {"title": "C", "content": "", "vocabulary": []}}}}}"#;
        let err = Snapshot::from_json(no_quiz).unwrap_err();
        assert!(err.contains("quiz"), "{}", err);

        let no_vocabulary = r#"{"version": "2.0", "stories": {"1": {"id": 1, "title": "T", "total_chapters": 1,
            "chapters": {"1": {"title": "C", "content": "", "quiz": []}}}}}"#;
        let err = Snapshot::from_json(no_vocabulary).unwrap_err();
        assert!(err.contains("vocabulary"), "{}", err);
    }

    #[test]
    fn test_legacy_map_with_missing_keys_is_corrupt() {
        let no_chapters = r#"{"1": {"id": 1, "title": "T", "total_chapters": 2}}"#;
        assert!(Snapshot::from_json(no_chapters).is_err());

        let no_quiz = r#"{"1": {"id": 1, "title": "T", "total_chapters": 1,
            "chapters": {"1": {"title": "C", "content": "", "vocabulary": []}}}}"#;
        assert!(Snapshot::from_json(no_quiz).is_err());
    }

    #[test]
    fn test_non_numeric_key_is_corrupt() {
        let json = r#"{"stories": {"abc": {"id": 1, "title": "T", "total_chapters": 0, "chapters": {}}}}"#;
        assert!(Snapshot::from_json(json).is_err());
    }
}
