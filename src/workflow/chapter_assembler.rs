//! 章节组装流程 - 流程层
//!
//! 核心职责：把段落流组装成完整语料
//!
//! 流程：
//! 1. 跳过空段落
//! 2. classify 得到段落标签
//! 3. 按标签更新游标（故事 / 章节 / 小节）
//! 4. 正文 → 累加到章节内容；词汇 → VocabExtractor；题目 → QuizExtractor

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

use crate::models::{Chapter, Corpus, Paragraph, Story};
use crate::services::classifier::{classify, contains_quiz_elements, ParagraphKind};
use crate::services::{QuizExtractor, VocabExtractor};
use crate::utils::truncate_text;
use crate::workflow::assembly_ctx::{AssemblyCtx, Section};

static FIRST_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("数字正则无效"));

/// 组装统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AssemblyStats {
    /// 非空段落数
    pub paragraphs: usize,
    /// 因没有打开的故事/章节而丢弃的段落数
    pub dropped: usize,
    /// 产出的题目数
    pub quiz_emitted: usize,
    /// 产出的显式词汇数
    pub vocab_emitted: usize,
}

/// 章节组装器
///
/// - 持有正在构建的语料和游标
/// - 题目的待定状态只在一次组装中存在，故事/章节边界清空
/// - 不做任何 I/O
#[derive(Debug, Default)]
pub struct ChapterAssembler {
    corpus: Corpus,
    ctx: AssemblyCtx,
    quiz: QuizExtractor,
    stats: AssemblyStats,
}

impl ChapterAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// 一次性组装整个段落流
    pub fn assemble(paragraphs: &[Paragraph]) -> Corpus {
        let mut assembler = Self::new();
        for paragraph in paragraphs {
            assembler.feed(paragraph);
        }
        let (corpus, stats) = assembler.finish();

        info!(
            "✓ 组装完成: {} 个故事 | 段落 {} (丢弃 {}) | 题目 {} | 显式词汇 {}",
            corpus.len(),
            stats.paragraphs,
            stats.dropped,
            stats.quiz_emitted,
            stats.vocab_emitted
        );
        corpus
    }

    pub fn ctx(&self) -> &AssemblyCtx {
        &self.ctx
    }

    pub fn stats(&self) -> AssemblyStats {
        self.stats
    }

    /// 处理一个段落
    pub fn feed(&mut self, paragraph: &Paragraph) {
        let text = paragraph.text.trim();
        if text.is_empty() {
            return;
        }
        self.stats.paragraphs += 1;

        match classify(paragraph) {
            ParagraphKind::StoryTitle => self.open_story(text),
            ParagraphKind::ChapterHeader => self.open_chapter(text),
            ParagraphKind::VocabularyHeader => {
                if self.ctx.position().is_some() {
                    self.ctx.section = Some(Section::Vocabulary);
                } else {
                    self.drop_line(text);
                }
            }
            ParagraphKind::QuizTrigger => {
                if self.ctx.position().is_some() {
                    self.ctx.section = Some(Section::Quiz);
                    if contains_quiz_elements(text) {
                        self.push_quiz_line(text);
                    }
                } else {
                    self.drop_line(text);
                }
            }
            ParagraphKind::Body => self.push_body(text),
        }
    }

    /// 结束组装，交出语料和统计
    pub fn finish(mut self) -> (Corpus, AssemblyStats) {
        self.quiz.reset();
        (self.corpus, self.stats)
    }

    fn open_story(&mut self, title: &str) {
        let id = self.corpus.next_story_id();
        self.corpus.stories.insert(id, Story::new(id, title));
        self.ctx.open_story(id);
        self.quiz.reset();
        info!("📖 发现故事 #{}: {}", id, truncate_text(title, 40));
    }

    fn open_chapter(&mut self, title: &str) {
        let Some(story_id) = self.ctx.story_id else {
            self.drop_line(title);
            return;
        };
        // 没有数字时记为第 1 章；数字超出 u32 的标题视为损坏，整章丢弃
        let number = match FIRST_NUMBER.find(title) {
            None => 1,
            Some(digits) => match digits.as_str().parse::<u32>() {
                Ok(number) => number,
                Err(e) => {
                    debug!("章节号无法解析 ({}): {}", digits.as_str(), e);
                    self.ctx.close_chapter();
                    self.quiz.reset();
                    self.drop_line(title);
                    return;
                }
            },
        };

        let Some(story) = self.corpus.stories.get_mut(&story_id) else {
            return;
        };

        if story.chapters.insert(number, Chapter::new(title)).is_some() {
            debug!("故事 #{} 的第 {} 章重复出现，已覆盖", story_id, number);
        }
        story.total_chapters = story.total_chapters.max(number);

        self.ctx.open_chapter(number);
        self.quiz.reset();
        debug!("{} 进入章节: {}", self.ctx, truncate_text(title, 40));
    }

    fn push_body(&mut self, text: &str) {
        match self.ctx.section {
            Some(Section::Content) => {
                if let Some(chapter) = self.current_chapter() {
                    chapter.content.push_str(text);
                    chapter.content.push('\n');
                }
            }
            Some(Section::Vocabulary) => {
                if let Some(entry) = VocabExtractor::parse_entry(text) {
                    if let Some(chapter) = self.current_chapter() {
                        chapter.vocabulary.push(entry);
                        self.stats.vocab_emitted += 1;
                    }
                }
            }
            Some(Section::Quiz) => self.push_quiz_line(text),
            None => self.drop_line(text),
        }
    }

    fn push_quiz_line(&mut self, text: &str) {
        let Some(quiz) = self.quiz.extract(text) else {
            return;
        };
        debug!(
            "{} 题目: {} → {}",
            self.ctx,
            truncate_text(&quiz.question, 40),
            quiz.correct_option().unwrap_or_default()
        );
        if let Some(chapter) = self.current_chapter() {
            chapter.quiz.push(quiz);
            self.stats.quiz_emitted += 1;
        }
    }

    fn current_chapter(&mut self) -> Option<&mut Chapter> {
        let (story_id, number) = self.ctx.position()?;
        self.corpus
            .stories
            .get_mut(&story_id)?
            .chapters
            .get_mut(&number)
    }

    fn drop_line(&mut self, text: &str) {
        self.stats.dropped += 1;
        debug!("{} 丢弃段落: {}", self.ctx, truncate_text(text, 40));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::CONTEXT_PLACEHOLDER;

    fn body(text: &str) -> Paragraph {
        Paragraph::new(text)
    }

    #[test]
    fn test_assemble_story_with_chapters() {
        let paragraphs = vec![
            body("Preface text before any story."),
            Paragraph::bold("The Legend of Curupira"),
            body("Text before any chapter."),
            body("Chapter 1: The Guardian"),
            body("Deep in the forest lived a creature."),
            body(""),
            body("His feet pointed backward."),
            body("Chapter 3 - The Loggers"),
            body("The loggers came with chainsaws."),
        ];

        let corpus = ChapterAssembler::assemble(&paragraphs);
        assert_eq!(corpus.len(), 1);

        let story = &corpus.stories[&1];
        assert_eq!(story.title, "The Legend of Curupira");
        assert_eq!(story.total_chapters, 3);
        assert_eq!(story.chapters.len(), 2);
        assert_eq!(
            story.chapters[&1].content,
            "Deep in the forest lived a creature.\nHis feet pointed backward.\n"
        );
        assert_eq!(story.chapters[&3].title, "Chapter 3 - The Loggers");
    }

    #[test]
    fn test_lines_before_story_are_dropped() {
        let mut assembler = ChapterAssembler::new();
        assembler.feed(&body("Chapter 1"));
        assembler.feed(&body("Vocabulary"));
        assembler.feed(&body("Quiz"));
        assembler.feed(&body("Just text"));

        let (corpus, stats) = assembler.finish();
        assert!(corpus.is_empty());
        assert_eq!(stats.paragraphs, 4);
        assert_eq!(stats.dropped, 4);
    }

    #[test]
    fn test_story_ids_are_sequential() {
        let corpus = ChapterAssembler::assemble(&[
            Paragraph::bold("First Tale"),
            body("THE SECOND TALE"),
            Paragraph::bold("Third Tale"),
        ]);
        let titles: Vec<_> = corpus.stories.iter().map(|(id, s)| (*id, s.title.as_str())).collect();
        assert_eq!(
            titles,
            vec![(1, "First Tale"), (2, "THE SECOND TALE"), (3, "Third Tale")]
        );
    }

    #[test]
    fn test_vocabulary_and_quiz_sections() {
        let corpus = ChapterAssembler::assemble(&[
            Paragraph::bold("O Boitatá"),
            body("Capítulo 2"),
            body("A snake of fire guards the fields."),
            body("Vocabulary"),
            body("- Snake = cobra"),
            body("not an entry"),
            body("Quiz"),
            body("1. What is Boitatá?\na) A dog\nb) A snake made of fire ✓\nc) A bird"),
            body("Q: How many legs does the Saci have? A) Two B) One C) Three [resposta: B]"),
        ]);

        let chapter = corpus.chapter(1, 2).unwrap();
        assert_eq!(chapter.content, "A snake of fire guards the fields.\n");
        assert_eq!(chapter.vocabulary.len(), 1);
        assert_eq!(chapter.vocabulary[0].word, "Snake");
        assert_eq!(chapter.vocabulary[0].context, CONTEXT_PLACEHOLDER);

        assert_eq!(chapter.quiz.len(), 2);
        assert_eq!(chapter.quiz[0].question, "What is Boitatá?");
        assert_eq!(chapter.quiz[0].correct, 1);
        assert_eq!(chapter.quiz[1].options, vec!["Two", "One", "Three"]);
        assert_eq!(chapter.quiz[1].correct, 1);
    }

    #[test]
    fn test_total_chapters_tracks_highest_number() {
        let mut assembler = ChapterAssembler::new();
        assembler.feed(&Paragraph::bold("Tale"));
        assembler.feed(&body("Chapter 7"));
        assert_eq!(assembler.ctx().position(), Some((1, 7)));

        let (corpus, _) = assembler.finish();
        assert_eq!(corpus.stories[&1].total_chapters, 7);
    }

    #[test]
    fn test_oversized_chapter_number_is_dropped() {
        let mut assembler = ChapterAssembler::new();
        for paragraph in [
            Paragraph::bold("Tale"),
            body("Chapter 1"),
            body("First chapter body."),
            body("Chapter 99999999999"),
            body("Huge chapter body."),
        ] {
            assembler.feed(&paragraph);
        }
        assert_eq!(assembler.ctx().position(), None);

        let (corpus, stats) = assembler.finish();
        let story = &corpus.stories[&1];
        assert_eq!(story.chapters.keys().copied().collect::<Vec<_>>(), vec![1]);
        assert_eq!(story.chapters[&1].content, "First chapter body.\n");
        assert_eq!(story.total_chapters, 1);
        // 损坏的标题和它后面的正文
        assert_eq!(stats.dropped, 2);
    }

    #[test]
    fn test_carryover_quiz_across_paragraphs() {
        let corpus = ChapterAssembler::assemble(&[
            Paragraph::bold("O Boto"),
            body("Chapter 1"),
            body("Questions"),
            body("Who is the Boto?"),
            body("A) A fish"),
            body("B) A dolphin ✓"),
        ]);

        let quiz = &corpus.chapter(1, 1).unwrap().quiz;
        assert_eq!(quiz.len(), 1);
        assert_eq!(quiz[0].question, "Who is the Boto?");
        assert_eq!(quiz[0].options, vec!["A fish", "A dolphin"]);
        assert_eq!(quiz[0].correct, 1);
    }

    #[test]
    fn test_pending_quiz_does_not_leak_across_chapters() {
        let corpus = ChapterAssembler::assemble(&[
            Paragraph::bold("O Boto"),
            body("Chapter 1"),
            body("Quiz"),
            body("Who came to the festival?"),
            body("A) The Boto"),
            body("Chapter 2"),
            body("Quiz"),
            body("B) Nobody ✓"),
        ]);

        let story = &corpus.stories[&1];
        assert!(story.chapters[&1].quiz.is_empty());
        assert!(story.chapters[&2].quiz.is_empty());
    }

    #[test]
    fn test_every_emitted_quiz_is_valid() {
        let corpus = ChapterAssembler::assemble(&[
            Paragraph::bold("Tale"),
            body("Chapter 1"),
            body("Quiz"),
            body("Q: One? A) Yes"),
            body("Q: Two? A) Yes B) No [resposta: D]"),
            body("Q: Three? A) Yes B) No C) Maybe D) Never [resposta: d]"),
            body("1. Four?\na) X ✓\nb) Y ✓"),
        ]);

        let quiz = &corpus.chapter(1, 1).unwrap().quiz;
        assert_eq!(quiz.len(), 1);
        assert!(quiz.iter().all(|q| q.is_valid()));
        assert_eq!(quiz[0].correct, 3);
    }
}
