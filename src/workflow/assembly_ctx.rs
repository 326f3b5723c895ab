//! 组装游标
//!
//! 封装"我正在处理哪个故事的哪一章的哪个小节"这一信息

use std::fmt::Display;

/// 章节内的小节
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// 正文
    Content,
    /// 词汇
    Vocabulary,
    /// 题目
    Quiz,
}

/// 组装上下文
#[derive(Debug, Clone, Default)]
pub struct AssemblyCtx {
    /// 当前故事ID
    pub story_id: Option<u32>,

    /// 当前章节号
    pub chapter: Option<u32>,

    /// 当前小节
    pub section: Option<Section>,
}

impl AssemblyCtx {
    pub fn new() -> Self {
        Self::default()
    }

    /// 进入新故事，清空章节和小节
    pub fn open_story(&mut self, story_id: u32) {
        self.story_id = Some(story_id);
        self.chapter = None;
        self.section = None;
    }

    /// 进入新章节，小节回到正文
    pub fn open_chapter(&mut self, chapter: u32) {
        self.chapter = Some(chapter);
        self.section = Some(Section::Content);
    }

    /// 关闭当前章节，后续段落在下一个章节标题前都会被丢弃
    pub fn close_chapter(&mut self) {
        self.chapter = None;
        self.section = None;
    }

    /// 故事和章节都已打开时返回 (故事ID, 章节号)
    pub fn position(&self) -> Option<(u32, u32)> {
        Some((self.story_id?, self.chapter?))
    }
}

impl Display for AssemblyCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.story_id, self.chapter) {
            (Some(story), Some(chapter)) => write!(f, "[故事#{} 章节#{}]", story, chapter),
            (Some(story), None) => write!(f, "[故事#{}]", story),
            _ => write!(f, "[未开始]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_requires_story_and_chapter() {
        let mut ctx = AssemblyCtx::new();
        assert_eq!(ctx.position(), None);

        ctx.open_story(1);
        assert_eq!(ctx.position(), None);
        assert_eq!(ctx.to_string(), "[故事#1]");

        ctx.open_chapter(0);
        assert_eq!(ctx.position(), Some((1, 0)));
        assert_eq!(ctx.section, Some(Section::Content));

        ctx.open_story(2);
        assert_eq!(ctx.position(), None);
        assert_eq!(ctx.section, None);
    }

    #[test]
    fn test_close_chapter_keeps_story() {
        let mut ctx = AssemblyCtx::new();
        ctx.open_story(1);
        ctx.open_chapter(3);
        ctx.close_chapter();
        assert_eq!(ctx.position(), None);
        assert_eq!(ctx.section, None);
        assert_eq!(ctx.story_id, Some(1));
    }
}
