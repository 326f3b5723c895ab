//! 业务能力层（Services Layer）
//!
//! 无状态或仅持有局部状态的纯逻辑：段落分类、题目抽取、词汇抽取。
//! 不做文件 I/O，不持有语料库。

pub mod classifier;
pub mod quiz_extractor;
pub mod vocab_extractor;

pub use classifier::{classify, ParagraphKind};
pub use quiz_extractor::{PendingQuiz, QuizExtractor};
pub use vocab_extractor::{VocabExtractor, CONTEXT_PLACEHOLDER};
