pub mod corpus;
pub mod fallback;
pub mod lexicon;
pub mod loaders;
pub mod paragraph;
pub mod snapshot;

pub use corpus::{Chapter, Corpus, QuizQuestion, Story, StorySummary, VocabEntry};
pub use fallback::builtin_corpus;
pub use lexicon::Lexicon;
pub use loaders::{load_paragraphs, reader_for, DocumentReader, PlainTextReader, TomlDocumentReader};
pub use paragraph::Paragraph;
pub use snapshot::{ConversionInfo, Snapshot};
