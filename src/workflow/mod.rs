pub mod assembly_ctx;
pub mod chapter_assembler;

pub use assembly_ctx::{AssemblyCtx, Section};
pub use chapter_assembler::{AssemblyStats, ChapterAssembler};
