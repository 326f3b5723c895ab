/// 日志工具模块
///
/// 提供日志初始化以及格式化输出的辅助函数
use crate::models::{Corpus, StorySummary};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化全局日志订阅器
///
/// 优先使用 `RUST_LOG`，否则 verbose 时为 debug，默认 info。
/// 重复调用是安全的（测试中常见）。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(source: &str, snapshot: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 民间故事语料转换");
    info!("📄 源文档: {}", source);
    info!("💾 快照文件: {}", snapshot);
    info!("{}", "=".repeat(60));
}

/// 打印语料概览
pub fn log_corpus_summary(corpus: &Corpus, summaries: &[StorySummary]) {
    info!("\n{}", "=".repeat(60));
    info!("📚 语料概览: 共 {} 个故事, {} 道题目", summaries.len(), corpus.quiz_count());
    info!("{}", "=".repeat(60));
    for summary in summaries {
        info!("📖 [{}] {} ({} 章)", summary.id, summary.title, summary.chapters);
        if let Some(story) = corpus.stories.get(&summary.id) {
            for (number, chapter) in &story.chapters {
                info!(
                    "   {}. {} | 题目 {} | 词汇 {}",
                    number,
                    truncate_text(&chapter.title, 40),
                    chapter.quiz.len(),
                    chapter.vocabulary.len()
                );
            }
        }
    }
    info!("{}", "=".repeat(60));
}

/// 打印强制重建结果
pub fn log_rebuild_report(old_count: usize, new_count: usize) {
    info!("\n{}", "─".repeat(60));
    info!("🔄 重新转换完成: {} → {} 个故事", old_count, new_count);
    if old_count != new_count {
        info!("💡 故事数量发生变化");
    }
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（按字符计）
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_counts_chars() {
        assert_eq!(truncate_text("Boitatá", 10), "Boitatá");
        assert_eq!(truncate_text("Capítulo um", 8), "Capítulo...");
    }
}
