use anyhow::Result;
use folktale_corpus::utils::logging;
use folktale_corpus::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置（无法解析的环境变量直接报错）
    let config = Config::try_from_env()?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    App::initialize(config).await?.run().await?;

    Ok(())
}
