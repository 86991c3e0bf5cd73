use anyhow::{Context, Result};
use exam_extract::utils::logging;
use exam_extract::{App, Config, RunMode};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let mut config = Config::from_env();

    // 初始化日志
    logging::init(config.verbose_logging);

    // 参数：[extract|reconcile|all] [逐页文本路径]
    let mut args = std::env::args().skip(1);
    let mode: RunMode = match args.next() {
        Some(arg) => arg.parse()?,
        None => RunMode::All,
    };
    if let Some(pages_path) = args.next() {
        config.pages_path = pages_path;
    }

    // 初始化并运行应用
    let app = App::initialize(config).context("初始化失败")?;
    app.run(mode).await.context("处理失败")?;

    Ok(())
}
