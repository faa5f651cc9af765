use anyhow::Result;
use nss_gallery::utils::logging;
use nss_gallery::{App, Config, Selection};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 可选参数：活动代码或 "all"
    let selection = std::env::args()
        .nth(1)
        .map(|arg| arg.parse::<Selection>())
        .transpose()?;

    // 初始化并运行应用
    App::initialize(config)?.run(selection).await?;

    Ok(())
}
