use anyhow::Result;
use xuetangx_auto::orchestrator::KeepaliveApp;
use xuetangx_auto::utils::logging;
use xuetangx_auto::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    // 初始化并运行防超时循环
    KeepaliveApp::initialize(config).await?.run().await?;

    Ok(())
}
