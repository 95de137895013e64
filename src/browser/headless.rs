use std::path::Path;

use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};

/// 启动无头浏览器并导航到指定 URL
///
/// 无头模式下没有已登录的会话，仅适用于不要求登录的页面
/// （或配合浏览器用户数据目录使用）。
pub async fn launch_headless_browser(
    url: &str,
    chrome_executable: Option<&str>,
) -> AppResult<(Browser, Page)> {
    info!("🚀 启动无头浏览器...");
    debug!("目标 URL: {}", url);

    // 配置无头浏览器
    let mut builder = BrowserConfig::builder().new_headless_mode().args(vec![
        "--disable-gpu",             // 无头模式下禁用 GPU
        "--no-sandbox",              // 禁用沙盒，防止权限问题导致的崩溃
        "--disable-dev-shm-usage",   // 防止共享内存不足
        "--remote-debugging-port=0", // 让浏览器自动选择端口
        "--mute-audio",              // 无头实例不需要声音
    ]);
    if let Some(exe) = chrome_executable {
        builder = builder.chrome_executable(Path::new(exe));
    }
    let config = builder
        .build()
        .map_err(|e| AppError::browser_configuration_failed(std::io::Error::other(e)))?;

    // 启动浏览器
    let (browser, mut handler) = Browser::launch(config)
        .await
        .map_err(AppError::browser_launch_failed)?;
    debug!("无头浏览器启动成功");

    // 在后台处理浏览器事件
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 添加短暂延迟以等待浏览器状态同步
    sleep(tokio::time::Duration::from_millis(300)).await;

    // 创建新页面并导航
    let page = browser
        .new_page(url)
        .await
        .map_err(|e| AppError::navigation_failed(url, e))?;

    info!("✅ 无头浏览器已导航到: {}", url);

    Ok((browser, page))
}
