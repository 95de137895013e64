use chromiumoxide::{Browser, Page};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};

/// 连接到浏览器并获取课程页面
///
/// 优先复用已打开的课程标签页（按 URL 片段匹配），保留用户的登录态；
/// 找不到时新建页面并导航到目标 URL。
pub async fn connect_to_browser_and_page(
    port: u16,
    target_url: Option<&str>,
    url_hint: Option<&str>,
) -> AppResult<(Browser, Page)> {
    let browser_url = format!("http://localhost:{}", port);
    info!("正在连接到浏览器: {}", browser_url);
    debug!("目标 URL: {:?}, URL 匹配片段: {:?}", target_url, url_hint);

    let (browser, mut handler) = Browser::connect(&browser_url)
        .await
        .map_err(|e| AppError::browser_connection_failed(port, e))?;
    debug!("浏览器连接成功");

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

    let pages = browser.pages().await?;
    debug!("获取到 {} 个页面", pages.len());

    // 如果指定了 URL 片段，尝试复用已打开的课程标签页
    if let Some(hint) = url_hint {
        debug!("正在查找 URL 包含 '{}' 的页面", hint);
        for p in pages.iter() {
            if let Ok(Some(page_url)) = p.url().await {
                debug!("检查页面: {}", page_url);
                if page_url.contains(hint) {
                    info!("✓ 找到已打开的课程页面: {}", page_url);
                    return Ok((browser, p.clone()));
                }
            }
        }
        debug!("未找到匹配的页面，将创建新页面");
    }

    // 如果没有找到匹配的页面，创建新页面
    let new_page = if let Some(url) = target_url {
        debug!("创建新页面并导航到: {}", url);
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(AppError::page_creation_failed)?;
        page.goto(url)
            .await
            .map_err(|e| AppError::navigation_failed(url, e))?;
        info!("已导航到: {}", url);
        page
    } else {
        debug!("创建空白页面");
        browser
            .new_page("about:blank")
            .await
            .map_err(AppError::page_creation_failed)?
    };

    Ok((browser, new_page))
}
