use xuetangx_auto::browser::connect_to_browser_and_page;
use xuetangx_auto::infrastructure::JsExecutor;
use xuetangx_auto::models::load_site_profile;
use xuetangx_auto::services::PageProbe;
use xuetangx_auto::utils::logging;
use xuetangx_auto::workflow::{PageFlow, TickCtx};
use xuetangx_auto::Config;

#[tokio::test]
#[ignore] // 默认忽略，需要手动运行：cargo test -- --ignored
async fn test_browser_connection() {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    // 测试浏览器连接
    let result = connect_to_browser_and_page(
        config.browser_debug_port,
        Some(&config.target_url),
        Some("xuetangx"),
    )
    .await;

    assert!(result.is_ok(), "应该能够成功连接浏览器");
}

#[tokio::test]
#[ignore]
async fn test_capture_snapshot() {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    // 连接浏览器
    let (_browser, page) = connect_to_browser_and_page(
        config.browser_debug_port,
        Some(&config.target_url),
        Some("xuetangx"),
    )
    .await
    .expect("连接浏览器失败");

    let executor = JsExecutor::new(page);
    let profile = load_site_profile(&config.profile_file);
    let probe = PageProbe::new(&profile);

    // 采集一次快照
    let snapshot = probe.capture(&executor).await.expect("采集快照失败");

    println!("当前页面: {}", snapshot.url);
    println!("小节类型: {}", snapshot.section_title);
    assert!(!snapshot.url.is_empty(), "快照应该包含页面URL");
}

#[tokio::test]
#[ignore]
async fn test_single_tick() {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    // 连接浏览器
    let (_browser, page) = connect_to_browser_and_page(
        config.browser_debug_port,
        Some(&config.target_url),
        Some("xuetangx"),
    )
    .await
    .expect("连接浏览器失败");

    let executor = JsExecutor::new(page);
    let profile = load_site_profile(&config.profile_file);
    let mut flow = PageFlow::new(&config, profile);

    // 处理一轮轮询
    let ctx = TickCtx::new(1, executor.current_url().await);
    let outcome = flow.run_tick(&executor, &ctx).await.expect("单轮处理失败");

    println!("本轮处理结果: {:?}", outcome);
}
