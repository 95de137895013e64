//! 刷课运行器 - 编排层
//!
//! ## 职责
//!
//! 本模块是刷课入口，负责生命周期和轮询调度。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：启动日志、连接浏览器、创建 JsExecutor
//! 2. **配置装载**：站点配置（选择器/关键词）和视频完成缓存
//! 3. **启动延迟**：等页面完成首次渲染后再开始轮询
//! 4. **轮询驱动**：固定间隔调用单轮流程，单轮抛错只告警
//! 5. **资源管理**：持有 Browser 和 JsExecutor，确保生命周期正确
//!
//! 轮询循环没有终止状态，Ctrl-C 退出。第三方页面的 DOM 随时可能
//! 变化，所以任何一轮的失败都不允许终止循环。

use anyhow::Result;
use chromiumoxide::Browser;
use std::fs;
use tokio::time::{interval, sleep, Duration, MissedTickBehavior};
use tracing::{info, warn};

use crate::browser;
use crate::config::Config;
use crate::infrastructure::JsExecutor;
use crate::models::load_site_profile;
use crate::workflow::{PageFlow, TickCtx};

/// 应用主结构
pub struct App {
    config: Config,
    _browser: Browser,
    executor: JsExecutor,
    flow: PageFlow,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        init_log_file(&config.output_log_file)?;

        log_startup(&config);

        // 连接或启动浏览器
        let (browser, page) = if config.launch_headless {
            browser::launch_headless_browser(&config.target_url, config.chrome_executable.as_deref())
                .await?
        } else {
            browser::connect_to_browser_and_page(
                config.browser_debug_port,
                Some(&config.target_url),
                Some("xuetangx"),
            )
            .await?
        };

        // 创建 JsExecutor（持有 page）
        let executor = JsExecutor::new(page);

        // 装载站点配置和单轮流程
        let profile = load_site_profile(&config.profile_file);
        let flow = PageFlow::new(&config, profile);

        Ok(Self {
            config,
            _browser: browser,
            executor,
            flow,
        })
    }

    /// 运行轮询循环
    pub async fn run(&mut self) -> Result<()> {
        info!(
            "⏳ 等待页面加载，{} 毫秒后开始轮询...",
            self.config.startup_delay_ms
        );
        sleep(Duration::from_millis(self.config.startup_delay_ms)).await;
        info!("🚀 开始自动刷课");

        let mut ticker = interval(Duration::from_millis(self.config.poll_interval_ms));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut tick: u64 = 0;
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    tick += 1;
                    let url = self.executor.current_url().await;
                    let ctx = TickCtx::new(tick, url);
                    // 单轮失败只告警，循环永不退出
                    if let Err(e) = self.flow.run_tick(&self.executor, &ctx).await {
                        warn!("{} ⚠️ 本轮处理失败（下一轮重试）: {}", ctx, e);
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("🛑 收到退出信号，停止刷课");
                    break;
                }
            }
        }

        Ok(())
    }
}

// ========== 日志辅助函数 ==========

fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n刷课运行日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 学堂在线自动刷课");
    info!("📄 课程页面: {}", config.target_url);
    info!(
        "⏱️ 轮询间隔: {} 毫秒, 跳转冷却: {} 秒",
        config.poll_interval_ms, config.advance_cooldown_secs
    );
    info!("{}", "=".repeat(60));
}
