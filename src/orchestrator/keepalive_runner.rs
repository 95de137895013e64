//! 防超时运行器 - 编排层
//!
//! 与刷课运行器完全独立的第二个入口：让考试/培训页面上的视频
//! 一直循环播放，周期性模拟用户活动，并定时整页刷新。
//! 不依赖分类器，也不读写完成缓存。

use anyhow::Result;
use chromiumoxide::Browser;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{info, warn};

use crate::browser;
use crate::config::Config;
use crate::infrastructure::JsExecutor;
use crate::services::KeepaliveService;

/// 防超时应用
pub struct KeepaliveApp {
    config: Config,
    _browser: Browser,
    executor: JsExecutor,
    service: KeepaliveService,
}

impl KeepaliveApp {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let (browser, page) = if config.launch_headless {
            browser::launch_headless_browser(
                &config.keepalive_target_url,
                config.chrome_executable.as_deref(),
            )
            .await?
        } else {
            browser::connect_to_browser_and_page(
                config.browser_debug_port,
                Some(&config.keepalive_target_url),
                Some("redir.php"),
            )
            .await?
        };

        let executor = JsExecutor::new(page);

        Ok(Self {
            config,
            _browser: browser,
            executor,
            service: KeepaliveService::new(),
        })
    }

    /// 运行防超时循环
    pub async fn run(&mut self) -> Result<()> {
        let mut ticker = interval(Duration::from_secs(1));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let play_check_secs = self.config.keepalive_play_check_secs.max(1);
        let activity_secs = self.config.keepalive_activity_secs.max(1);
        let refresh_secs = self.config.keepalive_refresh_secs.max(1);

        // 每次页面(重新)加载后重做一遍视频设置
        let mut video_ready = false;
        let mut elapsed_secs: u64 = 0;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    elapsed_secs += 1;

                    if !video_ready {
                        video_ready = self.service.setup_video(&self.executor).await;
                    }
                    if elapsed_secs % play_check_secs == 0 {
                        self.service.force_play(&self.executor).await;
                    }
                    if elapsed_secs % activity_secs == 0 {
                        self.service.simulate_activity(&self.executor).await;
                    }
                    if elapsed_secs >= refresh_secs {
                        info!("⏰ 刷新间隔已到，自动刷新页面");
                        if let Err(e) = self.executor.page().reload().await {
                            warn!("页面刷新失败（继续运行）: {}", e);
                        }
                        video_ready = false;
                        elapsed_secs = 0;
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("🛑 收到退出信号，停止防超时");
                    break;
                }
            }
        }

        Ok(())
    }
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 视频循环防超时模式");
    info!("📄 目标页面: {}", config.keepalive_target_url);
    info!(
        "⏱️ 活动模拟: 每 {} 秒, 暂停检查: 每 {} 秒, 页面刷新: 每 {} 秒",
        config.keepalive_activity_secs,
        config.keepalive_play_check_secs,
        config.keepalive_refresh_secs
    );
    info!("{}", "=".repeat(60));
}
