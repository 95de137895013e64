//! 单轮处理流程 - 流程层
//!
//! 核心职责：定义"一轮轮询"的完整处理流程
//!
//! 流程顺序：
//! 1. 采集快照 → 分类
//! 2. 视频 → 视频控制（缓存命中直接跳、挂监听、起播/静音/倍速、结束处理）
//! 3. 附件 → 点击已读 → 跳过
//! 4. 习题/讨论/答题列表 → 直接请求跳过
//! 5. 未知 → 本轮不动作
//!
//! 所有"跳到下一项"的请求都经过同一个跳转闸门。

use std::time::Duration;

use anyhow::Result;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::infrastructure::JsExecutor;
use crate::models::{PageSnapshot, SiteProfile, VideoId};
use crate::services::{
    AdvanceGate, CompletionCache, PageClassifier, PageKind, PageProbe, VideoControl,
};
use crate::workflow::tick_ctx::TickCtx;

/// 单轮处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// 视频页面，已做播放器维护
    Video,
    /// 附件页面，已处理
    Attachment,
    /// 可评分内容，已请求跳过
    Skipped,
    /// 无法判定，等待下一轮
    Waiting,
}

/// 单轮处理流程
///
/// - 编排一轮轮询的完整流程
/// - 决定何时播放、何时跳过、何时等待
/// - 不持有任何资源（page）
/// - 只依赖业务能力（services）
pub struct PageFlow {
    probe: PageProbe,
    classifier: PageClassifier,
    video: VideoControl,
    cache: CompletionCache,
    gate: AdvanceGate,
    attachment_script: String,
    next_script: String,
    attachment_done_text: String,
    verbose_logging: bool,
}

impl PageFlow {
    /// 创建新的单轮处理流程
    pub fn new(config: &Config, profile: SiteProfile) -> Self {
        let attachment_script = format!(
            r#"(function () {{
    const btn = document.querySelector({});
    if (!btn) {{ return ''; }}
    btn.dispatchEvent(new Event('mouseup'));
    return (btn.textContent || '').trim();
}})()"#,
            json!(profile.attachment_button_selector)
        );
        let next_script = format!(
            r#"(function () {{
    const next = document.querySelector({});
    if (!next) {{ return false; }}
    next.click();
    return true;
}})()"#,
            json!(profile.next_button_selector)
        );

        Self {
            probe: PageProbe::new(&profile),
            video: VideoControl::new(config, &profile),
            cache: CompletionCache::load(&config.completion_cache_file),
            gate: AdvanceGate::new(Duration::from_secs(config.advance_cooldown_secs)),
            attachment_done_text: profile.attachment_done_text.clone(),
            classifier: PageClassifier::new(profile),
            attachment_script,
            next_script,
            verbose_logging: config.verbose_logging,
        }
    }

    /// 处理一轮轮询
    pub async fn run_tick(&mut self, executor: &JsExecutor, ctx: &TickCtx) -> Result<TickOutcome> {
        let snapshot = self.probe.capture(executor).await?;
        let kind = self.classifier.classify(&snapshot);

        debug!("{} 页面类型: {} → {:?}", ctx, snapshot.section_title, kind);
        if self.verbose_logging {
            debug!("{} 检测文本内容: {}", ctx, snapshot.merged_text());
        }

        match kind {
            PageKind::Video => self.handle_video(executor, ctx, &snapshot).await,
            PageKind::Attachment => self.handle_attachment(executor, ctx).await,
            PageKind::AssessmentSkip => {
                info!("{} 检测到课后习题或讨论题，自动跳过", ctx);
                self.request_advance(executor, "检测到习题或讨论页面")
                    .await?;
                Ok(TickOutcome::Skipped)
            }
            PageKind::AnswerListSkip => {
                info!("{} 检测到题目页面，自动跳过", ctx);
                self.request_advance(executor, "检测到答题界面").await?;
                Ok(TickOutcome::Skipped)
            }
            PageKind::Unknown => {
                info!("{} 页面类型未确定，等待加载...", ctx);
                Ok(TickOutcome::Waiting)
            }
        }
    }

    /// 视频页面处理
    async fn handle_video(
        &mut self,
        executor: &JsExecutor,
        ctx: &TickCtx,
        snapshot: &PageSnapshot,
    ) -> Result<TickOutcome> {
        // 上一次跳转还在途时不碰播放器，避免和页面切换赛跑
        if self.gate.is_locked() {
            debug!("{} 跳转在途，本轮跳过视频处理", ctx);
            return Ok(TickOutcome::Video);
        }

        let status = match &snapshot.video {
            Some(status) => status.clone(),
            None => {
                info!("{} 未找到视频元素，等待加载...", ctx);
                return Ok(TickOutcome::Video);
            }
        };

        // 缓存命中：慢导航后轮询重入已完成的视频，直接请求跳过
        let video_id = VideoId::from_url(&snapshot.url);
        if self.cache.is_complete(&video_id) {
            info!("{} 该视频此前已完成，直接跳过", ctx);
            self.request_advance(executor, "视频此前已完成").await?;
            return Ok(TickOutcome::Video);
        }

        self.video.ensure_end_hook(executor).await;

        if status.duration <= 0.0 {
            info!("{} 视频时长未加载，等待...", ctx);
            return Ok(TickOutcome::Video);
        }

        self.video.ensure_playing(executor, snapshot).await;
        self.video.ensure_muted(executor, snapshot).await;
        self.video.ensure_rate(executor, snapshot).await;

        let percent = status.current_time / status.duration * 100.0;
        info!(
            "{} 视频进度: {:.1}/{:.1} ({:.1}%)",
            ctx, status.current_time, status.duration, percent
        );

        // 原生结束信号或结尾容差兜底，两路都汇入同一个确认等待
        let ended = snapshot.ended_flag || status.ended;
        if ended || self.video.end_reached(&status) {
            if let Some(outcome) = self.video.await_confirmation(executor).await {
                self.cache.mark_complete(&video_id);
                info!(
                    "{} ✓ 视频播放完成（{}），已记录 {}",
                    ctx, outcome, video_id
                );
                let reason = format!("视频播放完成（{}）", outcome);
                self.request_advance(executor, &reason).await?;
            }
        }

        Ok(TickOutcome::Video)
    }

    /// 附件页面处理：派发 mouseup 标记已读，按钮文案显示已读完就跳过
    async fn handle_attachment(
        &mut self,
        executor: &JsExecutor,
        ctx: &TickCtx,
    ) -> Result<TickOutcome> {
        let button_text = match executor.eval_opt(self.attachment_script.clone()).await {
            Some(v) => v.as_str().unwrap_or_default().to_string(),
            None => String::new(),
        };

        if button_text.is_empty() {
            info!("{} 未找到附件按钮，等待加载...", ctx);
        } else if button_text == self.attachment_done_text {
            self.request_advance(executor, "附件已阅读完成").await?;
        } else {
            info!("{} 附件处理中: {}", ctx, button_text);
        }

        Ok(TickOutcome::Attachment)
    }

    /// 通过闸门请求一次跳转，放行时恰好点击一次"下一项"
    async fn request_advance(&mut self, executor: &JsExecutor, reason: &str) -> Result<bool> {
        if !self.gate.request(reason) {
            return Ok(false);
        }
        match executor.eval_opt(self.next_script.clone()).await {
            Some(v) if v.as_bool() == Some(true) => Ok(true),
            _ => {
                warn!("未找到下一项按钮，跳转未执行: {}", reason);
                Ok(false)
            }
        }
    }
}
