//! 视频控制服务 - 业务能力层
//!
//! 负责单个视频页面上的所有播放器操作：静音、倍速、起播、
//! 结束检测和有上限的平台确认等待。所有操作都是幂等的，
//! 轮询每两秒重入一次也不会重复触发菜单或开关。

use std::fmt;
use std::time::Duration;

use regex::Regex;
use serde_json::json;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::config::Config;
use crate::infrastructure::JsExecutor;
use crate::models::{PageSnapshot, SiteProfile, VideoStatus};

/// 平台确认的播放进度比例阈值
const CONFIRM_RATIO: f64 = 0.995;

/// 给视频元素挂结束监听器，元素上的 dataset 标记保证只挂一次
const END_HOOK_SCRIPT: &str = r#"
(function () {
    const video = document.querySelector('video');
    if (!video) { return false; }
    if (video.dataset.endHooked === '1') { return true; }
    video.dataset.endHooked = '1';
    video.addEventListener('ended', function () {
        window.__videoEndedFlag = true;
    });
    return true;
})()
"#;

/// 平台确认等待的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// 观测到完成信号
    Confirmed,
    /// 等到上限仍无信号，照常前进
    TimedOut,
}

impl fmt::Display for ConfirmOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfirmOutcome::Confirmed => write!(f, "平台已确认"),
            ConfirmOutcome::TimedOut => write!(f, "等待确认超时"),
        }
    }
}

/// 视频控制服务
///
/// 职责：
/// - 只处理"当前这个视频"
/// - 不出现 VideoId / 缓存 / 闸门
/// - 不关心流程顺序
pub struct VideoControl {
    target_rate: f64,
    end_epsilon: f64,
    confirm_ceiling: Duration,
    confirm_interval: Duration,
    /// 确认等待的单飞标记：同一时间最多一个确认等待在途
    confirm_in_flight: bool,
    play_tip_text: String,
    click_mask_script: String,
    click_sound_script: String,
    click_rate_script: String,
    confirm_script: String,
}

impl VideoControl {
    /// 创建新的视频控制服务
    pub fn new(config: &Config, profile: &SiteProfile) -> Self {
        let confirm_params = json!({
            "activeNav": profile.active_nav_selector,
            "completedMarkers": profile.completed_markers,
            "ratio": CONFIRM_RATIO,
        });
        let confirm_script = format!(
            r#"(function () {{
    const P = {};
    const video = document.querySelector('video');
    if (video && isFinite(video.duration) && video.duration > 0
        && video.currentTime / video.duration >= P.ratio) {{ return true; }}
    const node = document.querySelector(P.activeNav);
    if (node) {{ return P.completedMarkers.some((m) => node.classList.contains(m)); }}
    return false;
}})()"#,
            confirm_params
        );

        Self {
            target_rate: config.playback_rate,
            end_epsilon: config.end_epsilon,
            confirm_ceiling: Duration::from_secs(config.confirm_ceiling_secs),
            confirm_interval: Duration::from_millis(config.confirm_interval_ms),
            confirm_in_flight: false,
            play_tip_text: profile.play_tip_text.clone(),
            click_mask_script: click_script(&profile.video_mask_selector),
            click_sound_script: click_script(&profile.sound_icon_selector),
            click_rate_script: click_first_child_script(&profile.rate_list_selector),
            confirm_script,
        }
    }

    /// 幂等地给视频挂结束监听器
    pub async fn ensure_end_hook(&self, executor: &JsExecutor) {
        if let Some(v) = executor.eval_opt(END_HOOK_SCRIPT).await {
            if v.as_bool() == Some(false) {
                debug!("视频元素尚不存在，结束监听器下一轮再挂");
            }
        }
    }

    /// 播放提示仍显示"播放"时点击遮罩起播
    pub async fn ensure_playing(&self, executor: &JsExecutor, snapshot: &PageSnapshot) {
        if snapshot.play_tip == self.play_tip_text {
            info!("点击播放按钮");
            executor.eval_opt(self.click_mask_script.clone()).await;
        }
    }

    /// 静音图标不存在时点击声音开关（已静音则不动，避免把声音点回来）
    pub async fn ensure_muted(&self, executor: &JsExecutor, snapshot: &PageSnapshot) {
        if !snapshot.muted_icon_shown {
            debug!("关闭视频声音");
            executor.eval_opt(self.click_sound_script.clone()).await;
        }
    }

    /// 显示的倍速与目标不一致时切到倍速菜单第一项（最高倍速）
    ///
    /// 读不到倍速文字时不动作，避免每轮都去触发倍速菜单
    pub async fn ensure_rate(&self, executor: &JsExecutor, snapshot: &PageSnapshot) {
        if self.needs_rate_change(&snapshot.rate_label) {
            debug!("切换倍速: {} → {}", snapshot.rate_label, self.target_rate);
            executor.eval_opt(self.click_rate_script.clone()).await;
        }
    }

    /// 是否到达播放结尾（原生 ended 事件之外的兜底判定）
    pub fn end_reached(&self, status: &VideoStatus) -> bool {
        status.duration > 0.0 && status.current_time >= status.duration - self.end_epsilon
    }

    /// 等待平台确认完成，单飞保护
    ///
    /// 按固定间隔轮询进度比例和导航节点上的完成标记，到上限为止。
    /// 已有确认等待在途时返回 None（重复触发是预期情况，不是错误）。
    pub async fn await_confirmation(&mut self, executor: &JsExecutor) -> Option<ConfirmOutcome> {
        if !self.begin_confirm() {
            debug!("确认等待已在进行中，忽略重复触发");
            return None;
        }

        info!("⏳ 等待平台确认完成（上限 {:?}）...", self.confirm_ceiling);
        let attempts = (self.confirm_ceiling.as_millis() / self.confirm_interval.as_millis().max(1))
            .max(1) as u64;

        let mut outcome = ConfirmOutcome::TimedOut;
        for _ in 0..attempts {
            if let Some(v) = executor.eval_opt(self.confirm_script.clone()).await {
                if v.as_bool() == Some(true) {
                    outcome = ConfirmOutcome::Confirmed;
                    break;
                }
            }
            sleep(self.confirm_interval).await;
        }

        self.finish_confirm();
        Some(outcome)
    }

    /// 进度比例是否达到平台确认阈值
    pub fn ratio_reached(current_time: f64, duration: f64) -> bool {
        duration > 0.0 && current_time / duration >= CONFIRM_RATIO
    }

    /// 解析显示的倍速文字（"2.0x" / "X2.0" / "倍速 1.5"）
    fn parse_rate_label(label: &str) -> Option<f64> {
        let re = Regex::new(r"(\d+(?:\.\d+)?)").ok()?;
        let captures = re.captures(label)?;
        captures.get(1)?.as_str().parse().ok()
    }

    fn needs_rate_change(&self, label: &str) -> bool {
        match Self::parse_rate_label(label) {
            Some(rate) => (rate - self.target_rate).abs() > 0.01,
            None => false,
        }
    }

    fn begin_confirm(&mut self) -> bool {
        if self.confirm_in_flight {
            return false;
        }
        self.confirm_in_flight = true;
        true
    }

    fn finish_confirm(&mut self) {
        self.confirm_in_flight = false;
    }
}

/// 生成"点击选择器命中的第一个元素"的脚本
fn click_script(selector: &str) -> String {
    format!(
        r#"(function () {{
    const el = document.querySelector({});
    if (!el) {{ return false; }}
    el.click();
    return true;
}})()"#,
        json!(selector)
    )
}

/// 生成"点击列表第一个子元素"的脚本
fn click_first_child_script(selector: &str) -> String {
    format!(
        r#"(function () {{
    const list = document.querySelector({});
    if (!list || !list.children.length) {{ return false; }}
    list.children[0].click();
    return true;
}})()"#,
        json!(selector)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_control() -> VideoControl {
        VideoControl::new(&Config::default(), &SiteProfile::default())
    }

    #[test]
    fn test_end_reached_within_epsilon() {
        let control = create_test_control();
        // 进度 99.6%：119.52 >= 120 - 0.5
        let status = VideoStatus {
            current_time: 119.52,
            duration: 120.0,
            ..Default::default()
        };
        assert!(control.end_reached(&status));
    }

    #[test]
    fn test_end_not_reached_outside_epsilon() {
        let control = create_test_control();
        let status = VideoStatus {
            current_time: 119.0,
            duration: 120.0,
            ..Default::default()
        };
        assert!(!control.end_reached(&status));
    }

    #[test]
    fn test_end_reached_requires_loaded_duration() {
        let control = create_test_control();
        let status = VideoStatus {
            current_time: 0.0,
            duration: 0.0,
            ..Default::default()
        };
        assert!(!control.end_reached(&status));
    }

    #[test]
    fn test_ratio_threshold() {
        assert!(VideoControl::ratio_reached(119.52, 120.0));
        assert!(!VideoControl::ratio_reached(119.0, 120.0));
        assert!(!VideoControl::ratio_reached(0.0, 0.0));
    }

    #[test]
    fn test_parse_rate_label() {
        assert_eq!(VideoControl::parse_rate_label("2.0x"), Some(2.0));
        assert_eq!(VideoControl::parse_rate_label("X1.5"), Some(1.5));
        assert_eq!(VideoControl::parse_rate_label("倍速 1.25"), Some(1.25));
        assert_eq!(VideoControl::parse_rate_label("倍速"), None);
        assert_eq!(VideoControl::parse_rate_label(""), None);
    }

    #[test]
    fn test_rate_change_only_when_label_differs() {
        let control = create_test_control();
        assert!(!control.needs_rate_change("2.0x"));
        assert!(control.needs_rate_change("1.0x"));
        // 读不到倍速时不动作
        assert!(!control.needs_rate_change(""));
    }

    #[test]
    fn test_confirm_guard_is_single_flight() {
        let mut control = create_test_control();
        assert!(control.begin_confirm());
        // 在途期间的重复触发是 no-op
        assert!(!control.begin_confirm());
        control.finish_confirm();
        assert!(control.begin_confirm());
    }
}
