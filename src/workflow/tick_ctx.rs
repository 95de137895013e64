//! 轮询上下文
//!
//! 封装"我正在处理第几轮、哪个页面"这一信息，只用于日志前缀

use std::fmt::Display;

use crate::utils::logging::truncate_text;

/// 单轮轮询上下文
#[derive(Debug, Clone)]
pub struct TickCtx {
    /// 轮次编号（从1开始）
    pub tick: u64,

    /// 本轮开始时的页面 URL
    pub url: String,
}

impl TickCtx {
    /// 创建新的轮询上下文
    pub fn new(tick: u64, url: String) -> Self {
        Self { tick, url }
    }
}

impl Display for TickCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[轮询#{} {}]", self.tick, truncate_text(&self.url, 60))
    }
}
