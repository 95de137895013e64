//! # Xuetangx Auto
//!
//! 一个用于学堂在线自动刷课的 Rust 应用程序：自动播放课程视频、
//! 处理图文附件、跳过课后习题和讨论题。另带一个独立的防超时入口，
//! 让指定页面上的视频循环播放并模拟用户活动。
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露能力
//! - `JsExecutor` - 唯一的 page owner，提供 eval() 能力
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单轮快照
//! - `PageProbe` - 页面快照采集能力
//! - `PageClassifier` - 页面分类能力（纯函数）
//! - `VideoControl` - 播放器控制与结束确认能力
//! - `AdvanceGate` - 跳转串行化能力（锁 + 冷却）
//! - `CompletionCache` - 视频完成记录能力
//! - `KeepaliveService` - 防超时能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一轮轮询"的完整处理流程
//! - `TickCtx` - 上下文封装（轮次 + URL）
//! - `PageFlow` - 流程编排（probe → classify → dispatch）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/course_runner` - 刷课运行器，管理资源和轮询循环
//! - `orchestrator/keepalive_runner` - 防超时运行器，独立入口
//!
//! ## 模块结构

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use browser::{connect_to_browser_and_page, launch_headless_browser};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::JsExecutor;
pub use models::{load_site_profile, PageSnapshot, SiteProfile, VideoId, VideoStatus};
pub use orchestrator::{App, KeepaliveApp};
pub use services::{AdvanceGate, CompletionCache, ConfirmOutcome, PageClassifier, PageKind};
pub use workflow::{PageFlow, TickCtx, TickOutcome};
