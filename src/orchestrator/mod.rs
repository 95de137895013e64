//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责生命周期管理和轮询调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `course_runner` - 刷课运行器
//! - 管理应用生命周期（初始化、运行、退出）
//! - 连接或启动浏览器，持有 Browser 和 JsExecutor
//! - 加载站点配置和完成缓存
//! - 固定间隔驱动单轮流程，单轮失败只告警不退出
//!
//! ### `keepalive_runner` - 防超时运行器
//! - 与刷课完全独立的第二个入口
//! - 周期性恢复播放、模拟用户活动、刷新页面
//!
//! ## 层次关系
//!
//! ```text
//! course_runner (轮询循环)
//!     ↓
//! workflow::PageFlow (处理单轮)
//!     ↓
//! services (能力层：probe / classify / video / gate / cache)
//!     ↓
//! infrastructure (基础设施：JsExecutor)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：course_runner 管刷课，keepalive_runner 管防超时
//! 2. **资源隔离**：只有编排层持有 Browser 和 JsExecutor
//! 3. **向下依赖**：编排层 → workflow → services → infrastructure
//! 4. **无业务逻辑**：只做调度和统计，不做具体页面判断

pub mod course_runner;
pub mod keepalive_runner;

// 重新导出主要类型
pub use course_runner::App;
pub use keepalive_runner::KeepaliveApp;
