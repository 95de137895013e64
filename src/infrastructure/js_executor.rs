//! JS 执行器 - 基础设施层
//!
//! 持有唯一的 page 资源，只暴露"执行 JS"的能力

use anyhow::Result;
use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::debug;

/// JS 执行器
///
/// 职责：
/// - 持有唯一的 Page 资源
/// - 暴露 eval() 能力
/// - 不认识快照 / 分类结果
/// - 不处理业务流程
pub struct JsExecutor {
    page: Page,
}

impl JsExecutor {
    /// 创建新的 JS 执行器
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// 获取 page 的引用（用于其他操作）
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// 读取页面当前 URL
    ///
    /// 读取失败返回空字符串，第三方页面随时可能导航，这里不视为错误
    pub async fn current_url(&self) -> String {
        match self.page.url().await {
            Ok(Some(url)) => url,
            Ok(None) => String::new(),
            Err(e) => {
                debug!("读取页面URL失败: {}", e);
                String::new()
            }
        }
    }

    /// 执行 JS 代码并返回 JSON 结果
    pub async fn eval(&self, js_code: impl Into<String>) -> Result<JsonValue> {
        let result = self.page.evaluate(js_code.into()).await?;
        let json_value = result.into_value()?;
        Ok(json_value)
    }

    /// 执行 JS 代码并反序列化为指定类型
    pub async fn eval_as<T: DeserializeOwned>(&self, js_code: impl Into<String>) -> Result<T> {
        let json_value = self.eval(js_code).await?;
        let typed_value = serde_json::from_value(json_value)?;
        Ok(typed_value)
    }

    /// 执行 JS 代码，失败时返回 None 而不是错误
    ///
    /// 轮询路径上的 DOM 操作随时可能因页面跳转而失败，
    /// 这类失败只记录 debug 日志，下一轮重试
    pub async fn eval_opt(&self, js_code: impl Into<String>) -> Option<JsonValue> {
        match self.eval(js_code).await {
            Ok(value) => Some(value),
            Err(e) => {
                debug!("JS 执行失败（下一轮重试）: {}", e);
                None
            }
        }
    }
}
