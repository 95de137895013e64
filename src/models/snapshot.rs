//! 页面快照
//!
//! 每一轮轮询在页面里执行一次采集脚本，把当前 DOM 的读数反序列化为
//! `PageSnapshot`。快照只代表"这一轮的读数"，从不持久化。

use serde::Deserialize;

/// 视频元素的读数
#[derive(Clone, Debug, Default, Deserialize)]
pub struct VideoStatus {
    /// 当前播放位置（秒）
    #[serde(default)]
    pub current_time: f64,
    /// 总时长（秒），未加载时为 0
    #[serde(default)]
    pub duration: f64,
    /// 是否暂停中
    #[serde(default)]
    pub paused: bool,
    /// 元素自身的播放结束标志
    #[serde(default)]
    pub ended: bool,
    /// 是否已挂上播放结束监听器（元素上的幂等标记）
    #[serde(default)]
    pub end_hooked: bool,
}

/// 单轮页面快照
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct PageSnapshot {
    /// 当前页面 URL
    pub url: String,
    /// 小节类型标签文字（"视频" / "附件" / 空）
    pub section_title: String,
    /// 面包屑文字
    pub breadcrumb: String,
    /// 文档标题
    pub page_title: String,
    /// 所有 h1 文字
    pub main_title: String,
    /// 所有 h2 文字
    pub sub_title: String,
    /// 正文区域文字
    pub content_area: String,
    /// 答题列表是否存在
    pub has_answer_list: bool,
    /// 讨论类表单是否存在
    pub has_discussion_form: bool,
    /// 作业类表单是否存在
    pub has_homework_form: bool,
    /// 测验类表单是否存在
    pub has_quiz_form: bool,
    /// 是否存在提交类按钮
    pub has_submit_button: bool,
    /// 播放按钮提示文字
    pub play_tip: String,
    /// 已静音图标是否显示
    pub muted_icon_shown: bool,
    /// 当前显示的倍速文字
    pub rate_label: String,
    /// 附件按钮文字（按钮不存在时为空）
    pub attachment_button_text: String,
    /// 视频读数（页面上没有视频元素时为 None）
    pub video: Option<VideoStatus>,
    /// 页面级的播放结束标志（由注入的监听器置位）
    pub ended_flag: bool,
}

impl PageSnapshot {
    /// 合并所有文本来源，统一小写，供关键词检测使用
    pub fn merged_text(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.section_title,
            self.breadcrumb,
            self.page_title,
            self.main_title,
            self.sub_title,
            self.content_area
        )
        .to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merged_text_lowercases_and_joins() {
        let snap = PageSnapshot {
            section_title: "视频".to_string(),
            page_title: "Quiz Time".to_string(),
            ..Default::default()
        };
        let merged = snap.merged_text();
        assert!(merged.contains("视频"));
        assert!(merged.contains("quiz time"));
    }
}
