//! 站点适配数据
//!
//! 第三方站点的选择器和文案才是真正的"事实来源"，而且会随改版漂移，
//! 所以全部作为数据存在：内置一套学堂在线的默认值，可被 TOML 文件覆盖。
//! 站点改版只需要改数据，不需要改逻辑。

use serde::{Deserialize, Serialize};

/// 站点配置：选择器、关键词、按钮文案
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteProfile {
    /// 小节类型标签（"视频" / "附件"）所在元素
    pub section_title_selector: String,
    /// 面包屑导航
    pub breadcrumb_selector: String,
    /// 正文内容区域
    pub content_area_selector: String,
    /// "下一项"按钮
    pub next_button_selector: String,
    /// 视频播放器的点击遮罩（点击开始播放）
    pub video_mask_selector: String,
    /// 播放按钮提示文字所在元素
    pub play_tip_selector: String,
    /// 提示文字为该值时表示视频尚未播放
    pub play_tip_text: String,
    /// 已静音图标（存在即已静音）
    pub muted_icon_selector: String,
    /// 声音开关图标
    pub sound_icon_selector: String,
    /// 倍速菜单列表（第一项为最高倍速）
    pub rate_list_selector: String,
    /// 当前显示的倍速文字
    pub rate_value_selector: String,
    /// 答题列表容器（出现即为题目页面）
    pub answer_list_selector: String,
    /// 附件"标记已读"按钮
    pub attachment_button_selector: String,
    /// 附件按钮的"已读完"文案
    pub attachment_done_text: String,
    /// 讨论类表单标记
    pub discussion_form_selectors: Vec<String>,
    /// 作业类表单标记
    pub homework_form_selectors: Vec<String>,
    /// 测验类表单标记
    pub quiz_form_selectors: Vec<String>,
    /// 提交类按钮文案（出现任意一个即视为可评分页面）
    pub submit_texts: Vec<String>,
    /// 课后习题类关键词
    pub homework_keywords: Vec<String>,
    /// 讨论类关键词
    pub discussion_keywords: Vec<String>,
    /// URL 中的可跳过关键词
    pub url_keywords: Vec<String>,
    /// 当前章节导航节点
    pub active_nav_selector: String,
    /// 导航节点上表示"已完成"的 class 名
    pub completed_markers: Vec<String>,
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self {
            section_title_selector: ".t1".to_string(),
            breadcrumb_selector: ".breadcrumb".to_string(),
            content_area_selector: ".content-area".to_string(),
            next_button_selector: ".next".to_string(),
            video_mask_selector: ".xt_video_player_mask".to_string(),
            play_tip_selector: ".play-btn-tip".to_string(),
            play_tip_text: "播放".to_string(),
            muted_icon_selector: ".xt_video_player_common_icon_muted".to_string(),
            sound_icon_selector: ".xt_video_player_common_icon".to_string(),
            rate_list_selector: ".xt_video_player_common_list".to_string(),
            rate_value_selector: ".xt_video_player_common_value".to_string(),
            answer_list_selector: ".answerList".to_string(),
            attachment_button_selector: ".btnCon button".to_string(),
            attachment_done_text: "我已看完".to_string(),
            discussion_form_selectors: vec![
                ".discussion-form".to_string(),
                ".forum-form".to_string(),
            ],
            homework_form_selectors: vec![
                ".homework-form".to_string(),
                ".exercise-form".to_string(),
            ],
            quiz_form_selectors: vec![".quiz-form".to_string()],
            submit_texts: vec![
                "提交".to_string(),
                "发布".to_string(),
                "回复".to_string(),
                "submit".to_string(),
            ],
            homework_keywords: vec![
                "课后习题".to_string(),
                "课后练习".to_string(),
                "课后作业".to_string(),
                "章节练习".to_string(),
                "习题".to_string(),
                "练习".to_string(),
                "作业".to_string(),
                "测验".to_string(),
                "考试".to_string(),
                "quiz".to_string(),
            ],
            discussion_keywords: vec![
                "讨论题".to_string(),
                "课堂讨论".to_string(),
                "互动讨论".to_string(),
                "论坛讨论".to_string(),
                "讨论".to_string(),
                "discussion".to_string(),
                "交流".to_string(),
                "分享".to_string(),
                "思考题".to_string(),
            ],
            url_keywords: vec![
                "homework".to_string(),
                "discussion".to_string(),
                "quiz".to_string(),
                "exercise".to_string(),
                "practice".to_string(),
            ],
            active_nav_selector: ".xt_chapter .active".to_string(),
            completed_markers: vec![
                "finished".to_string(),
                "completed".to_string(),
                "done".to_string(),
            ],
        }
    }
}
