//! 页面快照采集服务 - 业务能力层
//!
//! 只负责"读当前页面"能力：构建采集脚本、执行、反序列化为快照。
//! 不做分类，不做任何点击。

use anyhow::Result;
use serde_json::json;

use crate::infrastructure::JsExecutor;
use crate::models::{PageSnapshot, SiteProfile};

/// 采集脚本主体，选择器通过 `P` 注入
const SNAPSHOT_BODY: &str = r#"
    const text = (sel) => {
        const el = document.querySelector(sel);
        return el && el.textContent ? el.textContent.trim() : '';
    };
    const joinAll = (sel) => Array.from(document.querySelectorAll(sel))
        .map((e) => e.textContent || '').join(' ');
    const present = (sels) => sels.some((sel) => document.querySelector(sel) !== null);

    const candidates = Array.from(
        document.querySelectorAll('button, input[type="submit"], .btn'));
    const hasSubmit = candidates.some((b) => {
        const t = ((b.textContent || b.value) || '').toLowerCase();
        return P.submitTexts.some((s) => t.includes(s.toLowerCase()));
    });

    const video = document.querySelector('video');
    let videoStatus = null;
    if (video) {
        videoStatus = {
            current_time: video.currentTime || 0,
            duration: isFinite(video.duration) ? video.duration : 0,
            paused: !!video.paused,
            ended: !!video.ended,
            end_hooked: video.dataset.endHooked === '1',
        };
    }

    const attachBtn = document.querySelector(P.attachmentButton);

    return {
        url: window.location.href,
        section_title: text(P.sectionTitle),
        breadcrumb: text(P.breadcrumb),
        page_title: document.title || '',
        main_title: joinAll('h1'),
        sub_title: joinAll('h2'),
        content_area: text(P.contentArea),
        has_answer_list: document.querySelector(P.answerList) !== null,
        has_discussion_form: present(P.discussionForms),
        has_homework_form: present(P.homeworkForms),
        has_quiz_form: present(P.quizForms),
        has_submit_button: hasSubmit,
        play_tip: text(P.playTip),
        muted_icon_shown: document.querySelector(P.mutedIcon) !== null,
        rate_label: text(P.rateValue),
        attachment_button_text: attachBtn ? (attachBtn.textContent || '').trim() : '',
        video: videoStatus,
        ended_flag: window.__videoEndedFlag === true,
    };
"#;

/// 页面快照采集服务
///
/// 职责：
/// - 提供"读一次页面"能力
/// - 不出现 PageKind
/// - 不关心流程顺序
pub struct PageProbe {
    snapshot_script: String,
}

impl PageProbe {
    /// 创建新的采集服务，采集脚本按站点配置生成一次后复用
    pub fn new(profile: &SiteProfile) -> Self {
        let params = json!({
            "sectionTitle": profile.section_title_selector,
            "breadcrumb": profile.breadcrumb_selector,
            "contentArea": profile.content_area_selector,
            "answerList": profile.answer_list_selector,
            "discussionForms": profile.discussion_form_selectors,
            "homeworkForms": profile.homework_form_selectors,
            "quizForms": profile.quiz_form_selectors,
            "submitTexts": profile.submit_texts,
            "playTip": profile.play_tip_selector,
            "mutedIcon": profile.muted_icon_selector,
            "rateValue": profile.rate_value_selector,
            "attachmentButton": profile.attachment_button_selector,
        });
        let snapshot_script = format!(
            "(function () {{\n    const P = {};\n{}\n}})()",
            params, SNAPSHOT_BODY
        );
        Self { snapshot_script }
    }

    /// 采集一次页面快照
    pub async fn capture(&self, executor: &JsExecutor) -> Result<PageSnapshot> {
        let snapshot: PageSnapshot = executor.eval_as(self.snapshot_script.clone()).await?;
        Ok(snapshot)
    }
}
