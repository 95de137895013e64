//! 页面分类服务 - 业务能力层
//!
//! 对单轮快照做纯函数分类，无任何副作用。
//! 多路启发式信号按"或"合并：任何一路命中即判定跳过，
//! 宁可错跳也不在评分页面上卡住。

use phf::phf_map;

use crate::models::{PageSnapshot, SiteProfile};

/// 页面分类结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// 视频页面，交给视频控制
    Video,
    /// 附件/图文页面，点击已读后跳过
    Attachment,
    /// 习题/讨论等评分内容，直接跳过
    AssessmentSkip,
    /// 答题列表页面，直接跳过
    AnswerListSkip,
    /// 无法判定，本轮不动作
    Unknown,
}

/// 小节类型标签的精确匹配表（标签先 trim 再小写）
static SECTION_LABELS: phf::Map<&'static str, PageKind> = phf_map! {
    "视频" => PageKind::Video,
    "video" => PageKind::Video,
    "附件" => PageKind::Attachment,
    "attachment" => PageKind::Attachment,
};

/// 页面分类服务
///
/// 职责：
/// - 只做"快照 → 类别"的判定
/// - 不读 DOM，不发请求
/// - 不关心流程顺序
pub struct PageClassifier {
    profile: SiteProfile,
}

impl PageClassifier {
    /// 创建新的分类服务
    pub fn new(profile: SiteProfile) -> Self {
        Self { profile }
    }

    /// 对快照分类
    ///
    /// 判定顺序：
    /// 1. 明确的小节类型标签（视频/附件）
    /// 2. 合并文本中的习题/讨论关键词
    /// 3. URL 关键词、表单标记、提交类按钮
    /// 4. 答题列表标记
    /// 5. 标签为空且以上均未命中 → 按可跳过处理（倾向前进的既定策略）
    /// 6. 其余 → 未知，等下一轮
    pub fn classify(&self, snapshot: &PageSnapshot) -> PageKind {
        let label = snapshot.section_title.trim().to_lowercase();
        if let Some(kind) = SECTION_LABELS.get(label.as_str()) {
            return *kind;
        }

        if self.matches_keywords(snapshot) || self.matches_structure(snapshot) {
            return PageKind::AssessmentSkip;
        }

        if snapshot.has_answer_list {
            return PageKind::AnswerListSkip;
        }

        if label.is_empty() {
            return PageKind::AssessmentSkip;
        }

        PageKind::Unknown
    }

    /// 合并文本命中习题/讨论关键词
    fn matches_keywords(&self, snapshot: &PageSnapshot) -> bool {
        let merged = snapshot.merged_text();
        let hit = |keywords: &[String]| {
            keywords
                .iter()
                .any(|k| merged.contains(k.to_lowercase().as_str()))
        };
        hit(&self.profile.homework_keywords) || hit(&self.profile.discussion_keywords)
    }

    /// URL / DOM 结构信号命中
    fn matches_structure(&self, snapshot: &PageSnapshot) -> bool {
        let url = snapshot.url.to_lowercase();
        let url_match = self
            .profile
            .url_keywords
            .iter()
            .any(|k| url.contains(k.to_lowercase().as_str()));

        url_match
            || snapshot.has_discussion_form
            || snapshot.has_homework_form
            || snapshot.has_quiz_form
            || snapshot.has_submit_button
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_classifier() -> PageClassifier {
        PageClassifier::new(SiteProfile::default())
    }

    #[test]
    fn test_video_label_wins_over_keywords() {
        let classifier = create_test_classifier();
        // 标题里带"讨论"也不影响：显式标签优先
        let snap = PageSnapshot {
            section_title: "视频".to_string(),
            page_title: "课堂讨论内容讲解".to_string(),
            ..Default::default()
        };
        assert_eq!(classifier.classify(&snap), PageKind::Video);
    }

    #[test]
    fn test_latin_video_label_case_folded() {
        let classifier = create_test_classifier();
        let snap = PageSnapshot {
            section_title: " Video ".to_string(),
            ..Default::default()
        };
        assert_eq!(classifier.classify(&snap), PageKind::Video);
    }

    #[test]
    fn test_attachment_label() {
        let classifier = create_test_classifier();
        let snap = PageSnapshot {
            section_title: "附件".to_string(),
            ..Default::default()
        };
        assert_eq!(classifier.classify(&snap), PageKind::Attachment);
    }

    #[test]
    fn test_keyword_skips_even_with_empty_label() {
        let classifier = create_test_classifier();
        let snap = PageSnapshot {
            section_title: String::new(),
            breadcrumb: "第三章 课后习题".to_string(),
            ..Default::default()
        };
        assert_eq!(classifier.classify(&snap), PageKind::AssessmentSkip);
    }

    #[test]
    fn test_english_keyword_case_insensitive() {
        let classifier = create_test_classifier();
        let snap = PageSnapshot {
            section_title: "随堂".to_string(),
            page_title: "Chapter QUIZ".to_string(),
            ..Default::default()
        };
        assert_eq!(classifier.classify(&snap), PageKind::AssessmentSkip);
    }

    #[test]
    fn test_url_keyword_skips() {
        let classifier = create_test_classifier();
        let snap = PageSnapshot {
            section_title: "某节".to_string(),
            url: "https://www.xuetangx.com/learn/c1/homework/3".to_string(),
            ..Default::default()
        };
        assert_eq!(classifier.classify(&snap), PageKind::AssessmentSkip);
    }

    #[test]
    fn test_submit_button_skips() {
        let classifier = create_test_classifier();
        let snap = PageSnapshot {
            section_title: "某节".to_string(),
            has_submit_button: true,
            ..Default::default()
        };
        assert_eq!(classifier.classify(&snap), PageKind::AssessmentSkip);
    }

    #[test]
    fn test_answer_list_skips() {
        let classifier = create_test_classifier();
        let snap = PageSnapshot {
            section_title: "某节".to_string(),
            has_answer_list: true,
            ..Default::default()
        };
        assert_eq!(classifier.classify(&snap), PageKind::AnswerListSkip);
    }

    #[test]
    fn test_blank_label_without_signals_still_skips() {
        let classifier = create_test_classifier();
        // 既定策略：标签为空按可跳过处理，而不是按未知等待
        let snap = PageSnapshot {
            section_title: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(classifier.classify(&snap), PageKind::AssessmentSkip);
    }

    #[test]
    fn test_unmatched_label_is_unknown() {
        let classifier = create_test_classifier();
        let snap = PageSnapshot {
            section_title: "某种新内容".to_string(),
            ..Default::default()
        };
        assert_eq!(classifier.classify(&snap), PageKind::Unknown);
    }
}
