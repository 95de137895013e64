//! 站点配置加载
//!
//! `site_profile.toml` 是可选的：文件不存在时用内置默认值，
//! 文件损坏时记录警告后同样退回默认值，绝不让配置问题挡住刷课。

use std::path::Path;

use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::models::profile::SiteProfile;

/// 从 TOML 文件加载站点配置，失败时退回默认值
pub fn load_site_profile(path: &str) -> SiteProfile {
    if !Path::new(path).exists() {
        info!("未找到站点配置文件 {}，使用内置默认值", path);
        return SiteProfile::default();
    }

    match read_profile(path) {
        Ok(profile) => {
            info!("✓ 已加载站点配置: {}", path);
            profile
        }
        Err(e) => {
            warn!("{}，退回内置默认值", e);
            SiteProfile::default()
        }
    }
}

/// 读取并解析站点配置文件
fn read_profile(path: &str) -> AppResult<SiteProfile> {
    let content =
        std::fs::read_to_string(path).map_err(|e| AppError::profile_read_failed(path, e))?;
    let profile: SiteProfile =
        toml::from_str(&content).map_err(|e| AppError::profile_parse_failed(path, e))?;
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let profile = load_site_profile("/nonexistent/site_profile.toml");
        assert_eq!(profile.section_title_selector, ".t1");
        assert_eq!(profile.attachment_done_text, "我已看完");
    }

    #[test]
    fn test_partial_toml_keeps_defaults_for_missing_fields() {
        let dir = std::env::temp_dir();
        let path = dir.join("profile_loader_test_partial.toml");
        std::fs::write(&path, "section_title_selector = \".title\"\n").unwrap();

        let profile = read_profile(path.to_str().unwrap()).unwrap();
        assert_eq!(profile.section_title_selector, ".title");
        // 未覆盖的字段保持默认
        assert_eq!(profile.next_button_selector, ".next");
        assert!(profile.homework_keywords.contains(&"作业".to_string()));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_toml_falls_back_to_default() {
        let dir = std::env::temp_dir();
        let path = dir.join("profile_loader_test_corrupt.toml");
        std::fs::write(&path, "this is not = [ valid toml").unwrap();

        let profile = load_site_profile(path.to_str().unwrap());
        assert_eq!(profile.section_title_selector, ".t1");

        let _ = std::fs::remove_file(&path);
    }
}
