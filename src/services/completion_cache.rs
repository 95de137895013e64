//! 视频完成缓存 - 业务能力层
//!
//! 以 VideoId 为键的持久化布尔表，存为一个 JSON 文件。
//! 约束：
//! - 标记为完成的条目永不被本程序重置（清空历史 = 手动删文件）
//! - 读失败按"无缓存"处理，写失败记录日志后丢弃，都不致命

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::models::VideoId;

/// 视频完成缓存
pub struct CompletionCache {
    path: PathBuf,
    entries: HashMap<String, bool>,
}

impl CompletionCache {
    /// 从磁盘加载缓存，文件缺失或损坏时从空表开始
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match Self::read_entries(&path) {
            Ok(entries) => {
                debug!("已加载 {} 条视频完成记录", entries.len());
                entries
            }
            Err(e) => {
                if path.exists() {
                    warn!("{}，按空缓存处理", e);
                } else {
                    debug!("缓存文件 {} 不存在，从空缓存开始", path.display());
                }
                HashMap::new()
            }
        };
        Self { path, entries }
    }

    /// 查询某视频是否已完成
    pub fn is_complete(&self, id: &VideoId) -> bool {
        self.entries.get(id.as_str()).copied().unwrap_or(false)
    }

    /// 标记某视频已完成并落盘
    ///
    /// 只写入 `true`，没有任何撤销路径；写盘失败只告警
    pub fn mark_complete(&mut self, id: &VideoId) {
        self.entries.insert(id.as_str().to_string(), true);
        if let Err(e) = self.persist() {
            warn!("{}，本次完成记录仅保留在内存中", e);
        }
    }

    /// 已记录条目数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn read_entries(path: &Path) -> AppResult<HashMap<String, bool>> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::cache_read_failed(path.display().to_string(), e))?;
        let entries: HashMap<String, bool> = serde_json::from_str(&content)
            .map_err(|e| AppError::cache_parse_failed(path.display().to_string(), e))?;
        Ok(entries)
    }

    fn persist(&self) -> AppResult<()> {
        let content = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, content)
            .map_err(|e| AppError::cache_write_failed(self.path.display().to_string(), e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_cache_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("completion_cache_test_{}.json", name))
    }

    #[test]
    fn test_mark_then_query() {
        let path = temp_cache_path("mark");
        let _ = std::fs::remove_file(&path);

        let mut cache = CompletionCache::load(&path);
        let id = VideoId::from_url("https://www.xuetangx.com/learn/c1/v1?x=1");
        assert!(!cache.is_complete(&id));

        cache.mark_complete(&id);
        assert!(cache.is_complete(&id));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_round_trip_across_reload() {
        let path = temp_cache_path("reload");
        let _ = std::fs::remove_file(&path);

        let id = VideoId::from_url("https://www.xuetangx.com/learn/c1/v2?x=2");
        {
            let mut cache = CompletionCache::load(&path);
            cache.mark_complete(&id);
        }

        // 模拟重启：重新从序列化形式加载
        let cache = CompletionCache::load(&path);
        assert!(cache.is_complete(&id));
        assert_eq!(cache.len(), 1);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_treated_as_empty() {
        let path = temp_cache_path("corrupt");
        std::fs::write(&path, "{ not valid json").unwrap();

        let cache = CompletionCache::load(&path);
        assert!(cache.is_empty());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_repeated_mark_stays_complete() {
        let path = temp_cache_path("repeat");
        let _ = std::fs::remove_file(&path);

        let mut cache = CompletionCache::load(&path);
        let id = VideoId::from_url("https://www.xuetangx.com/learn/c1/v3");
        cache.mark_complete(&id);
        cache.mark_complete(&id);
        assert!(cache.is_complete(&id));
        assert_eq!(cache.len(), 1);

        let _ = std::fs::remove_file(&path);
    }
}
