//! 视频标识
//!
//! 以承载页面的 URL 路径 + 查询串作为视频的内容寻址键。
//! 只要站点的路由方案不变，同一个视频的键就稳定。

use std::fmt;

/// 完成缓存的键：URL 的路径 + 查询串（去掉协议、主机和片段）
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    /// 从页面 URL 推导视频标识
    pub fn from_url(url: &str) -> Self {
        // 先去掉片段
        let without_fragment = url.split('#').next().unwrap_or(url);

        // 再去掉协议和主机部分
        let path_and_query = match without_fragment.find("://") {
            Some(scheme_end) => {
                let rest = &without_fragment[scheme_end + 3..];
                match rest.find('/') {
                    Some(path_start) => &rest[path_start..],
                    None => "/",
                }
            }
            None => without_fragment,
        };

        Self(path_and_query.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_url_keeps_path_and_query() {
        let id = VideoId::from_url("https://www.xuetangx.com/learn/c1/v2?channel=list");
        assert_eq!(id.as_str(), "/learn/c1/v2?channel=list");
    }

    #[test]
    fn test_from_url_strips_fragment() {
        let id = VideoId::from_url("https://www.xuetangx.com/learn/c1/v2?x=1#section");
        assert_eq!(id.as_str(), "/learn/c1/v2?x=1");
    }

    #[test]
    fn test_from_url_without_path() {
        let id = VideoId::from_url("https://www.xuetangx.com");
        assert_eq!(id.as_str(), "/");
    }

    #[test]
    fn test_same_page_same_id() {
        let a = VideoId::from_url("https://www.xuetangx.com/learn/c1/v2?x=1#a");
        let b = VideoId::from_url("https://www.xuetangx.com/learn/c1/v2?x=1#b");
        assert_eq!(a, b);
    }
}
