/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 浏览器调试端口（附加到已登录的浏览器实例）
    pub browser_debug_port: u16,
    /// 是否自行启动无头浏览器（否则附加到调试端口）
    pub launch_headless: bool,
    /// 无头模式下使用的浏览器可执行文件路径
    pub chrome_executable: Option<String>,
    /// 课程页面 URL
    pub target_url: String,
    /// 轮询间隔（毫秒）
    pub poll_interval_ms: u64,
    /// 启动后首次轮询前的等待时间（毫秒）
    pub startup_delay_ms: u64,
    /// 两次跳转之间的冷却时间（秒）
    pub advance_cooldown_secs: u64,
    /// 等待平台确认完成的时间上限（秒）
    pub confirm_ceiling_secs: u64,
    /// 平台确认检查间隔（毫秒）
    pub confirm_interval_ms: u64,
    /// 目标播放倍速
    pub playback_rate: f64,
    /// 判定播放到结尾的容差（秒）
    pub end_epsilon: f64,
    /// 视频完成缓存文件
    pub completion_cache_file: String,
    /// 站点配置（选择器/关键词）TOML 文件，可选
    pub profile_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    // --- 防超时脚本配置 ---
    /// 防超时页面 URL
    pub keepalive_target_url: String,
    /// 模拟用户活动的间隔（秒）
    pub keepalive_activity_secs: u64,
    /// 检查视频是否暂停的间隔（秒）
    pub keepalive_play_check_secs: u64,
    /// 自动刷新页面的间隔（秒）
    pub keepalive_refresh_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser_debug_port: 2001,
            launch_headless: false,
            chrome_executable: None,
            target_url: "https://www.xuetangx.com/".to_string(),
            poll_interval_ms: 2000,
            startup_delay_ms: 3000,
            advance_cooldown_secs: 10,
            confirm_ceiling_secs: 10,
            confirm_interval_ms: 1000,
            playback_rate: 2.0,
            end_epsilon: 0.5,
            completion_cache_file: "watched_videos.json".to_string(),
            profile_file: "site_profile.toml".to_string(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            keepalive_target_url: "https://labsafetest.uestc.edu.cn/redir.php".to_string(),
            keepalive_activity_secs: 30,
            keepalive_play_check_secs: 10,
            keepalive_refresh_secs: 120,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            browser_debug_port: std::env::var("BROWSER_DEBUG_PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.browser_debug_port),
            launch_headless: std::env::var("LAUNCH_HEADLESS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.launch_headless),
            chrome_executable: std::env::var("CHROME_EXECUTABLE").ok(),
            target_url: std::env::var("TARGET_URL").unwrap_or(default.target_url),
            poll_interval_ms: std::env::var("POLL_INTERVAL_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.poll_interval_ms),
            startup_delay_ms: std::env::var("STARTUP_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.startup_delay_ms),
            advance_cooldown_secs: std::env::var("ADVANCE_COOLDOWN_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.advance_cooldown_secs),
            confirm_ceiling_secs: std::env::var("CONFIRM_CEILING_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.confirm_ceiling_secs),
            confirm_interval_ms: std::env::var("CONFIRM_INTERVAL_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.confirm_interval_ms),
            playback_rate: std::env::var("PLAYBACK_RATE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.playback_rate),
            end_epsilon: std::env::var("END_EPSILON").ok().and_then(|v| v.parse().ok()).unwrap_or(default.end_epsilon),
            completion_cache_file: std::env::var("COMPLETION_CACHE_FILE").unwrap_or(default.completion_cache_file),
            profile_file: std::env::var("SITE_PROFILE_FILE").unwrap_or(default.profile_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            keepalive_target_url: std::env::var("KEEPALIVE_TARGET_URL").unwrap_or(default.keepalive_target_url),
            keepalive_activity_secs: std::env::var("KEEPALIVE_ACTIVITY_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.keepalive_activity_secs),
            keepalive_play_check_secs: std::env::var("KEEPALIVE_PLAY_CHECK_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.keepalive_play_check_secs),
            keepalive_refresh_secs: std::env::var("KEEPALIVE_REFRESH_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.keepalive_refresh_secs),
        }
    }
}
