use std::time::Duration;

/// 默认进度通知间隔（毫秒）
pub const DEFAULT_UPDATE_INTERVAL_MS: u64 = 1000;

/// 默认 User-Agent
pub const DEFAULT_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// 本次下载的配置。
#[derive(Debug, Clone)]
pub struct DownloadConfig {
    /// 进度通知的固定节拍，必须大于 0
    pub update_interval: Duration,
    /// 是否只允许 https 源
    pub https_only: bool,
    pub user_agent: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            update_interval: Duration::from_millis(DEFAULT_UPDATE_INTERVAL_MS),
            https_only: true,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
