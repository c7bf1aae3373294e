//! Chat configuration fixed at process start.

use std::time::Duration;

use crate::domain::RetentionPolicy;

pub const DEFAULT_ACCESS_CODE: &str = "noel2025";
pub const DEFAULT_MAX_USERS: usize = 2;
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(5);
/// 5 MiB of base64 characters
pub const DEFAULT_MAX_IMAGE_CHARS: usize = 5 * 1024 * 1024;

/// Admission and retention settings for the chat room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Shared code every client must present
    pub access_code: String,
    /// Maximum number of concurrent sessions
    pub max_users: usize,
    /// Time-to-live per message kind
    pub retention: RetentionPolicy,
    /// Period of the background sweep
    pub sweep_interval: Duration,
    /// Upper bound on the base64 image payload, in characters
    pub max_image_chars: usize,
    /// Optional count cap on stored history
    pub history_limit: Option<usize>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            access_code: DEFAULT_ACCESS_CODE.to_string(),
            max_users: DEFAULT_MAX_USERS,
            retention: RetentionPolicy::default(),
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            max_image_chars: DEFAULT_MAX_IMAGE_CHARS,
            history_limit: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // テスト項目: デフォルト設定が 2 人・10 分 / 1 分・5 秒・5 MiB になっている
        // given (前提条件):

        // when (操作):
        let config = ChatConfig::default();

        // then (期待する結果):
        assert_eq!(config.access_code, "noel2025");
        assert_eq!(config.max_users, 2);
        assert_eq!(config.retention.text_ttl, Duration::from_secs(600));
        assert_eq!(config.retention.image_ttl, Duration::from_secs(60));
        assert_eq!(config.sweep_interval, Duration::from_secs(5));
        assert_eq!(config.max_image_chars, 5_242_880);
        assert_eq!(config.history_limit, None);
    }
}
