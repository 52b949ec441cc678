//! 日志初始化
//!
//! 库本身只通过 tracing 产生事件，是否安装订阅者由宿主决定

use tracing::Level;

use crate::plugin::PluginError;

/// 日志配置
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    pub ansi: bool,
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            ansi: true,
            with_target: false,
        }
    }
}

impl LogConfig {
    /// 从级别名称解析，如 "debug"
    pub fn with_level_name(mut self, name: &str) -> Result<Self, PluginError> {
        self.level = name
            .parse()
            .map_err(|_| PluginError::ConfigError(format!("无效的日志级别: {name}")))?;
        Ok(self)
    }
}

/// 安装全局 fmt 订阅者，重复安装返回错误
pub fn init_logging(config: &LogConfig) -> Result<(), PluginError> {
    tracing_subscriber::fmt()
        .with_max_level(config.level)
        .with_ansi(config.ansi)
        .with_target(config.with_target)
        .try_init()
        .map_err(|e| PluginError::ConfigError(format!("日志初始化失败: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_name_parsing() {
        let config = LogConfig::default().with_level_name("debug").unwrap();
        assert_eq!(config.level, Level::DEBUG);

        let err = LogConfig::default().with_level_name("loud").unwrap_err();
        assert_eq!(err.error_type(), "config_error");
    }

    #[test]
    fn test_second_init_fails() {
        let config = LogConfig {
            ansi: false,
            ..LogConfig::default()
        };
        // 同一进程只能安装一次全局订阅者
        let _ = init_logging(&config);
        assert!(init_logging(&config).is_err());
    }
}
