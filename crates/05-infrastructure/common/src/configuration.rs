//! 容器配置模型

use crate::errors::{ConfigError, ConfigResult};
use crate::lifecycle::PostConstructPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 支持的日志级别
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// 容器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ContextConfig {
    /// 需要加载的 Bean 定义文件
    pub definitions: Vec<PathBuf>,
    /// 初始化回调的执行策略
    pub post_construct_policy: PostConstructPolicy,
    /// 日志设置
    pub logging: LoggingSettings,
}

impl ContextConfig {
    /// 创建默认配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加定义文件
    pub fn with_definition_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.definitions.push(path.into());
        self
    }

    /// 设置初始化回调策略
    pub fn with_post_construct_policy(mut self, policy: PostConstructPolicy) -> Self {
        self.post_construct_policy = policy;
        self
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        self.logging.validate()?;

        if let Some(path) = self
            .definitions
            .iter()
            .find(|path| path.as_os_str().is_empty())
        {
            return Err(ConfigError::ValidationError {
                message: format!("定义文件路径不能为空: {:?}", path),
            });
        }

        Ok(())
    }
}

/// 日志设置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// 日志级别
    pub level: String,
    /// 是否输出 JSON 格式
    pub json: bool,
}

impl LoggingSettings {
    /// 验证日志设置
    pub fn validate(&self) -> ConfigResult<()> {
        let level = self.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "无效的日志级别: {}, 可选值: {}",
                    self.level,
                    LOG_LEVELS.join(", ")
                ),
            });
        }
        Ok(())
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}
