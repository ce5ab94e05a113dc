//! 容器配置绑定器实现
//!
//! 使用 `config` crate 从可选的配置文件和 `IOC_` 前缀的环境变量加载 [`ContextConfig`]。
//! 嵌套键用 `__` 分隔，例如 `IOC_LOGGING__LEVEL=debug`；
//! `IOC_DEFINITIONS` 可以用逗号分隔多个定义文件

use ioc_common::{ConfigError, ConfigResult, ContextConfig};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// 默认环境变量前缀
pub const DEFAULT_ENV_PREFIX: &str = "IOC";

/// 容器配置绑定器
#[derive(Debug, Clone)]
pub struct ContextConfigBinder {
    file: Option<PathBuf>,
    file_required: bool,
    env_prefix: String,
    environment: Option<HashMap<String, String>>,
}

impl ContextConfigBinder {
    /// 创建只读取环境变量的绑定器
    pub fn new() -> Self {
        Self {
            file: None,
            file_required: false,
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
            environment: None,
        }
    }

    /// 添加必须存在的配置文件
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self.file_required = true;
        self
    }

    /// 添加可选的配置文件
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self.file_required = false;
        self
    }

    /// 设置环境变量前缀
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// 使用给定的变量代替进程环境变量
    pub fn with_environment(mut self, variables: HashMap<String, String>) -> Self {
        self.environment = Some(variables);
        self
    }

    /// 加载并验证配置
    pub fn load(&self) -> ConfigResult<ContextConfig> {
        let mut builder = config::Config::builder();

        if let Some(file) = &self.file {
            if self.file_required && !file.exists() {
                error!("配置文件不存在: {}", file.display());
                return Err(ConfigError::FileNotFound {
                    path: file.display().to_string(),
                });
            }
            debug!("加载配置文件: {}", file.display());
            builder = builder.add_source(
                config::File::from(file.as_path()).required(self.file_required),
            );
        }

        builder = builder.add_source(
            config::Environment::with_prefix(&self.env_prefix)
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("definitions")
                .try_parsing(true)
                .source(self.environment.clone()),
        );

        let settings = builder.build().map_err(|e| {
            error!("配置构建失败: {}", e);
            ConfigError::ParseError {
                source: Box::new(e),
            }
        })?;

        let config: ContextConfig = settings.try_deserialize().map_err(|e| {
            error!("配置绑定失败: {}", e);
            ConfigError::ParseError {
                source: Box::new(e),
            }
        })?;

        config.validate()?;
        debug!("容器配置加载完成: {:?}", config);
        Ok(config)
    }
}

impl Default for ContextConfigBinder {
    fn default() -> Self {
        Self::new()
    }
}
