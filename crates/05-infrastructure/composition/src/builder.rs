//! 应用上下文构建器

use config_impl::{CompositeDefinitionReader, ContextConfigBinder, FileDefinitionReader};
use di_abstractions::{BeanClass, BeanDefinitionReader, BeanType};
use di_impl::{BeanTypeRegistry, GenericApplicationContext};
use ioc_common::{
    BeanCreationError, BeanDefinitions, ConfigError, ConfigResult, ContextConfig, ContextError,
    ContextResult, LoggingSettings, PostConstructPolicy,
};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, error, info};

/// 应用上下文构建器
///
/// 使用建造者模式注册 Bean 类型和定义来源，`build` 时一次性完成启动
pub struct ApplicationContextBuilder {
    /// 类型注册表
    types: BeanTypeRegistry,
    /// 注册类型时遇到的第一个错误，在 build 时返回
    registration_error: Option<BeanCreationError>,
    /// 显式添加的定义来源
    readers: CompositeDefinitionReader,
    /// 容器配置
    config: Option<ContextConfig>,
    /// 容器配置文件
    config_file: Option<PathBuf>,
    /// 覆盖配置中的初始化回调策略
    policy: Option<PostConstructPolicy>,
    /// 是否启用日志初始化
    logging_enabled: bool,
    /// 日志配置
    logging_config: LoggingConfig,
}

impl ApplicationContextBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self {
            types: BeanTypeRegistry::new(),
            registration_error: None,
            readers: CompositeDefinitionReader::new(),
            config: None,
            config_file: None,
            policy: None,
            logging_enabled: false, // 默认不启用日志初始化
            logging_config: LoggingConfig::default(),
        }
    }

    /// 注册实现了 `BeanClass` 的类型
    pub fn register_type<T: BeanClass>(self) -> Self {
        self.register_bean_type(T::bean_type())
    }

    /// 注册能力表
    pub fn register_bean_type(mut self, bean_type: BeanType) -> Self {
        debug!("注册 Bean 类型: {}", bean_type.class_name());
        if let Err(e) = self.types.register(bean_type) {
            self.registration_error.get_or_insert(e);
        }
        self
    }

    /// 添加内存中的定义
    pub fn add_definitions(self, definitions: BeanDefinitions) -> Self {
        self.add_reader(definitions)
    }

    /// 添加定义文件，格式由扩展名决定
    pub fn add_definitions_file<P: AsRef<Path>>(self, path: P) -> Self {
        info!("添加 Bean 定义文件: {}", path.as_ref().display());
        self.add_reader(FileDefinitionReader::new(path))
    }

    /// 添加自定义定义读取器
    pub fn add_reader<R: BeanDefinitionReader + 'static>(mut self, reader: R) -> Self {
        debug!("添加定义读取器: {}", reader.source_description());
        self.readers.add_reader(Box::new(reader));
        self
    }

    /// 使用给定的容器配置
    pub fn with_config(mut self, config: ContextConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// 从配置文件和 `IOC_` 环境变量加载容器配置
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// 设置初始化回调策略，优先于配置
    pub fn with_post_construct_policy(mut self, policy: PostConstructPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// 配置日志
    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.logging_config = config;
        self.logging_enabled = true; // 启用日志初始化
        self
    }

    /// 构建并启动应用上下文
    pub fn build(self) -> ContextResult<GenericApplicationContext> {
        if self.logging_enabled {
            self.logging_config.initialize();
        }
        info!("开始构建应用上下文");

        if let Some(e) = self.registration_error {
            error!("Bean 类型注册失败: {}", e);
            return Err(e.into());
        }

        let config = match (self.config, &self.config_file) {
            (Some(config), _) => {
                config.validate()?;
                config
            }
            (None, Some(path)) => ContextConfigBinder::new().with_file(path).load()?,
            (None, None) => ContextConfig::default(),
        };

        let mut readers = self.readers;
        for path in &config.definitions {
            info!("添加配置中的 Bean 定义文件: {}", path.display());
            readers.add_reader(Box::new(FileDefinitionReader::new(path)));
        }

        if readers.is_empty() {
            return Err(ContextError::BootstrapFailed {
                message: "没有任何 Bean 定义来源".to_string(),
            });
        }

        let definitions = readers.read_definitions()?;
        let policy = self.policy.unwrap_or(config.post_construct_policy);
        let context = GenericApplicationContext::with_policy(self.types, definitions, policy)?;

        info!("应用上下文构建完成");
        Ok(context)
    }
}

impl Default for ApplicationContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// 日志配置
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: tracing::Level,
    /// 是否显示目标
    pub show_target: bool,
    /// 是否显示线程ID
    pub show_thread_ids: bool,
    /// 是否显示文件名
    pub show_file: bool,
    /// 是否显示行号
    pub show_line_number: bool,
    /// 是否使用 JSON 格式
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: tracing::Level::INFO,
            show_target: true,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// 创建开发环境日志配置
    pub fn development() -> Self {
        Self {
            level: tracing::Level::DEBUG,
            show_target: true,
            show_thread_ids: true,
            show_file: true,
            show_line_number: true,
            json_format: false,
        }
    }

    /// 创建生产环境日志配置
    pub fn production() -> Self {
        Self {
            level: tracing::Level::INFO,
            show_target: false,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: true,
        }
    }

    /// 从容器配置中的日志设置创建
    pub fn from_settings(settings: &LoggingSettings) -> ConfigResult<Self> {
        let level = tracing::Level::from_str(&settings.level).map_err(|_| {
            ConfigError::ValidationError {
                message: format!("无效的日志级别: {}", settings.level),
            }
        })?;
        Ok(Self {
            level,
            json_format: settings.json,
            ..Self::default()
        })
    }

    /// 初始化全局日志订阅器
    ///
    /// `RUST_LOG` 优先于配置的级别；已经初始化过时不做任何事
    pub fn initialize(&self) {
        let default_level = self.level.to_string().to_lowercase();
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(self.show_target)
            .with_thread_ids(self.show_thread_ids)
            .with_file(self.show_file)
            .with_line_number(self.show_line_number);

        let result = if self.json_format {
            subscriber.json().try_init()
        } else {
            subscriber.try_init()
        };

        match result {
            Ok(()) => info!("日志系统初始化完成"),
            Err(e) => debug!("日志系统已初始化，跳过: {}", e),
        }
    }
}
