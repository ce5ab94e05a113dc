//! 错误类型定义

use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("配置验证失败: {message}")]
    ValidationError { message: String },
}

/// Bean 定义读取错误类型
#[derive(Error, Debug)]
pub enum DefinitionReadError {
    #[error("定义文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("定义文件读取失败: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("定义文件解析失败: {path}, 原因: {source}")]
    Parse {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("不支持的定义文件格式: {path}")]
    UnsupportedFormat { path: String },

    #[error("Bean 定义键重复: {key}")]
    DuplicateKey { key: String },

    #[error("Bean 定义无效: {key}, 原因: {message}")]
    InvalidDefinition { key: String, message: String },
}

/// Bean 创建错误类型
///
/// 启动过程中的所有错误都是致命的，会中止整个容器的构建
#[derive(Error, Debug)]
pub enum BeanCreationError {
    #[error("Bean 实例化失败: {key}, 未知类型 {class_name}")]
    Instantiation { key: String, class_name: String },

    #[error("Bean 类型已注册: {class_name}")]
    DuplicateBeanType { class_name: String },

    #[error("属性不存在: Bean {key} 的类型 {class_name} 没有单参数设置器 {setter} (属性 {property})")]
    NoSuchProperty {
        key: String,
        class_name: String,
        property: String,
        setter: String,
    },

    #[error("引用未解析: Bean {key} 的属性 {property} 引用了不存在的 Bean {reference}")]
    UnresolvedReference {
        key: String,
        property: String,
        reference: String,
    },

    #[error("字面量无效: Bean {key} 的属性 {property} 无法接受值 {value:?}, 原因: {reason}")]
    InvalidLiteral {
        key: String,
        property: String,
        value: String,
        reason: String,
    },

    #[error("属性类型不匹配: Bean {key} 的属性 {property} 期望 {expected}")]
    PropertyKindMismatch {
        key: String,
        property: String,
        expected: String,
    },

    #[error("引用类型不匹配: Bean {key} 的属性 {property} 期望 {expected}, 但 Bean {reference} 的类型是 {actual}")]
    ReferenceTypeMismatch {
        key: String,
        property: String,
        reference: String,
        expected: String,
        actual: String,
    },

    #[error("Bean 实例类型不匹配: {key}, 期望 {expected}, 实际 {actual}")]
    BeanTypeMismatch {
        key: String,
        expected: String,
        actual: String,
    },

    #[error("Bean 工厂后置处理失败: {processor}, 原因: {message}")]
    FactoryPostProcessing { processor: String, message: String },

    #[error("Bean 后置处理失败: {key}, 处理器 {processor}, 原因: {message}")]
    PostProcessing {
        key: String,
        processor: String,
        message: String,
    },
}

impl BeanCreationError {
    /// 创建工厂后置处理错误
    pub fn factory_post_processing(
        processor: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::FactoryPostProcessing {
            processor: processor.into(),
            message: message.into(),
        }
    }

    /// 创建 Bean 后置处理错误
    pub fn post_processing(
        key: impl Into<String>,
        processor: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::PostProcessing {
            key: key.into(),
            processor: processor.into(),
            message: message.into(),
        }
    }
}

/// Bean 查询错误类型
///
/// 查询错误只影响单次调用，不会破坏容器状态
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BeanQueryError {
    #[error("Bean 不存在: {key}")]
    NoSuchKey { key: String },

    #[error("类型 {type_name} 的 Bean 不唯一: {candidates:?}")]
    NoUniqueBeanOfType {
        type_name: String,
        candidates: Vec<String>,
    },

    #[error("Bean 类型不匹配: {key}, 期望 {expected}, 实际 {actual}")]
    TypeMismatch {
        key: String,
        expected: String,
        actual: String,
    },
}

/// 容器错误类型
#[derive(Error, Debug)]
pub enum ContextError {
    #[error("配置错误: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("定义读取错误: {source}")]
    Definition {
        #[from]
        source: DefinitionReadError,
    },

    #[error("Bean 创建错误: {source}")]
    Creation {
        #[from]
        source: BeanCreationError,
    },

    #[error("容器启动失败: {message}")]
    BootstrapFailed { message: String },
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type DefinitionResult<T> = Result<T, DefinitionReadError>;
pub type BeanCreationResult<T> = Result<T, BeanCreationError>;
pub type BeanQueryResult<T> = Result<T, BeanQueryError>;
pub type ContextResult<T> = Result<T, ContextError>;
