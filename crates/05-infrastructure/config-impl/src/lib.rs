//! # Configuration Implementation
//!
//! Bean 定义读取和容器配置绑定的具体实现。
//!
//! ## 主要组件
//!
//! - [`FormatDefinitionReader`] - TOML / JSON / YAML 定义文件读取器
//! - [`FileDefinitionReader`] - 按扩展名选择格式的读取器
//! - [`CompositeDefinitionReader`] - 合并多个定义来源
//! - [`ContextConfigBinder`] - 容器配置绑定器

pub mod binder;
pub mod providers;

pub use binder::*;
pub use providers::*;
