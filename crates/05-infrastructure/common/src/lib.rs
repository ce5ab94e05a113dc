//! # IoC Common
//!
//! 这个 crate 提供了 Bean 装配容器的公共模型和工具。
//!
//! ## 核心类型
//!
//! - [`BeanDefinition`] / [`BeanDefinitions`] - 声明式的 Bean 定义
//! - [`BeanValue`] / [`Bean`] - 容器中存活的 Bean 实例
//! - [`NamingConventions`] - 属性与设置器的命名约定
//! - [`LifecycleState`] / [`PostConstructPolicy`] - Bean 初始化状态机
//! - [`ContextConfig`] - 容器配置
//!
//! ## 设计原则
//!
//! - 基于 Rust 类型系统的编译时能力表，不依赖运行时反射
//! - 同步、单线程的启动过程，启动完成后只读共享
//! - 每个阶段一个显式的 `Result` 错误通道

pub mod bean;
pub mod configuration;
pub mod conventions;
pub mod definition;
pub mod errors;
pub mod lifecycle;
pub mod metadata;

pub use bean::*;
pub use configuration::*;
pub use conventions::*;
pub use definition::*;
pub use errors::*;
pub use lifecycle::*;
pub use metadata::*;
