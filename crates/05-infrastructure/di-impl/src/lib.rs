//! # 依赖注入具体实现
//!
//! 基于 Bean 定义的装配引擎：类型注册表、Bean 注册表、扩展管道、
//! 构造阶段、依赖注入、生命周期编排，以及把这些阶段串起来的
//! [`GenericApplicationContext`]

pub mod construction;
pub mod context;
pub mod extensions;
pub mod injection;
pub mod lifecycle;
pub mod registry;
pub mod type_registry;

#[cfg(test)]
mod test_support;

pub use context::GenericApplicationContext;
pub use extensions::{ExtensionPipeline, FactoryPostProcessorEntry};
pub use lifecycle::LifecycleOrchestrator;
pub use registry::BeanRegistry;
pub use type_registry::BeanTypeRegistry;
