//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义 Bean 类型能力表和容器扩展点的核心接口。
//!
//! ## 核心接口
//!
//! - [`BeanType`] / [`BeanTypeBuilder`] - 类型能力表：构造函数、设置器、初始化回调、可赋值类型
//! - [`BeanClass`] - 可由容器构建的类型，通常由 `#[derive(Bean)]` 实现
//! - [`BeanFactoryPostProcessor`] - 工厂后置处理器接口
//! - [`BeanPostProcessor`] - Bean 后置处理器接口
//! - [`ApplicationContext`] - 启动完成后的查询接口
//! - [`BeanDefinitionReader`] - Bean 定义读取接口

pub mod bean_type;
pub mod context;
pub mod processor;
pub mod reader;

pub use bean_type::*;
pub use context::*;
pub use processor::*;
pub use reader::*;

// 派生宏生成的代码通过本 crate 引用公共类型
pub use ioc_common::{
    Bean, BeanCreationError, BeanCreationResult, BeanDefinition, BeanDefinitions, BeanQueryError,
    BeanQueryResult, BeanValue, LifecycleState, Shared, TypeInfo,
};
