//! # 组合层
//!
//! 这个 crate 负责把类型注册、定义读取、容器配置和日志初始化组合起来，
//! 构建一个完整的、可查询的应用上下文。
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use di_abstractions::ApplicationContext;
//! use ioc_composition::{ApplicationContextBuilder, LoggingConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let context = ApplicationContextBuilder::new()
//!         .with_logging(LoggingConfig::development())
//!         .add_definitions_file("config/beans.toml")
//!         .build()?;
//!
//!     println!("Bean: {:?}", context.bean_names());
//!     Ok(())
//! }
//! ```

pub mod builder;

// 重新导出主要类型
pub use builder::{ApplicationContextBuilder, LoggingConfig};

// 重新导出错误类型
pub use ioc_common::ContextError;
