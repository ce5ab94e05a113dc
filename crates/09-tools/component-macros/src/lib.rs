//! # Bean Macros
//!
//! 这个 crate 提供 `#[derive(Bean)]`，在编译期为结构体生成类型能力表
//! （构造函数、属性设置器、初始化回调、可赋值类型）。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use bean_macros::Bean;
//! use di_abstractions::Shared;
//!
//! pub trait MailSender: Send + Sync {
//!     fn protocol(&self) -> &str;
//! }
//!
//! #[derive(Debug, Default, Bean)]
//! #[bean(class = "com.study.entity.MailService", post_construct = "init")]
//! #[bean(provides(dyn MailSender))]
//! pub struct MailService {
//!     #[bean(value)]
//!     port: i32,
//!     #[bean(value)]
//!     protocol: String,
//! }
//!
//! #[derive(Default, Bean)]
//! #[bean(class = "com.study.service.impl.DefaultUserService")]
//! pub struct UserService {
//!     #[bean(reference)]
//!     mail_service: Option<Shared<dyn MailSender>>,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod bean;
mod utils;

/// 派生 `BeanClass`
///
/// # 结构体参数
///
/// - `class = "..."` - 类型名称，缺省为结构体名
/// - `constructor = "path"` - 构造函数，缺省使用 `Default::default`
/// - `post_construct = "method"` - 初始化回调，可重复，按声明顺序执行
/// - `provides(dyn A, dyn B)` - 可赋值的 trait 对象类型
/// - `factory_post_processor` / `bean_post_processor` - 扩展能力标记
///
/// # 字段参数
///
/// - `value` - 字面量属性，字段类型需实现 `Literal`
/// - `reference` - 引用属性，字段类型为 `Shared<T>` 或 `Option<Shared<T>>`
/// - `name = "..."` - 属性名，缺省为字段名的驼峰形式
#[proc_macro_derive(Bean, attributes(bean))]
pub fn derive_bean(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    bean::derive_bean_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
