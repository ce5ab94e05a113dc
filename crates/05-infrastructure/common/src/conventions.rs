//! 约定规范定义
//!
//! 提供属性名、设置器名和类型名称之间的命名约定

/// 命名约定规范
///
/// 属性 `port` 对应的设置器按约定命名为 `setPort`
#[derive(Debug)]
pub struct NamingConventions;

impl NamingConventions {
    /// 设置器名称前缀
    pub const SETTER_PREFIX: &'static str = "set";

    /// 获取属性对应的设置器名称
    pub fn setter_name(property: &str) -> String {
        let mut chars = property.chars();
        match chars.next() {
            Some(first) => format!(
                "{}{}{}",
                Self::SETTER_PREFIX,
                first.to_uppercase(),
                chars.as_str()
            ),
            None => Self::SETTER_PREFIX.to_string(),
        }
    }

    /// 从设置器名称还原属性名称
    pub fn property_name(setter: &str) -> Option<String> {
        let rest = setter.strip_prefix(Self::SETTER_PREFIX)?;
        let mut chars = rest.chars();
        let first = chars.next()?;
        if !first.is_uppercase() {
            return None;
        }
        Some(format!("{}{}", first.to_lowercase(), chars.as_str()))
    }

    /// 将蛇形命名转换为小驼峰命名
    pub fn to_camel_case(s: &str) -> String {
        let mut result = String::with_capacity(s.len());
        let mut capitalize_next = false;

        for ch in s.chars() {
            if ch == '_' {
                capitalize_next = !result.is_empty();
            } else if capitalize_next {
                result.extend(ch.to_uppercase());
                capitalize_next = false;
            } else {
                result.push(ch);
            }
        }

        result
    }

    /// 检查属性名称是否有效
    ///
    /// 属性名称必须以字母或下划线开头，只包含字母、数字和下划线
    pub fn is_valid_property_name(property: &str) -> bool {
        let mut chars = property.chars();
        match chars.next() {
            Some(first) if first.is_alphabetic() || first == '_' => {
                chars.all(|ch| ch.is_alphanumeric() || ch == '_')
            }
            _ => false,
        }
    }
}

/// 类型名称约定规范
#[derive(Debug)]
pub struct ClassNameConventions;

impl ClassNameConventions {
    /// 获取不带包路径的类型名称
    ///
    /// 同时支持 `com.study.MailService` 和 `crate::MailService` 两种写法
    pub fn simple_name(class_name: &str) -> &str {
        let after_dot = class_name.rsplit('.').next().unwrap_or(class_name);
        after_dot.rsplit("::").next().unwrap_or(after_dot)
    }

    /// 检查类型名称是否有效
    pub fn is_valid_class_name(class_name: &str) -> bool {
        let trimmed = class_name.trim();
        !trimmed.is_empty()
            && trimmed.len() == class_name.len()
            && !class_name.starts_with('.')
            && !class_name.ends_with('.')
    }
}
