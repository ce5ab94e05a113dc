//! 应用上下文抽象接口
//!
//! 启动完成后的只读查询接口，所有方法都没有副作用

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use ioc_common::{BeanDefinition, BeanQueryResult, BeanValue, LifecycleState, Shared};

/// 应用上下文 trait
pub trait ApplicationContext: Send + Sync {
    /// 按注册键获取 Bean
    fn get_bean(&self, key: &str) -> BeanQueryResult<BeanValue>;

    /// 获取唯一一个可赋值给 `T` 的 Bean
    ///
    /// 没有匹配时返回 `Ok(None)`，匹配多于一个时返回 `NoUniqueBeanOfType`
    fn get_bean_of_type<T>(&self) -> BeanQueryResult<Option<Shared<T>>>
    where
        T: ?Sized + Send + Sync + 'static;

    /// 按注册键获取 Bean 并转换为 `T`
    fn get_bean_typed<T>(&self, key: &str) -> BeanQueryResult<Shared<T>>
    where
        T: ?Sized + Send + Sync + 'static;

    /// 获取所有可赋值给 `T` 的 Bean，按注册顺序
    fn get_beans_of_type<T>(&self) -> IndexMap<String, Shared<T>>
    where
        T: ?Sized + Send + Sync + 'static;

    /// 所有 Bean 的注册键，按注册顺序
    fn bean_names(&self) -> Vec<String>;

    /// 是否包含指定键的 Bean
    fn contains_bean(&self, key: &str) -> bool {
        self.get_bean(key).is_ok()
    }

    /// Bean 数量
    fn bean_count(&self) -> usize {
        self.bean_names().len()
    }

    /// Bean 的生命周期状态
    fn lifecycle_state(&self, key: &str) -> Option<LifecycleState>;

    /// 经过工厂后置处理器修改后的最终定义
    fn bean_definition(&self, key: &str) -> Option<&BeanDefinition>;

    /// 上下文标识
    fn id(&self) -> &str;

    /// 启动完成时间
    fn startup_date(&self) -> DateTime<Utc>;
}
