//! Bean 注册表
//!
//! 注册键到 Bean 的有序映射，按插入顺序迭代

use crate::type_registry::BeanTypeRegistry;
use indexmap::IndexMap;
use ioc_common::{Bean, BeanQueryError, BeanQueryResult, BeanValue, Shared, TypeInfo};
use std::any::TypeId;

/// Bean 注册表
#[derive(Debug, Clone, Default)]
pub struct BeanRegistry {
    beans: IndexMap<String, Bean>,
}

impl BeanRegistry {
    /// 创建空的注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册 Bean，返回被替换的旧 Bean
    pub fn insert(&mut self, key: impl Into<String>, bean: Bean) -> Option<Bean> {
        self.beans.insert(key.into(), bean)
    }

    /// 按键获取 Bean
    pub fn get(&self, key: &str) -> Option<&Bean> {
        self.beans.get(key)
    }

    /// 按键获取可变 Bean
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Bean> {
        self.beans.get_mut(key)
    }

    /// 是否包含指定键
    pub fn contains_key(&self, key: &str) -> bool {
        self.beans.contains_key(key)
    }

    /// 所有注册键
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.beans.keys()
    }

    /// 按插入顺序迭代
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Bean)> {
        self.beans.iter()
    }

    /// Bean 数量
    pub fn len(&self) -> usize {
        self.beans.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.beans.is_empty()
    }

    /// 按键获取 Bean 值
    pub fn get_value(&self, key: &str) -> BeanQueryResult<BeanValue> {
        self.beans
            .get(key)
            .map(|bean| bean.value().clone())
            .ok_or_else(|| BeanQueryError::NoSuchKey {
                key: key.to_string(),
            })
    }

    /// 按键获取 Bean 并转换为 `T`
    pub fn get_typed<T>(&self, types: &BeanTypeRegistry, key: &str) -> BeanQueryResult<Shared<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let value = self.get_value(key)?;
        types
            .cast::<T>(&value)
            .ok_or_else(|| BeanQueryError::TypeMismatch {
                key: key.to_string(),
                expected: std::any::type_name::<T>().to_string(),
                actual: value.type_name().to_string(),
            })
    }

    /// 所有可赋值给 `T` 的 Bean，按插入顺序
    pub fn get_all_of_type<T>(&self, types: &BeanTypeRegistry) -> IndexMap<String, Shared<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.beans
            .iter()
            .filter_map(|(key, bean)| {
                types
                    .cast::<T>(bean.value())
                    .map(|shared| (key.clone(), shared))
            })
            .collect()
    }

    /// 唯一一个可赋值给 `T` 的 Bean
    pub fn get_unique_of_type<T>(&self, types: &BeanTypeRegistry) -> BeanQueryResult<Option<Shared<T>>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let mut matches = self.get_all_of_type::<T>(types);
        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.pop().map(|(_, shared)| shared)),
            _ => Err(BeanQueryError::NoUniqueBeanOfType {
                type_name: TypeInfo::of::<T>().short_name().to_string(),
                candidates: matches.into_keys().collect(),
            }),
        }
    }

    /// 可赋值给目标类型的注册键
    pub fn keys_assignable_to(&self, types: &BeanTypeRegistry, target: TypeId) -> Vec<String> {
        self.beans
            .iter()
            .filter(|(_, bean)| types.is_assignable(bean.value(), target))
            .map(|(key, _)| key.clone())
            .collect()
    }
}
