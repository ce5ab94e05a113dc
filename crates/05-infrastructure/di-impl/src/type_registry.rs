//! Bean 类型注册表
//!
//! 按类型名称和 `TypeId` 索引能力表

use di_abstractions::{BeanClass, BeanType};
use indexmap::IndexMap;
use ioc_common::{BeanCreationError, BeanCreationResult, BeanValue, ErasedCast, Shared};
use std::any::TypeId;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Bean 类型注册表
#[derive(Debug, Clone, Default)]
pub struct BeanTypeRegistry {
    by_class: IndexMap<String, BeanType>,
    by_type: HashMap<TypeId, String>,
}

impl BeanTypeRegistry {
    /// 创建空的类型注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册能力表
    ///
    /// 同一类型名称只能注册一次，同一 Rust 类型也只能对应一个类型名称，
    /// 否则按运行时类型查到的能力表会与定义中的类型名称不一致
    pub fn register(&mut self, bean_type: BeanType) -> BeanCreationResult<()> {
        let class_name = bean_type.class_name().to_string();
        if self.by_class.contains_key(&class_name) {
            return Err(BeanCreationError::DuplicateBeanType { class_name });
        }
        if let Some(existing) = self.by_type.get(&bean_type.type_info().id) {
            warn!(
                "Rust 类型 {} 已注册为 {}，拒绝再注册为 {}",
                bean_type.type_info().name,
                existing,
                class_name
            );
            return Err(BeanCreationError::DuplicateBeanType { class_name });
        }

        debug!(
            "注册 Bean 类型: {} -> {}",
            class_name,
            bean_type.type_info().name
        );
        self.by_type
            .insert(bean_type.type_info().id, class_name.clone());
        self.by_class.insert(class_name, bean_type);
        Ok(())
    }

    /// 注册实现了 `BeanClass` 的类型
    pub fn register_type<T: BeanClass>(&mut self) -> BeanCreationResult<()> {
        self.register(T::bean_type())
    }

    /// 链式注册
    pub fn with_type<T: BeanClass>(mut self) -> BeanCreationResult<Self> {
        self.register_type::<T>()?;
        Ok(self)
    }

    /// 按类型名称查找
    pub fn get(&self, class_name: &str) -> Option<&BeanType> {
        self.by_class.get(class_name)
    }

    /// 按 Rust 类型查找
    pub fn get_by_type_id(&self, type_id: TypeId) -> Option<&BeanType> {
        self.by_type
            .get(&type_id)
            .and_then(|class_name| self.by_class.get(class_name))
    }

    /// 查找实例运行时类型的能力表
    pub fn type_of(&self, value: &BeanValue) -> Option<&BeanType> {
        self.get_by_type_id(value.type_info().id)
    }

    /// 是否已注册类型名称
    pub fn contains(&self, class_name: &str) -> bool {
        self.by_class.contains_key(class_name)
    }

    /// 已注册的类型名称
    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.by_class.keys().map(String::as_str)
    }

    /// 已注册的类型数量
    pub fn len(&self) -> usize {
        self.by_class.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.by_class.is_empty()
    }

    /// 将实例转换为目标类型，结果为 `Box<Shared<R>>`
    ///
    /// 未注册的运行时类型只能转换为自身
    pub fn cast_erased(&self, value: &BeanValue, target: TypeId) -> Option<ErasedCast> {
        if value.type_info().id == target {
            return value.erased_cast();
        }
        self.type_of(value)?.cast(value, target)
    }

    /// 将实例转换为 `Shared<R>`
    pub fn cast<R>(&self, value: &BeanValue) -> Option<Shared<R>>
    where
        R: ?Sized + Send + Sync + 'static,
    {
        self.cast_erased(value, TypeId::of::<R>())?
            .downcast::<Shared<R>>()
            .ok()
            .map(|shared| *shared)
    }

    /// 实例是否可赋值给目标类型
    pub fn is_assignable(&self, value: &BeanValue, target: TypeId) -> bool {
        value.type_info().id == target
            || self
                .type_of(value)
                .is_some_and(|bean_type| bean_type.is_assignable_to(target))
    }
}
