//! Bean 实例模型
//!
//! 容器中的每个 Bean 实例都放在 `Arc<RwLock<T>>` 中：装配阶段需要在所有实例
//! 创建之后再写入引用（允许循环引用），启动完成后实例在调用方之间共享

use crate::lifecycle::LifecycleState;
use crate::metadata::TypeInfo;
use parking_lot::RwLock;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 共享的 Bean 实例
pub type Shared<T> = Arc<RwLock<T>>;

/// 类型擦除的实例
pub type ErasedInstance = Arc<dyn Any + Send + Sync>;

/// 类型擦除的转换结果，实际内容是某个 `Shared<R>`
pub type ErasedCast = Box<dyn Any + Send + Sync>;

type IdentityCastFn = fn(&ErasedInstance) -> Option<ErasedCast>;

fn identity_cast<T: Any + Send + Sync>(instance: &ErasedInstance) -> Option<ErasedCast> {
    Arc::clone(instance)
        .downcast::<RwLock<T>>()
        .ok()
        .map(|shared| Box::new(shared) as ErasedCast)
}

/// 比较两个共享指针是否指向同一个实例
pub fn same_instance<A: ?Sized, B: ?Sized>(a: &Arc<A>, b: &Arc<B>) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

/// 类型擦除的 Bean 值
///
/// 克隆只复制句柄，不复制实例
#[derive(Clone)]
pub struct BeanValue {
    type_info: TypeInfo,
    instance: ErasedInstance,
    identity: IdentityCastFn,
}

impl BeanValue {
    /// 包装一个新实例
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self::from_shared(Arc::new(RwLock::new(value)))
    }

    /// 包装一个已共享的实例
    pub fn from_shared<T: Any + Send + Sync>(shared: Shared<T>) -> Self {
        Self {
            type_info: TypeInfo::of::<T>(),
            instance: shared,
            identity: identity_cast::<T>,
        }
    }

    /// 运行时类型信息
    pub fn type_info(&self) -> TypeInfo {
        self.type_info
    }

    /// 运行时类型名称
    pub fn type_name(&self) -> &'static str {
        self.type_info.name
    }

    /// 是否为指定的具体类型
    pub fn is<T: Any + Send + Sync>(&self) -> bool {
        self.type_info.is::<T>()
    }

    /// 转换为具体类型
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Shared<T>> {
        Arc::clone(&self.instance).downcast::<RwLock<T>>().ok()
    }

    /// 按实例自身的类型转换
    ///
    /// 只能得到具体类型本身；转换为 trait 对象需要类型注册表中的转换表
    pub fn cast<T: ?Sized + Send + Sync + 'static>(&self) -> Option<Shared<T>> {
        self.erased_cast()?
            .downcast::<Shared<T>>()
            .ok()
            .map(|shared| *shared)
    }

    /// 以自身类型转换，结果为 `Box<Shared<T>>`
    pub fn erased_cast(&self) -> Option<ErasedCast> {
        (self.identity)(&self.instance)
    }

    /// 底层的类型擦除实例
    pub fn instance(&self) -> &ErasedInstance {
        &self.instance
    }

    /// 是否与另一个 Bean 值指向同一实例
    pub fn ptr_eq(&self, other: &BeanValue) -> bool {
        same_instance(&self.instance, &other.instance)
    }

    /// 是否与给定的共享实例是同一实例
    pub fn is_same_instance<T: ?Sized>(&self, shared: &Arc<RwLock<T>>) -> bool {
        same_instance(&self.instance, shared)
    }
}

impl fmt::Debug for BeanValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanValue")
            .field("type", &self.type_info.name)
            .field("instance", &Arc::as_ptr(&self.instance))
            .finish()
    }
}

/// 容器中的 Bean
///
/// 由注册表独占；生命周期钩子可以原地替换其值
#[derive(Debug, Clone)]
pub struct Bean {
    id: String,
    value: BeanValue,
    state: LifecycleState,
}

impl Bean {
    /// 创建刚构造完成的 Bean
    pub fn new(id: impl Into<String>, value: BeanValue) -> Self {
        Self {
            id: id.into(),
            value,
            state: LifecycleState::Constructed,
        }
    }

    /// Bean 标识
    pub fn id(&self) -> &str {
        &self.id
    }

    /// 设置 Bean 标识
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Bean 值
    pub fn value(&self) -> &BeanValue {
        &self.value
    }

    /// 替换 Bean 值，返回旧值
    pub fn replace_value(&mut self, value: BeanValue) -> BeanValue {
        std::mem::replace(&mut self.value, value)
    }

    /// 生命周期状态
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// 设置生命周期状态
    pub fn set_state(&mut self, state: LifecycleState) {
        self.state = state;
    }
}
