//! Bean 类型能力表
//!
//! 每个可被容器构建的 Rust 类型在注册时提供一张能力表：
//! 无参构造函数、按属性名索引的设置器、初始化回调、可赋值的目标类型，
//! 以及扩展能力标记（工厂后置处理器 / Bean 后置处理器）。
//! 容器在运行时只查询这张表，不依赖反射。

use crate::processor::{BeanFactoryPostProcessor, BeanPostProcessor};
use indexmap::IndexMap;
use ioc_common::{BeanValue, ErasedCast, Shared, TypeInfo};
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// 设置器调用错误
///
/// 不携带 Bean 键和属性名，由调用方补充上下文
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetterError {
    #[error("字面量无法解析: {reason}")]
    InvalidLiteral { reason: String },

    #[error("目标实例类型不匹配: 期望 {expected}, 实际 {actual}")]
    TargetTypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("参数类型不匹配: 期望 {expected}")]
    ArgumentTypeMismatch { expected: &'static str },
}

/// 字面量参数的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    /// 字符串参数，字面量原样传入
    String,
    /// 整数参数，字面量按十进制解析
    Integer,
}

/// 可以从字面量字符串构造的设置器参数类型
pub trait Literal: Sized + Send + Sync + 'static {
    /// 字面量种类
    const KIND: LiteralKind;

    /// 从字面量字符串解析
    fn parse_literal(raw: &str) -> Result<Self, String>;
}

impl Literal for String {
    const KIND: LiteralKind = LiteralKind::String;

    fn parse_literal(raw: &str) -> Result<Self, String> {
        Ok(raw.to_string())
    }
}

macro_rules! impl_integer_literal {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Literal for $ty {
                const KIND: LiteralKind = LiteralKind::Integer;

                fn parse_literal(raw: &str) -> Result<Self, String> {
                    raw.parse::<$ty>().map_err(|e| e.to_string())
                }
            }
        )*
    };
}

impl_integer_literal!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl<L: Literal> Literal for Option<L> {
    const KIND: LiteralKind = L::KIND;

    fn parse_literal(raw: &str) -> Result<Self, String> {
        L::parse_literal(raw).map(Some)
    }
}

/// 属性种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// 字面量属性
    Literal(LiteralKind),
    /// 引用属性，参数为指定类型的共享实例
    Reference(TypeInfo),
}

impl PropertyKind {
    /// 是否为字面量属性
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// 是否为引用属性
    pub fn is_reference(&self) -> bool {
        matches!(self, Self::Reference(_))
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(LiteralKind::String) => f.write_str("字符串字面量"),
            Self::Literal(LiteralKind::Integer) => f.write_str("整数字面量"),
            Self::Reference(target) => write!(f, "引用 {}", target.name),
        }
    }
}

type LiteralApply = Arc<dyn Fn(&BeanValue, &str) -> Result<(), SetterError> + Send + Sync>;
type ReferenceApply = Arc<dyn Fn(&BeanValue, ErasedCast) -> Result<(), SetterError> + Send + Sync>;
type CallbackApply = Arc<dyn Fn(&BeanValue) -> Result<(), SetterError> + Send + Sync>;
type CastApply = Arc<dyn Fn(&BeanValue) -> Option<ErasedCast> + Send + Sync>;
type Constructor = Arc<dyn Fn() -> BeanValue + Send + Sync>;
type FactoryPostProcessorConstructor = Arc<dyn Fn() -> Arc<dyn BeanFactoryPostProcessor> + Send + Sync>;
type BeanPostProcessorConstructor = Arc<dyn Fn() -> Arc<dyn BeanPostProcessor> + Send + Sync>;

#[derive(Clone)]
enum SetterApply {
    Literal(LiteralApply),
    Reference(ReferenceApply),
}

/// 单参数属性设置器
#[derive(Clone)]
pub struct PropertySetter {
    property: String,
    kind: PropertyKind,
    apply: SetterApply,
}

impl PropertySetter {
    /// 属性名称
    pub fn property(&self) -> &str {
        &self.property
    }

    /// 属性种类
    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    /// 引用属性的参数类型
    pub fn target_type(&self) -> Option<TypeInfo> {
        match self.kind {
            PropertyKind::Reference(target) => Some(target),
            PropertyKind::Literal(_) => None,
        }
    }

    /// 以字面量调用设置器
    ///
    /// 引用属性返回 `None`
    pub fn apply_literal(&self, bean: &BeanValue, raw: &str) -> Option<Result<(), SetterError>> {
        match &self.apply {
            SetterApply::Literal(apply) => Some(apply(bean, raw)),
            SetterApply::Reference(_) => None,
        }
    }

    /// 以转换后的引用调用设置器
    ///
    /// `reference` 必须是参数类型的 `Shared<R>`；字面量属性返回 `None`
    pub fn apply_reference(
        &self,
        bean: &BeanValue,
        reference: ErasedCast,
    ) -> Option<Result<(), SetterError>> {
        match &self.apply {
            SetterApply::Reference(apply) => Some(apply(bean, reference)),
            SetterApply::Literal(_) => None,
        }
    }
}

impl fmt::Debug for PropertySetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertySetter")
            .field("property", &self.property)
            .field("kind", &self.kind)
            .finish()
    }
}

/// 初始化回调
#[derive(Clone)]
pub struct PostConstructCallback {
    name: String,
    apply: CallbackApply,
}

impl PostConstructCallback {
    /// 回调名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 在实例上执行回调
    pub fn invoke(&self, bean: &BeanValue) -> Result<(), SetterError> {
        (self.apply)(bean)
    }
}

impl fmt::Debug for PostConstructCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostConstructCallback")
            .field("name", &self.name)
            .finish()
    }
}

#[derive(Clone)]
struct TypeCast {
    target: TypeInfo,
    apply: CastApply,
}

/// 扩展能力标记
///
/// 两个标记可以同时存在
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// 是否为工厂后置处理器
    pub factory_post_processor: bool,
    /// 是否为 Bean 后置处理器
    pub bean_post_processor: bool,
}

impl Capabilities {
    /// 是否为扩展类型
    pub fn is_extension(&self) -> bool {
        self.factory_post_processor || self.bean_post_processor
    }
}

/// 向下转换到具体类型并获取写锁
fn with_instance<T, R>(
    bean: &BeanValue,
    action: impl FnOnce(&mut T) -> R,
) -> Result<R, SetterError>
where
    T: Any + Send + Sync,
{
    let shared = bean
        .downcast::<T>()
        .ok_or(SetterError::TargetTypeMismatch {
            expected: std::any::type_name::<T>(),
            actual: bean.type_name(),
        })?;
    let mut guard = shared.write();
    Ok(action(&mut guard))
}

/// Bean 类型能力表
#[derive(Clone)]
pub struct BeanType {
    class_name: String,
    type_info: TypeInfo,
    constructor: Constructor,
    properties: IndexMap<String, PropertySetter>,
    post_constructs: Vec<PostConstructCallback>,
    casts: IndexMap<TypeId, TypeCast>,
    factory_post_processor: Option<FactoryPostProcessorConstructor>,
    bean_post_processor: Option<BeanPostProcessorConstructor>,
}

impl BeanType {
    /// 使用 `Default` 作为构造函数创建能力表构建器
    pub fn builder<T>(class_name: impl Into<String>) -> BeanTypeBuilder<T>
    where
        T: Default + Any + Send + Sync,
    {
        BeanTypeBuilder::new(class_name, T::default)
    }

    /// 使用自定义无参构造函数创建能力表构建器
    pub fn builder_with<T, F>(class_name: impl Into<String>, constructor: F) -> BeanTypeBuilder<T>
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        BeanTypeBuilder::new(class_name, constructor)
    }

    /// 类型名称
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Rust 类型信息
    pub fn type_info(&self) -> TypeInfo {
        self.type_info
    }

    /// 调用无参构造函数创建新实例
    pub fn instantiate(&self) -> BeanValue {
        (self.constructor)()
    }

    /// 按属性名查找设置器
    pub fn property(&self, property: &str) -> Option<&PropertySetter> {
        self.properties.get(property)
    }

    /// 所有设置器，按声明顺序
    pub fn properties(&self) -> impl Iterator<Item = &PropertySetter> {
        self.properties.values()
    }

    /// 初始化回调，按声明顺序
    pub fn post_construct_callbacks(&self) -> &[PostConstructCallback] {
        &self.post_constructs
    }

    /// 是否可赋值给指定类型
    pub fn is_assignable_to(&self, target: TypeId) -> bool {
        self.casts.contains_key(&target)
    }

    /// 所有可赋值的目标类型，第一个总是自身
    pub fn assignable_types(&self) -> impl Iterator<Item = TypeInfo> + '_ {
        self.casts.values().map(|cast| cast.target)
    }

    /// 将实例转换为目标类型的共享实例
    ///
    /// 成功时结果为 `Box<Shared<R>>`
    pub fn cast(&self, bean: &BeanValue, target: TypeId) -> Option<ErasedCast> {
        self.casts.get(&target).and_then(|cast| (cast.apply)(bean))
    }

    /// 扩展能力标记
    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            factory_post_processor: self.factory_post_processor.is_some(),
            bean_post_processor: self.bean_post_processor.is_some(),
        }
    }

    /// 是否为扩展类型
    pub fn is_extension(&self) -> bool {
        self.capabilities().is_extension()
    }

    /// 创建工厂后置处理器实例
    pub fn create_factory_post_processor(&self) -> Option<Arc<dyn BeanFactoryPostProcessor>> {
        self.factory_post_processor.as_ref().map(|create| create())
    }

    /// 创建 Bean 后置处理器实例
    pub fn create_bean_post_processor(&self) -> Option<Arc<dyn BeanPostProcessor>> {
        self.bean_post_processor.as_ref().map(|create| create())
    }
}

impl fmt::Debug for BeanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanType")
            .field("class_name", &self.class_name)
            .field("type", &self.type_info.name)
            .field("properties", &self.properties.keys().collect::<Vec<_>>())
            .field("post_constructs", &self.post_constructs)
            .field(
                "assignable_to",
                &self.casts.values().map(|c| c.target.name).collect::<Vec<_>>(),
            )
            .field("capabilities", &self.capabilities())
            .finish()
    }
}

/// Bean 类型能力表构建器
pub struct BeanTypeBuilder<T> {
    class_name: String,
    constructor: Arc<dyn Fn() -> T + Send + Sync>,
    properties: IndexMap<String, PropertySetter>,
    post_constructs: Vec<PostConstructCallback>,
    casts: IndexMap<TypeId, TypeCast>,
    factory_post_processor: Option<FactoryPostProcessorConstructor>,
    bean_post_processor: Option<BeanPostProcessorConstructor>,
}

impl<T> BeanTypeBuilder<T>
where
    T: Any + Send + Sync,
{
    fn new<F>(class_name: impl Into<String>, constructor: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        let builder = Self {
            class_name: class_name.into(),
            constructor: Arc::new(constructor),
            properties: IndexMap::new(),
            post_constructs: Vec::new(),
            casts: IndexMap::new(),
            factory_post_processor: None,
            bean_post_processor: None,
        };
        builder.assignable_to::<T, _>(|bean| bean)
    }

    /// 声明字面量属性
    ///
    /// 同名属性后声明的覆盖先声明的
    pub fn value<L, F>(mut self, property: impl Into<String>, setter: F) -> Self
    where
        L: Literal,
        F: Fn(&mut T, L) + Send + Sync + 'static,
    {
        let property = property.into();
        let apply: LiteralApply = Arc::new(move |bean, raw| {
            let value = L::parse_literal(raw)
                .map_err(|reason| SetterError::InvalidLiteral { reason })?;
            with_instance::<T, _>(bean, |instance| setter(instance, value))
        });
        self.properties.insert(
            property.clone(),
            PropertySetter {
                property,
                kind: PropertyKind::Literal(L::KIND),
                apply: SetterApply::Literal(apply),
            },
        );
        self
    }

    /// 声明引用属性
    ///
    /// 参数类型 `R` 可以是具体类型，也可以是 trait 对象
    pub fn reference<R, F>(mut self, property: impl Into<String>, setter: F) -> Self
    where
        R: ?Sized + Send + Sync + 'static,
        F: Fn(&mut T, Shared<R>) + Send + Sync + 'static,
    {
        let property = property.into();
        let apply: ReferenceApply = Arc::new(move |bean, reference| {
            let reference: Shared<R> = *reference
                .downcast::<Shared<R>>()
                .map_err(|_| SetterError::ArgumentTypeMismatch {
                    expected: std::any::type_name::<R>(),
                })?;
            with_instance::<T, _>(bean, |instance| setter(instance, reference))
        });
        self.properties.insert(
            property.clone(),
            PropertySetter {
                property,
                kind: PropertyKind::Reference(TypeInfo::of::<R>()),
                apply: SetterApply::Reference(apply),
            },
        );
        self
    }

    /// 声明初始化回调，按声明顺序执行
    pub fn post_construct<F>(mut self, name: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&mut T) + Send + Sync + 'static,
    {
        let apply: CallbackApply =
            Arc::new(move |bean| with_instance::<T, _>(bean, |instance| callback(instance)));
        self.post_constructs.push(PostConstructCallback {
            name: name.into(),
            apply,
        });
        self
    }

    /// 声明可赋值的目标类型
    ///
    /// 通常用于 trait 对象：`.assignable_to::<dyn MailSender, _>(|bean| bean as Shared<dyn MailSender>)`
    pub fn assignable_to<R, F>(mut self, cast: F) -> Self
    where
        R: ?Sized + Send + Sync + 'static,
        F: Fn(Shared<T>) -> Shared<R> + Send + Sync + 'static,
    {
        let apply: CastApply = Arc::new(move |bean| {
            bean.downcast::<T>()
                .map(|shared| Box::new(cast(shared)) as ErasedCast)
        });
        self.casts.insert(
            TypeId::of::<R>(),
            TypeCast {
                target: TypeInfo::of::<R>(),
                apply,
            },
        );
        self
    }

    /// 标记为工厂后置处理器
    pub fn factory_post_processor(mut self) -> Self
    where
        T: BeanFactoryPostProcessor,
    {
        let constructor = Arc::clone(&self.constructor);
        self.factory_post_processor = Some(Arc::new(move || {
            Arc::new(constructor()) as Arc<dyn BeanFactoryPostProcessor>
        }));
        self
    }

    /// 标记为 Bean 后置处理器
    pub fn bean_post_processor(mut self) -> Self
    where
        T: BeanPostProcessor,
    {
        let constructor = Arc::clone(&self.constructor);
        self.bean_post_processor = Some(Arc::new(move || {
            Arc::new(constructor()) as Arc<dyn BeanPostProcessor>
        }));
        self
    }

    /// 构建能力表
    pub fn build(self) -> BeanType {
        let constructor = self.constructor;
        BeanType {
            class_name: self.class_name,
            type_info: TypeInfo::of::<T>(),
            constructor: Arc::new(move || BeanValue::new(constructor())),
            properties: self.properties,
            post_constructs: self.post_constructs,
            casts: self.casts,
            factory_post_processor: self.factory_post_processor,
            bean_post_processor: self.bean_post_processor,
        }
    }
}

/// 可由容器构建的类型
///
/// 通常由 `#[derive(Bean)]` 生成实现
pub trait BeanClass: Any + Send + Sync + Sized {
    /// 获取能力表
    fn bean_type() -> BeanType;
}
