//! 通用应用上下文
//!
//! 启动顺序：扩展发现 -> 工厂后置处理 -> 构造 -> 字面量注入 -> 引用注入 -> 生命周期编排。
//! 任何阶段失败都会中止启动，不暴露部分构建的注册表

use crate::construction::create_beans;
use crate::extensions::ExtensionPipeline;
use crate::injection::{inject_ref_dependencies, inject_value_dependencies};
use crate::lifecycle::LifecycleOrchestrator;
use crate::registry::BeanRegistry;
use crate::type_registry::BeanTypeRegistry;
use chrono::{DateTime, Utc};
use di_abstractions::{ApplicationContext, BeanDefinitionReader};
use indexmap::IndexMap;
use ioc_common::{
    BeanCreationResult, BeanDefinition, BeanDefinitions, BeanQueryResult, BeanValue, ContextResult,
    LifecycleState, PostConstructPolicy, Shared,
};
use tracing::info;
use uuid::Uuid;

/// 通用应用上下文
///
/// 启动完成后只读，可以在线程之间共享
#[derive(Debug)]
pub struct GenericApplicationContext {
    id: String,
    startup_date: DateTime<Utc>,
    policy: PostConstructPolicy,
    definitions: BeanDefinitions,
    types: BeanTypeRegistry,
    extensions: ExtensionPipeline,
    registry: BeanRegistry,
}

impl GenericApplicationContext {
    /// 使用默认策略启动上下文
    pub fn new(types: BeanTypeRegistry, definitions: BeanDefinitions) -> BeanCreationResult<Self> {
        Self::with_policy(types, definitions, PostConstructPolicy::default())
    }

    /// 使用指定的初始化回调策略启动上下文
    pub fn with_policy(
        types: BeanTypeRegistry,
        mut definitions: BeanDefinitions,
        policy: PostConstructPolicy,
    ) -> BeanCreationResult<Self> {
        let id = Uuid::new_v4().to_string();
        info!("启动应用上下文 {}: {} 个 Bean 定义", id, definitions.len());

        let extensions = ExtensionPipeline::discover(&definitions, &types)?;
        extensions.invoke_factory_post_processors(&mut definitions)?;

        let mut registry = BeanRegistry::new();
        create_beans(&definitions, &types, &extensions, &mut registry)?;
        inject_value_dependencies(&definitions, &types, &registry)?;
        inject_ref_dependencies(&definitions, &types, &registry)?;
        LifecycleOrchestrator::new(policy).post_process_beans(
            &mut registry,
            &types,
            extensions.bean_post_processors(),
        )?;

        info!("应用上下文 {} 启动完成: {} 个 Bean", id, registry.len());
        Ok(Self {
            id,
            startup_date: Utc::now(),
            policy,
            definitions,
            types,
            extensions,
            registry,
        })
    }

    /// 从定义读取器启动上下文
    pub fn from_reader(
        types: BeanTypeRegistry,
        reader: &dyn BeanDefinitionReader,
        policy: PostConstructPolicy,
    ) -> ContextResult<Self> {
        info!("读取 Bean 定义: {}", reader.source_description());
        let definitions = reader.read_definitions()?;
        Ok(Self::with_policy(types, definitions, policy)?)
    }

    /// 初始化回调策略
    pub fn post_construct_policy(&self) -> PostConstructPolicy {
        self.policy
    }

    /// 最终的 Bean 定义集合
    pub fn bean_definitions(&self) -> &BeanDefinitions {
        &self.definitions
    }

    /// 类型注册表
    pub fn bean_type_registry(&self) -> &BeanTypeRegistry {
        &self.types
    }

    /// Bean 后置处理器的注册键
    pub fn bean_post_processor_names(&self) -> Vec<String> {
        self.extensions.bean_post_processors().keys().cloned().collect()
    }

    /// 工厂后置处理器的注册键
    pub fn factory_post_processor_names(&self) -> Vec<String> {
        self.extensions
            .factory_post_processors()
            .iter()
            .map(|entry| entry.key.clone())
            .collect()
    }
}

impl ApplicationContext for GenericApplicationContext {
    fn get_bean(&self, key: &str) -> BeanQueryResult<BeanValue> {
        self.registry.get_value(key)
    }

    fn get_bean_of_type<T>(&self) -> BeanQueryResult<Option<Shared<T>>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.registry.get_unique_of_type::<T>(&self.types)
    }

    fn get_bean_typed<T>(&self, key: &str) -> BeanQueryResult<Shared<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.registry.get_typed::<T>(&self.types, key)
    }

    fn get_beans_of_type<T>(&self) -> IndexMap<String, Shared<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.registry.get_all_of_type::<T>(&self.types)
    }

    fn bean_names(&self) -> Vec<String> {
        self.registry.keys().cloned().collect()
    }

    fn contains_bean(&self, key: &str) -> bool {
        self.registry.contains_key(key)
    }

    fn bean_count(&self) -> usize {
        self.registry.len()
    }

    fn lifecycle_state(&self, key: &str) -> Option<LifecycleState> {
        self.registry.get(key).map(|bean| bean.state())
    }

    fn bean_definition(&self, key: &str) -> Option<&BeanDefinition> {
        self.definitions.get(key)
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn startup_date(&self) -> DateTime<Utc> {
        self.startup_date
    }
}
