//! 扩展管道
//!
//! 在构造阶段之前发现工厂后置处理器和 Bean 后置处理器，
//! 并按定义顺序依次调用工厂后置处理器

use crate::type_registry::BeanTypeRegistry;
use di_abstractions::{BeanFactoryPostProcessor, BeanPostProcessor};
use indexmap::{IndexMap, IndexSet};
use ioc_common::{BeanCreationError, BeanCreationResult, BeanDefinitions};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// 已发现的工厂后置处理器
#[derive(Clone)]
pub struct FactoryPostProcessorEntry {
    /// 定义的注册键
    pub key: String,
    /// 处理器实例
    pub processor: Arc<dyn BeanFactoryPostProcessor>,
}

/// 扩展管道
#[derive(Clone, Default)]
pub struct ExtensionPipeline {
    factory_post_processors: Vec<FactoryPostProcessorEntry>,
    bean_post_processors: IndexMap<String, Arc<dyn BeanPostProcessor>>,
    extension_keys: IndexSet<String>,
}

impl ExtensionPipeline {
    /// 创建空的扩展管道
    pub fn new() -> Self {
        Self::default()
    }

    /// 扫描全部定义，实例化扩展类型
    ///
    /// 同时具备两种能力的类型会分别进入两个集合
    pub fn discover(
        definitions: &BeanDefinitions,
        types: &BeanTypeRegistry,
    ) -> BeanCreationResult<Self> {
        let mut pipeline = Self::new();

        for (key, definition) in definitions.iter() {
            let bean_type = types.get(&definition.class_name).ok_or_else(|| {
                error!("扩展发现失败，未知的 Bean 类型: {} ({})", definition.class_name, key);
                BeanCreationError::Instantiation {
                    key: key.clone(),
                    class_name: definition.class_name.clone(),
                }
            })?;

            if !bean_type.is_extension() {
                continue;
            }

            if definition.has_dependencies() {
                warn!("扩展定义 {} 声明的属性不会被注入", key);
            }

            if let Some(processor) = bean_type.create_factory_post_processor() {
                debug!("发现工厂后置处理器: {} ({})", key, processor.name());
                pipeline.factory_post_processors.push(FactoryPostProcessorEntry {
                    key: key.clone(),
                    processor,
                });
            }

            if let Some(processor) = bean_type.create_bean_post_processor() {
                debug!("发现 Bean 后置处理器: {} ({})", key, processor.name());
                pipeline
                    .bean_post_processors
                    .insert(key.clone(), processor);
            }

            pipeline.extension_keys.insert(key.clone());
        }

        info!(
            "扩展发现完成: {} 个工厂后置处理器, {} 个 Bean 后置处理器",
            pipeline.factory_post_processors.len(),
            pipeline.bean_post_processors.len()
        );
        Ok(pipeline)
    }

    /// 注册工厂后置处理器
    pub fn add_factory_post_processor(
        &mut self,
        key: impl Into<String>,
        processor: Arc<dyn BeanFactoryPostProcessor>,
    ) {
        let key = key.into();
        self.extension_keys.insert(key.clone());
        self.factory_post_processors
            .push(FactoryPostProcessorEntry { key, processor });
    }

    /// 注册 Bean 后置处理器
    pub fn add_bean_post_processor(
        &mut self,
        key: impl Into<String>,
        processor: Arc<dyn BeanPostProcessor>,
    ) {
        let key = key.into();
        self.extension_keys.insert(key.clone());
        self.bean_post_processors.insert(key, processor);
    }

    /// 依次调用全部工厂后置处理器
    pub fn invoke_factory_post_processors(
        &self,
        definitions: &mut BeanDefinitions,
    ) -> BeanCreationResult<()> {
        for entry in &self.factory_post_processors {
            debug!("调用工厂后置处理器: {}", entry.key);
            let before = definitions.len();

            entry
                .processor
                .post_process_bean_factory(definitions)
                .map_err(|e| {
                    error!("工厂后置处理器 {} 执行失败: {}", entry.key, e);
                    match e {
                        BeanCreationError::FactoryPostProcessing { .. } => e,
                        other => BeanCreationError::factory_post_processing(
                            entry.processor.name(),
                            other.to_string(),
                        ),
                    }
                })?;

            if definitions.len() != before {
                debug!(
                    "工厂后置处理器 {} 修改了定义数量: {} -> {}",
                    entry.key,
                    before,
                    definitions.len()
                );
            }
        }
        Ok(())
    }

    /// 工厂后置处理器，按定义顺序
    pub fn factory_post_processors(&self) -> &[FactoryPostProcessorEntry] {
        &self.factory_post_processors
    }

    /// Bean 后置处理器，按定义顺序
    pub fn bean_post_processors(&self) -> &IndexMap<String, Arc<dyn BeanPostProcessor>> {
        &self.bean_post_processors
    }

    /// 是否为发现阶段识别的扩展定义
    pub fn is_extension_key(&self, key: &str) -> bool {
        self.extension_keys.contains(key)
    }

    /// 扩展定义的注册键
    pub fn extension_keys(&self) -> impl Iterator<Item = &str> {
        self.extension_keys.iter().map(String::as_str)
    }
}

impl std::fmt::Debug for ExtensionPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionPipeline")
            .field(
                "factory_post_processors",
                &self
                    .factory_post_processors
                    .iter()
                    .map(|entry| entry.key.as_str())
                    .collect::<Vec<_>>(),
            )
            .field(
                "bean_post_processors",
                &self.bean_post_processors.keys().collect::<Vec<_>>(),
            )
            .finish()
    }
}
