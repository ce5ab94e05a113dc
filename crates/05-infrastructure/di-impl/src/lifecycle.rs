//! 生命周期编排
//!
//! 依次执行初始化前钩子、初始化回调和初始化后钩子，
//! 每个钩子的返回值都会写回注册表

use crate::registry::BeanRegistry;
use crate::type_registry::BeanTypeRegistry;
use di_abstractions::{BeanPostProcessor, SetterError};
use indexmap::IndexMap;
use ioc_common::{
    Bean, BeanCreationError, BeanCreationResult, BeanValue, LifecycleState, PostConstructPolicy,
};
use std::sync::Arc;
use tracing::{debug, error, info};

type Processors = IndexMap<String, Arc<dyn BeanPostProcessor>>;

#[derive(Clone, Copy)]
enum Hook {
    Before,
    After,
}

/// 生命周期编排器
#[derive(Debug, Clone, Copy, Default)]
pub struct LifecycleOrchestrator {
    policy: PostConstructPolicy,
}

impl LifecycleOrchestrator {
    /// 创建编排器
    pub fn new(policy: PostConstructPolicy) -> Self {
        Self { policy }
    }

    /// 初始化回调策略
    pub fn policy(&self) -> PostConstructPolicy {
        self.policy
    }

    /// 对注册表中的全部 Bean 执行初始化流程
    pub fn post_process_beans(
        &self,
        registry: &mut BeanRegistry,
        types: &BeanTypeRegistry,
        processors: &Processors,
    ) -> BeanCreationResult<()> {
        let keys: Vec<String> = registry.keys().cloned().collect();
        info!(
            "开始初始化 {} 个 Bean, {} 个后置处理器, 策略 {:?}",
            keys.len(),
            processors.len(),
            self.policy
        );

        match self.policy {
            PostConstructPolicy::Once => {
                for key in &keys {
                    let Some(bean) = registry.get_mut(key) else {
                        continue;
                    };
                    bean.set_state(LifecycleState::BeforeInit);
                    for (name, processor) in processors {
                        apply_hook(bean, key, name, processor.as_ref(), Hook::Before)?;
                    }
                    bean.set_state(LifecycleState::PostConstruct);
                    run_post_construct(bean, key, types)?;
                    bean.set_state(LifecycleState::AfterInit);
                    for (name, processor) in processors {
                        apply_hook(bean, key, name, processor.as_ref(), Hook::After)?;
                    }
                    bean.set_state(LifecycleState::Ready);
                }
            }
            PostConstructPolicy::PerInterceptorPass => {
                if processors.is_empty() {
                    info!("没有 Bean 后置处理器，跳过初始化回调");
                    return Ok(());
                }
                for (name, processor) in processors {
                    debug!("后置处理器 {} 开始处理", name);
                    for key in &keys {
                        let Some(bean) = registry.get_mut(key) else {
                            continue;
                        };
                        bean.set_state(LifecycleState::BeforeInit);
                        apply_hook(bean, key, name, processor.as_ref(), Hook::Before)?;
                        bean.set_state(LifecycleState::PostConstruct);
                        run_post_construct(bean, key, types)?;
                        bean.set_state(LifecycleState::AfterInit);
                        apply_hook(bean, key, name, processor.as_ref(), Hook::After)?;
                    }
                }
                for key in &keys {
                    if let Some(bean) = registry.get_mut(key) {
                        bean.set_state(LifecycleState::Ready);
                    }
                }
            }
        }

        info!("Bean 初始化完成");
        Ok(())
    }
}

/// 执行一个钩子，返回值无条件替换 Bean 的值
fn apply_hook(
    bean: &mut Bean,
    key: &str,
    name: &str,
    processor: &dyn BeanPostProcessor,
    hook: Hook,
) -> BeanCreationResult<()> {
    let result = match hook {
        Hook::Before => processor.post_process_before_initialization(bean, key),
        Hook::After => processor.post_process_after_initialization(bean, key),
    };

    let value: BeanValue = result.map_err(|e| {
        error!("后置处理器 {} 处理 Bean {} 失败: {}", name, key, e);
        match e {
            BeanCreationError::PostProcessing { .. } => e,
            other => BeanCreationError::post_processing(key, processor.name(), other.to_string()),
        }
    })?;

    if !value.ptr_eq(bean.value()) {
        debug!(
            "后置处理器 {} 替换了 Bean {} 的值: {} -> {}",
            name,
            key,
            bean.value().type_name(),
            value.type_name()
        );
    }
    bean.replace_value(value);
    Ok(())
}

/// 按值的运行时类型执行初始化回调
fn run_post_construct(bean: &Bean, key: &str, types: &BeanTypeRegistry) -> BeanCreationResult<()> {
    let Some(bean_type) = types.type_of(bean.value()) else {
        debug!("Bean {} 的类型 {} 未注册，没有初始化回调", key, bean.value().type_name());
        return Ok(());
    };

    for callback in bean_type.post_construct_callbacks() {
        debug!("执行初始化回调: {}.{}", key, callback.name());
        callback
            .invoke(bean.value())
            .map_err(|e| post_construct_failure(key, callback.name(), e))?;
    }
    Ok(())
}

/// 初始化回调失败，以回调名作为处理器名报告
fn post_construct_failure(key: &str, callback: &str, error: SetterError) -> BeanCreationError {
    error!("Bean {} 的初始化回调 {} 失败: {}", key, callback, error);
    BeanCreationError::post_processing(key, callback, error.to_string())
}
