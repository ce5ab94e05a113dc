//! 构造阶段
//!
//! 为每个非扩展定义调用无参构造函数，结果写入注册表

use crate::extensions::ExtensionPipeline;
use crate::registry::BeanRegistry;
use crate::type_registry::BeanTypeRegistry;
use ioc_common::{Bean, BeanCreationError, BeanCreationResult, BeanDefinitions, ClassNameConventions};
use tracing::{debug, error, info, warn};

/// 构造全部非扩展 Bean
///
/// 工厂后置处理器新增的扩展定义不会再被发现，跳过并记录警告
pub fn create_beans(
    definitions: &BeanDefinitions,
    types: &BeanTypeRegistry,
    extensions: &ExtensionPipeline,
    registry: &mut BeanRegistry,
) -> BeanCreationResult<()> {
    for (key, definition) in definitions.iter() {
        let bean_type = types.get(&definition.class_name).ok_or_else(|| {
            error!("Bean 实例化失败，未知类型: {} ({})", definition.class_name, key);
            BeanCreationError::Instantiation {
                key: key.clone(),
                class_name: definition.class_name.clone(),
            }
        })?;

        if bean_type.is_extension() {
            if !extensions.is_extension_key(key) {
                warn!(
                    "扩展定义 {} 在发现阶段之后加入，已忽略 ({})",
                    key, definition.class_name
                );
            }
            continue;
        }

        let value = bean_type.instantiate();
        debug!(
            "构造 Bean: {} -> {}",
            key,
            ClassNameConventions::simple_name(&definition.class_name)
        );
        registry.insert(key.clone(), Bean::new(definition.id.clone(), value));
    }

    info!("构造阶段完成: {} 个 Bean", registry.len());
    Ok(())
}
