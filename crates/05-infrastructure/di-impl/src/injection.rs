//! 依赖注入阶段
//!
//! 先注入字面量属性，再注入引用属性。所有 Bean 在注入之前已经构造完成，
//! 所以前向引用和循环引用都可以解析

use crate::registry::BeanRegistry;
use crate::type_registry::BeanTypeRegistry;
use di_abstractions::{BeanType, PropertySetter, SetterError};
use ioc_common::{
    BeanCreationError, BeanCreationResult, BeanDefinitions, BeanValue, NamingConventions,
};
use tracing::{debug, error, info};

/// 查找 Bean 运行时类型上的设置器
fn resolve_setter<'a>(
    types: &'a BeanTypeRegistry,
    key: &str,
    value: &BeanValue,
    property: &str,
) -> BeanCreationResult<&'a PropertySetter> {
    let no_such_property = |class_name: &str| BeanCreationError::NoSuchProperty {
        key: key.to_string(),
        class_name: class_name.to_string(),
        property: property.to_string(),
        setter: NamingConventions::setter_name(property),
    };

    let bean_type: &BeanType = types
        .type_of(value)
        .ok_or_else(|| no_such_property(value.type_name()))?;
    bean_type
        .property(property)
        .ok_or_else(|| no_such_property(bean_type.class_name()))
}

/// 为设置器错误补充 Bean 键和属性
fn setter_error(key: &str, property: &str, raw: &str, error: SetterError) -> BeanCreationError {
    match error {
        SetterError::InvalidLiteral { reason } => BeanCreationError::InvalidLiteral {
            key: key.to_string(),
            property: property.to_string(),
            value: raw.to_string(),
            reason,
        },
        SetterError::TargetTypeMismatch { expected, actual } => {
            BeanCreationError::BeanTypeMismatch {
                key: key.to_string(),
                expected: expected.to_string(),
                actual: actual.to_string(),
            }
        }
        SetterError::ArgumentTypeMismatch { expected } => {
            BeanCreationError::ReferenceTypeMismatch {
                key: key.to_string(),
                property: property.to_string(),
                reference: raw.to_string(),
                expected: expected.to_string(),
                actual: "unknown".to_string(),
            }
        }
    }
}

fn log_failure(error: BeanCreationError) -> BeanCreationError {
    error!("依赖注入失败: {}", error);
    error
}

/// 注入字面量属性
///
/// 整数参数按十进制解析，字符串参数原样传入
pub fn inject_value_dependencies(
    definitions: &BeanDefinitions,
    types: &BeanTypeRegistry,
    registry: &BeanRegistry,
) -> BeanCreationResult<()> {
    let mut injected = 0usize;

    for (key, definition) in definitions.iter() {
        let Some(bean) = registry.get(key) else {
            continue;
        };

        for (property, raw) in &definition.value_dependencies {
            let setter =
                resolve_setter(types, key, bean.value(), property).map_err(log_failure)?;
            let result = setter.apply_literal(bean.value(), raw).ok_or_else(|| {
                log_failure(BeanCreationError::PropertyKindMismatch {
                    key: key.clone(),
                    property: property.clone(),
                    expected: setter.kind().to_string(),
                })
            })?;
            result.map_err(|e| log_failure(setter_error(key, property, raw, e)))?;

            debug!("注入字面量: {}.{} = {:?}", key, property, raw);
            injected += 1;
        }
    }

    info!("字面量注入完成: {} 个属性", injected);
    Ok(())
}

/// 注入引用属性
///
/// 被引用的 Bean 按设置器参数类型转换，扩展定义不可被引用
pub fn inject_ref_dependencies(
    definitions: &BeanDefinitions,
    types: &BeanTypeRegistry,
    registry: &BeanRegistry,
) -> BeanCreationResult<()> {
    let mut injected = 0usize;

    for (key, definition) in definitions.iter() {
        let Some(bean) = registry.get(key) else {
            continue;
        };

        for (property, reference) in &definition.ref_dependencies {
            let referenced = registry.get(reference).ok_or_else(|| {
                log_failure(BeanCreationError::UnresolvedReference {
                    key: key.clone(),
                    property: property.clone(),
                    reference: reference.clone(),
                })
            })?;

            let setter =
                resolve_setter(types, key, bean.value(), property).map_err(log_failure)?;
            let target = setter.target_type().ok_or_else(|| {
                log_failure(BeanCreationError::PropertyKindMismatch {
                    key: key.clone(),
                    property: property.clone(),
                    expected: setter.kind().to_string(),
                })
            })?;

            let cast = types
                .cast_erased(referenced.value(), target.id)
                .ok_or_else(|| {
                    log_failure(BeanCreationError::ReferenceTypeMismatch {
                        key: key.clone(),
                        property: property.clone(),
                        reference: reference.clone(),
                        expected: target.name.to_string(),
                        actual: referenced.value().type_name().to_string(),
                    })
                })?;

            let result = setter.apply_reference(bean.value(), cast).ok_or_else(|| {
                log_failure(BeanCreationError::PropertyKindMismatch {
                    key: key.clone(),
                    property: property.clone(),
                    expected: setter.kind().to_string(),
                })
            })?;
            result.map_err(|e| log_failure(setter_error(key, property, reference, e)))?;

            debug!("注入引用: {}.{} -> {}", key, property, reference);
            injected += 1;
        }
    }

    info!("引用注入完成: {} 个属性", injected);
    Ok(())
}
