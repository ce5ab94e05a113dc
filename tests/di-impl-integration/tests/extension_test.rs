//! 扩展点集成测试：工厂后置处理器、Bean 后置处理器和初始化回调策略

mod support;

use di_abstractions::{ApplicationContext, LifecycleState};
use di_impl::GenericApplicationContext;
use ioc_common::PostConstructPolicy;
use support::{mail_definitions, types, with_processor, MailService};

#[test]
fn test_factory_post_processor_rewrites_definitions() -> anyhow::Result<()> {
    let definitions = with_processor(
        mail_definitions(),
        "portOverride",
        "com.study.processor.PortOverride",
    );

    let context = GenericApplicationContext::new(types(), definitions)?;

    let mail = context.get_bean_typed::<MailService>("mailServicePOP")?;
    assert_eq!(mail.read().port, 1000);
    assert_eq!(mail.read().protocol, "TEST");

    // 扩展定义不进入主注册表
    assert!(!context.contains_bean("portOverride"));
    assert_eq!(context.factory_post_processor_names(), vec!["portOverride"]);
    assert_eq!(
        context.bean_definition("mailServicePOP").unwrap().value_dependencies["port"],
        "1000"
    );
    Ok(())
}

#[test]
fn test_added_literal_is_injected_like_an_original_one() -> anyhow::Result<()> {
    let definitions = with_processor(
        mail_definitions(),
        "timeouts",
        "com.study.processor.TimeoutDefaults",
    );

    let context = GenericApplicationContext::new(types(), definitions)?;

    let mail = context.get_bean_typed::<MailService>("mailServicePOP")?;
    assert_eq!(mail.read().timeout_ms, Some(3000));
    Ok(())
}

#[test]
fn test_factory_post_processors_run_in_definition_order() -> anyhow::Result<()> {
    // PortOverride 在 TimeoutDefaults 之前注册，两者的修改都应可见
    let definitions = with_processor(
        with_processor(
            mail_definitions(),
            "portOverride",
            "com.study.processor.PortOverride",
        ),
        "timeouts",
        "com.study.processor.TimeoutDefaults",
    );

    let context = GenericApplicationContext::new(types(), definitions)?;

    assert_eq!(
        context.factory_post_processor_names(),
        vec!["portOverride", "timeouts"]
    );
    let mail = context.get_bean_typed::<MailService>("mailServicePOP")?;
    assert_eq!(mail.read().port, 1000);
    assert_eq!(mail.read().timeout_ms, Some(3000));
    Ok(())
}

#[test]
fn test_post_construct_observes_before_hook_marker() -> anyhow::Result<()> {
    let definitions = with_processor(mail_definitions(), "idMarker", "com.study.processor.IdMarker");

    let context = GenericApplicationContext::new(types(), definitions)?;

    let mail = context.get_bean_typed::<MailService>("mailServicePOP")?;
    let mail = mail.read();
    assert_eq!(mail.id, "AfterInitialization");
    assert_eq!(mail.id_at_init.as_deref(), Some("BeforeInitialization"));
    assert_eq!(mail.init_count, 1);
    assert_eq!(
        context.lifecycle_state("mailServicePOP"),
        Some(LifecycleState::Ready)
    );
    assert!(!context.contains_bean("idMarker"));
    Ok(())
}

#[test]
fn test_once_policy_runs_callbacks_without_processors() -> anyhow::Result<()> {
    let context = GenericApplicationContext::new(types(), mail_definitions())?;

    let mail = context.get_bean_typed::<MailService>("mailServicePOP")?;
    assert_eq!(mail.read().init_count, 1);
    assert_eq!(
        context.lifecycle_state("mailServicePOP"),
        Some(LifecycleState::Ready)
    );
    Ok(())
}

#[test]
fn test_once_policy_runs_callbacks_once_with_many_processors() -> anyhow::Result<()> {
    let definitions = with_processor(
        with_processor(mail_definitions(), "idMarker", "com.study.processor.IdMarker"),
        "passThrough",
        "com.study.processor.PassThrough",
    );

    let context = GenericApplicationContext::new(types(), definitions)?;

    let mail = context.get_bean_typed::<MailService>("mailServicePOP")?;
    assert_eq!(mail.read().init_count, 1);
    assert_eq!(
        context.bean_post_processor_names(),
        vec!["idMarker", "passThrough"]
    );
    Ok(())
}

#[test]
fn test_per_pass_policy_repeats_callbacks() -> anyhow::Result<()> {
    let definitions = with_processor(
        with_processor(mail_definitions(), "idMarker", "com.study.processor.IdMarker"),
        "passThrough",
        "com.study.processor.PassThrough",
    );

    let context = GenericApplicationContext::with_policy(
        types(),
        definitions,
        PostConstructPolicy::PerInterceptorPass,
    )?;

    let mail = context.get_bean_typed::<MailService>("mailServicePOP")?;
    let mail = mail.read();
    assert_eq!(mail.init_count, 2);
    // 第二轮没有改写 id，回调看到的是第一轮 after 钩子写入的值
    assert_eq!(mail.id_at_init.as_deref(), Some("AfterInitialization"));
    assert_eq!(mail.id, "AfterInitialization");
    Ok(())
}

#[test]
fn test_per_pass_policy_without_processors_skips_callbacks() -> anyhow::Result<()> {
    let context = GenericApplicationContext::with_policy(
        types(),
        mail_definitions(),
        PostConstructPolicy::PerInterceptorPass,
    )?;

    let mail = context.get_bean_typed::<MailService>("mailServicePOP")?;
    assert_eq!(mail.read().init_count, 0);
    assert_eq!(
        context.lifecycle_state("mailServicePOP"),
        Some(LifecycleState::Constructed)
    );
    Ok(())
}
