//! Bean 装配集成测试：字面量注入、引用注入、循环引用和启动错误

mod support;

use di_abstractions::{ApplicationContext, BeanCreationError, BeanDefinition, BeanDefinitions};
use di_impl::GenericApplicationContext;
use support::{mail_definitions, types, MailSender, MailService, Node, NotificationService, UserService};

#[test]
fn test_literal_properties_are_converted() -> anyhow::Result<()> {
    let context = GenericApplicationContext::new(types(), mail_definitions())?;

    let mail = context.get_bean_typed::<MailService>("mailServicePOP")?;
    let mail = mail.read();
    assert_eq!(mail.port, 110);
    assert_eq!(mail.protocol, "POP3");
    assert_eq!(mail.timeout_ms, None);
    Ok(())
}

#[test]
fn test_reference_is_the_registered_instance() -> anyhow::Result<()> {
    let context = GenericApplicationContext::new(types(), mail_definitions())?;

    let user = context.get_bean_typed::<UserService>("userService")?;
    let injected = user.read().mail_service.clone().unwrap();

    assert!(context.get_bean("mailServicePOP")?.is_same_instance(&injected));
    assert_eq!(injected.read().port, 110);
    Ok(())
}

#[test]
fn test_trait_object_reference() -> anyhow::Result<()> {
    let definitions = mail_definitions().with(
        "notifications",
        BeanDefinition::new("notifications", "com.study.service.impl.NotificationService")
            .with_ref("sender", "mailServicePOP"),
    );

    let context = GenericApplicationContext::new(types(), definitions)?;

    let notifications = context.get_bean_typed::<NotificationService>("notifications")?;
    let sender = notifications.read().mail_sender.clone().unwrap();
    assert_eq!(sender.read().protocol(), "POP3");
    assert_eq!(sender.read().port(), 110);
    assert!(context.get_bean("mailServicePOP")?.is_same_instance(&sender));
    Ok(())
}

#[test]
fn test_forward_references_and_cycles_resolve() -> anyhow::Result<()> {
    // a 引用后声明的 b，b 再引用 a
    let definitions = BeanDefinitions::new()
        .with(
            "a",
            BeanDefinition::new("a", "com.study.entity.Node")
                .with_value("name", "A")
                .with_ref("next", "b"),
        )
        .with(
            "b",
            BeanDefinition::new("b", "com.study.entity.Node")
                .with_value("name", "B")
                .with_ref("next", "a"),
        );

    let context = GenericApplicationContext::new(types(), definitions)?;

    let a = context.get_bean_typed::<Node>("a")?;
    let b = context.get_bean_typed::<Node>("b")?;
    let a_next = a.read().next.clone().unwrap();
    let b_next = b.read().next.clone().unwrap();

    assert!(std::sync::Arc::ptr_eq(&a_next, &b));
    assert!(std::sync::Arc::ptr_eq(&b_next, &a));
    assert_eq!(a_next.read().name, "B");
    assert_eq!(b_next.read().name, "A");
    Ok(())
}

#[test]
fn test_self_reference_resolves() -> anyhow::Result<()> {
    let definitions = BeanDefinitions::new().with(
        "loop",
        BeanDefinition::new("loop", "com.study.entity.Node").with_ref("next", "loop"),
    );

    let context = GenericApplicationContext::new(types(), definitions)?;

    let node = context.get_bean_typed::<Node>("loop")?;
    let next = node.read().next.clone().unwrap();
    assert!(std::sync::Arc::ptr_eq(&node, &next));
    Ok(())
}

#[test]
fn test_unknown_class_aborts_bootstrap() {
    let definitions = mail_definitions().with(
        "ghost",
        BeanDefinition::new("ghost", "com.study.entity.Ghost"),
    );

    let error = GenericApplicationContext::new(types(), definitions).unwrap_err();

    assert!(matches!(
        error,
        BeanCreationError::Instantiation { ref class_name, .. } if class_name == "com.study.entity.Ghost"
    ));
}

#[test]
fn test_unknown_property_names_conventional_setter() {
    let definitions = BeanDefinitions::new().with(
        "mail",
        BeanDefinition::new("mail", "com.study.entity.MailService").with_value("host", "localhost"),
    );

    let error = GenericApplicationContext::new(types(), definitions).unwrap_err();

    match error {
        BeanCreationError::NoSuchProperty { key, setter, .. } => {
            assert_eq!(key, "mail");
            assert_eq!(setter, "setHost");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unparsable_integer_aborts_bootstrap() {
    let definitions = BeanDefinitions::new().with(
        "mail",
        BeanDefinition::new("mail", "com.study.entity.MailService").with_value("port", "one-ten"),
    );

    let error = GenericApplicationContext::new(types(), definitions).unwrap_err();

    assert!(matches!(
        error,
        BeanCreationError::InvalidLiteral { ref property, .. } if property == "port"
    ));
}

#[test]
fn test_unresolved_reference_aborts_bootstrap() {
    let definitions = BeanDefinitions::new().with(
        "userService",
        BeanDefinition::new("userService", "com.study.service.impl.DefaultUserService")
            .with_ref("mailService", "missing"),
    );

    let error = GenericApplicationContext::new(types(), definitions).unwrap_err();

    assert!(matches!(
        error,
        BeanCreationError::UnresolvedReference { ref reference, .. } if reference == "missing"
    ));
}

#[test]
fn test_reference_of_wrong_type_is_rejected() {
    let definitions = mail_definitions().with(
        "confused",
        BeanDefinition::new("confused", "com.study.service.impl.DefaultUserService")
            .with_ref("mailService", "userService"),
    );

    let error = GenericApplicationContext::new(types(), definitions).unwrap_err();

    assert!(matches!(
        error,
        BeanCreationError::ReferenceTypeMismatch { ref key, .. } if key == "confused"
    ));
}

#[test]
fn test_literal_for_reference_property_is_rejected() {
    let definitions = mail_definitions().with(
        "odd",
        BeanDefinition::new("odd", "com.study.service.impl.DefaultUserService")
            .with_value("mailService", "mailServicePOP"),
    );

    let error = GenericApplicationContext::new(types(), definitions).unwrap_err();

    assert!(matches!(
        error,
        BeanCreationError::PropertyKindMismatch { ref property, .. } if property == "mailService"
    ));
}
