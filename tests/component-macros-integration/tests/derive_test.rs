//! `#[derive(Bean)]` 生成的能力表在运行时的行为

use bean_macros::Bean;
use di_abstractions::{BeanClass, BeanValue, LiteralKind, PropertyKind, SetterError, Shared};

#[derive(Debug, Default, Bean)]
#[bean(class = "com.study.entity.MailService")]
#[bean(post_construct = "open", post_construct = "announce")]
struct MailService {
    #[bean(value)]
    port: i32,
    #[bean(value)]
    protocol: String,
    #[bean(value)]
    retry_limit: Option<u16>,
    events: Vec<&'static str>,
}

impl MailService {
    fn open(&mut self) {
        self.events.push("open");
    }

    fn announce(&mut self) {
        self.events.push("announce");
    }
}

#[derive(Default, Bean)]
struct UserService {
    #[bean(reference)]
    mail_service: Option<Shared<MailService>>,
}

#[test]
fn test_field_names_become_camel_case_properties() {
    let bean_type = MailService::bean_type();

    let names: Vec<_> = bean_type.properties().map(|setter| setter.property()).collect();
    assert_eq!(names, ["port", "protocol", "retryLimit"]);
    assert_eq!(
        bean_type.property("port").unwrap().kind(),
        PropertyKind::Literal(LiteralKind::Integer)
    );
    assert_eq!(
        bean_type.property("protocol").unwrap().kind(),
        PropertyKind::Literal(LiteralKind::String)
    );
}

#[test]
fn test_literal_setters_convert_values() {
    let bean_type = MailService::bean_type();
    let value = bean_type.instantiate();

    bean_type
        .property("port")
        .unwrap()
        .apply_literal(&value, "110")
        .unwrap()
        .unwrap();
    bean_type
        .property("retryLimit")
        .unwrap()
        .apply_literal(&value, "3")
        .unwrap()
        .unwrap();

    let mail = value.downcast::<MailService>().unwrap();
    assert_eq!(mail.read().port, 110);
    assert_eq!(mail.read().retry_limit, Some(3));
}

#[test]
fn test_invalid_integer_literal_is_reported() {
    let bean_type = MailService::bean_type();
    let value = bean_type.instantiate();

    let result = bean_type
        .property("port")
        .unwrap()
        .apply_literal(&value, "POP3")
        .unwrap();

    assert!(matches!(result, Err(SetterError::InvalidLiteral { .. })));
}

#[test]
fn test_post_construct_callbacks_run_in_declaration_order() {
    let bean_type = MailService::bean_type();
    let value = bean_type.instantiate();

    for callback in bean_type.post_construct_callbacks() {
        callback.invoke(&value).unwrap();
    }

    let mail = value.downcast::<MailService>().unwrap();
    assert_eq!(mail.read().events, ["open", "announce"]);
}

#[test]
fn test_reference_setter_stores_shared_instance() {
    let user_type = UserService::bean_type();
    assert_eq!(user_type.class_name(), "UserService");

    let user = user_type.instantiate();
    let mail = BeanValue::new(MailService::default());
    let setter = user_type.property("mailService").unwrap();

    setter
        .apply_reference(&user, mail.erased_cast().unwrap())
        .unwrap()
        .unwrap();

    let user = user.downcast::<UserService>().unwrap();
    let injected = user.read().mail_service.clone().unwrap();
    assert!(mail.is_same_instance(&injected));
}
