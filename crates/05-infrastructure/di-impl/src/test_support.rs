//! 单元测试共用的 Bean 类型

use di_abstractions::{BeanClass, BeanFactoryPostProcessor, BeanPostProcessor, BeanType};
use ioc_common::{
    Bean, BeanCreationResult, BeanDefinition, BeanDefinitions, BeanValue, Shared,
};

pub trait MailSender: Send + Sync {
    fn protocol(&self) -> &str;
}

#[derive(Debug, Default)]
pub struct MailService {
    pub id: String,
    pub port: i32,
    pub protocol: String,
    pub init_count: usize,
    pub id_at_init: Option<String>,
}

impl MailSender for MailService {
    fn protocol(&self) -> &str {
        &self.protocol
    }
}

impl BeanClass for MailService {
    fn bean_type() -> BeanType {
        mail_service_type()
    }
}

pub fn mail_service_type() -> BeanType {
    BeanType::builder::<MailService>("com.study.entity.MailService")
        .value("id", |bean: &mut MailService, value: String| bean.id = value)
        .value("port", |bean: &mut MailService, value: i32| bean.port = value)
        .value("protocol", |bean: &mut MailService, value: String| {
            bean.protocol = value
        })
        .post_construct("init", |bean: &mut MailService| {
            bean.init_count += 1;
            bean.id_at_init = Some(bean.id.clone());
        })
        .assignable_to::<dyn MailSender, _>(|bean| bean as Shared<dyn MailSender>)
        .build()
}

#[derive(Default)]
pub struct UserService {
    pub mail_service: Option<Shared<MailService>>,
}

impl BeanClass for UserService {
    fn bean_type() -> BeanType {
        BeanType::builder::<UserService>("com.study.service.impl.DefaultUserService")
            .reference("mailService", |bean: &mut UserService, value: Shared<MailService>| {
                bean.mail_service = Some(value)
            })
            .build()
    }
}

#[derive(Default)]
pub struct Node {
    pub name: String,
    pub next: Option<Shared<Node>>,
}

impl BeanClass for Node {
    fn bean_type() -> BeanType {
        BeanType::builder::<Node>("Node")
            .value("name", |bean: &mut Node, value: String| bean.name = value)
            .reference("next", |bean: &mut Node, value: Shared<Node>| bean.next = Some(value))
            .build()
    }
}

/// 把 mailServicePOP 的端口和协议改为 1000 / TEST
#[derive(Default)]
pub struct PortOverride;

impl BeanFactoryPostProcessor for PortOverride {
    fn post_process_bean_factory(&self, definitions: &mut BeanDefinitions) -> BeanCreationResult<()> {
        if let Some(definition) = definitions.get_mut("mailServicePOP") {
            definition.set_value("port", "1000");
            definition.set_value("protocol", "TEST");
        }
        Ok(())
    }
}

impl BeanClass for PortOverride {
    fn bean_type() -> BeanType {
        BeanType::builder::<PortOverride>("PortOverride")
            .factory_post_processor()
            .build()
    }
}

/// 在初始化前后改写 MailService 的 id
#[derive(Default)]
pub struct IdMarker;

impl BeanPostProcessor for IdMarker {
    fn post_process_before_initialization(
        &self,
        bean: &Bean,
        _key: &str,
    ) -> BeanCreationResult<BeanValue> {
        if let Some(mail) = bean.value().downcast::<MailService>() {
            mail.write().id = "BeforeInitialization".to_string();
        }
        Ok(bean.value().clone())
    }

    fn post_process_after_initialization(
        &self,
        bean: &Bean,
        _key: &str,
    ) -> BeanCreationResult<BeanValue> {
        if let Some(mail) = bean.value().downcast::<MailService>() {
            mail.write().id = "AfterInitialization".to_string();
        }
        Ok(bean.value().clone())
    }
}

impl BeanClass for IdMarker {
    fn bean_type() -> BeanType {
        BeanType::builder::<IdMarker>("IdMarker")
            .bean_post_processor()
            .build()
    }
}

pub fn mail_definitions() -> BeanDefinitions {
    BeanDefinitions::new()
        .with(
            "mailServicePOP",
            BeanDefinition::new("mailServicePOP", "com.study.entity.MailService")
                .with_value("port", "110")
                .with_value("protocol", "POP3"),
        )
        .with(
            "userService",
            BeanDefinition::new("userService", "com.study.service.impl.DefaultUserService")
                .with_ref("mailService", "mailServicePOP"),
        )
}

pub fn all_types() -> crate::BeanTypeRegistry {
    let mut types = crate::BeanTypeRegistry::new();
    types.register_type::<MailService>().unwrap();
    types.register_type::<UserService>().unwrap();
    types.register_type::<Node>().unwrap();
    types.register_type::<PortOverride>().unwrap();
    types.register_type::<IdMarker>().unwrap();
    types
}
