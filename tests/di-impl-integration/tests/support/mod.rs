//! 集成测试共用的领域类型
#![allow(dead_code)]

use bean_macros::Bean;
use di_abstractions::{
    BeanCreationResult, BeanDefinition, BeanDefinitions, BeanFactoryPostProcessor,
    BeanPostProcessor, BeanValue, Shared,
};
use di_impl::BeanTypeRegistry;

pub trait MailSender: Send + Sync {
    fn protocol(&self) -> &str;
    fn port(&self) -> i32;
}

#[derive(Debug, Default, Bean)]
#[bean(class = "com.study.entity.MailService", post_construct = "init")]
#[bean(provides(dyn MailSender))]
pub struct MailService {
    #[bean(value)]
    pub id: String,
    #[bean(value)]
    pub port: i32,
    #[bean(value)]
    pub protocol: String,
    #[bean(value)]
    pub timeout_ms: Option<u64>,
    pub init_count: usize,
    pub id_at_init: Option<String>,
}

impl MailService {
    fn init(&mut self) {
        self.init_count += 1;
        self.id_at_init = Some(self.id.clone());
    }
}

impl MailSender for MailService {
    fn protocol(&self) -> &str {
        &self.protocol
    }

    fn port(&self) -> i32 {
        self.port
    }
}

#[derive(Default, Bean)]
#[bean(class = "com.study.service.impl.DefaultUserService")]
pub struct UserService {
    #[bean(reference)]
    pub mail_service: Option<Shared<MailService>>,
}

/// 通过 trait 对象依赖邮件服务
#[derive(Default, Bean)]
#[bean(class = "com.study.service.impl.NotificationService")]
pub struct NotificationService {
    #[bean(reference, name = "sender")]
    pub mail_sender: Option<Shared<dyn MailSender>>,
}

#[derive(Default, Bean)]
#[bean(class = "com.study.entity.Node")]
pub struct Node {
    #[bean(value)]
    pub name: String,
    #[bean(reference)]
    pub next: Option<Shared<Node>>,
}

/// 把 mailServicePOP 的端口和协议改为 1000 / TEST
#[derive(Default, Bean)]
#[bean(class = "com.study.processor.PortOverride", factory_post_processor)]
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

/// 给所有邮件服务补上超时时间
#[derive(Default, Bean)]
#[bean(class = "com.study.processor.TimeoutDefaults", factory_post_processor)]
pub struct TimeoutDefaults;

impl BeanFactoryPostProcessor for TimeoutDefaults {
    fn post_process_bean_factory(&self, definitions: &mut BeanDefinitions) -> BeanCreationResult<()> {
        for (_, definition) in definitions.iter_mut() {
            if definition.class_name == "com.study.entity.MailService" {
                definition.set_value("timeoutMs", "3000");
            }
        }
        Ok(())
    }
}

/// 在初始化前后改写 MailService 的 id
#[derive(Default, Bean)]
#[bean(class = "com.study.processor.IdMarker", bean_post_processor)]
pub struct IdMarker;

impl BeanPostProcessor for IdMarker {
    fn post_process_before_initialization(
        &self,
        bean: &di_abstractions::Bean,
        _key: &str,
    ) -> BeanCreationResult<BeanValue> {
        if let Some(mail) = bean.value().downcast::<MailService>() {
            mail.write().id = "BeforeInitialization".to_string();
        }
        Ok(bean.value().clone())
    }

    fn post_process_after_initialization(
        &self,
        bean: &di_abstractions::Bean,
        _key: &str,
    ) -> BeanCreationResult<BeanValue> {
        if let Some(mail) = bean.value().downcast::<MailService>() {
            mail.write().id = "AfterInitialization".to_string();
        }
        Ok(bean.value().clone())
    }
}

/// 不做任何修改的后置处理器
#[derive(Default, Bean)]
#[bean(class = "com.study.processor.PassThrough", bean_post_processor)]
pub struct PassThrough;

impl BeanPostProcessor for PassThrough {}

pub fn types() -> BeanTypeRegistry {
    let mut types = BeanTypeRegistry::new();
    types.register_type::<MailService>().unwrap();
    types.register_type::<UserService>().unwrap();
    types.register_type::<NotificationService>().unwrap();
    types.register_type::<Node>().unwrap();
    types.register_type::<PortOverride>().unwrap();
    types.register_type::<TimeoutDefaults>().unwrap();
    types.register_type::<IdMarker>().unwrap();
    types.register_type::<PassThrough>().unwrap();
    types
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

pub fn with_processor(definitions: BeanDefinitions, key: &str, class_name: &str) -> BeanDefinitions {
    definitions.with(key, BeanDefinition::new(key, class_name))
}
