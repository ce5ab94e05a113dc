//! 示例领域类型

use bean_macros::Bean;
use di_abstractions::{
    BeanCreationResult, BeanDefinitions, BeanFactoryPostProcessor, BeanPostProcessor, BeanValue,
    Shared,
};
use tracing::info;

/// 邮件发送能力
pub trait MailSender: Send + Sync {
    /// 协议名称
    fn protocol(&self) -> &str;

    /// 发送邮件
    fn send(&self, to: &str, body: &str) -> String;
}

/// 邮件服务
#[derive(Debug, Default, Bean)]
#[bean(class = "com.study.entity.MailService", post_construct = "init")]
#[bean(provides(dyn MailSender))]
pub struct MailService {
    #[bean(value)]
    pub port: i32,
    #[bean(value)]
    pub protocol: String,
    pub endpoint: String,
}

impl MailService {
    fn init(&mut self) {
        self.endpoint = format!("{}://localhost:{}", self.protocol.to_lowercase(), self.port);
    }
}

impl MailSender for MailService {
    fn protocol(&self) -> &str {
        &self.protocol
    }

    fn send(&self, to: &str, body: &str) -> String {
        format!("[{}] -> {}: {}", self.endpoint, to, body)
    }
}

/// 用户服务
#[derive(Default, Bean)]
#[bean(class = "com.study.service.impl.DefaultUserService")]
pub struct UserService {
    #[bean(reference)]
    pub mail_service: Option<Shared<dyn MailSender>>,
}

impl UserService {
    /// 给用户发送欢迎邮件
    pub fn welcome(&self, user: &str) -> Option<String> {
        let mail = self.mail_service.as_ref()?;
        let receipt = mail.read().send(user, "欢迎注册");
        Some(receipt)
    }
}

/// 把所有 POP3 邮件服务升级为 POP3S
#[derive(Default, Bean)]
#[bean(class = "com.study.processor.SecureMailPostProcessor", factory_post_processor)]
pub struct SecureMailPostProcessor;

impl BeanFactoryPostProcessor for SecureMailPostProcessor {
    fn post_process_bean_factory(&self, definitions: &mut BeanDefinitions) -> BeanCreationResult<()> {
        for (key, definition) in definitions.iter_mut() {
            if definition.value_dependencies.get("protocol").map(String::as_str) == Some("POP3") {
                info!("升级 {} 为 POP3S", key);
                definition.set_value("protocol", "POP3S");
                definition.set_value("port", "995");
            }
        }
        Ok(())
    }
}

/// 记录每个 Bean 的初始化过程
#[derive(Default, Bean)]
#[bean(class = "com.study.processor.InitLoggingPostProcessor", bean_post_processor)]
pub struct InitLoggingPostProcessor;

impl BeanPostProcessor for InitLoggingPostProcessor {
    fn post_process_before_initialization(
        &self,
        bean: &di_abstractions::Bean,
        key: &str,
    ) -> BeanCreationResult<BeanValue> {
        info!("初始化前: {} ({})", key, bean.value().type_name());
        Ok(bean.value().clone())
    }

    fn post_process_after_initialization(
        &self,
        bean: &di_abstractions::Bean,
        key: &str,
    ) -> BeanCreationResult<BeanValue> {
        info!("初始化后: {}", key);
        Ok(bean.value().clone())
    }
}
