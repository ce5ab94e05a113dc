//! Bean 定义读取接口

use ioc_common::{BeanDefinitions, DefinitionResult};

/// Bean 定义读取器
pub trait BeanDefinitionReader: Send + Sync {
    /// 读取全部 Bean 定义
    fn read_definitions(&self) -> DefinitionResult<BeanDefinitions>;

    /// 定义来源的描述，用于日志
    fn source_description(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }
}

/// 内存中的定义集合本身就是一个读取器
impl BeanDefinitionReader for BeanDefinitions {
    fn read_definitions(&self) -> DefinitionResult<BeanDefinitions> {
        Ok(self.clone())
    }

    fn source_description(&self) -> String {
        format!("内存定义({}个)", self.len())
    }
}
