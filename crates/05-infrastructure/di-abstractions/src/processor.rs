//! 扩展点抽象接口
//!
//! 工厂后置处理器在任何 Bean 构造之前改写 Bean 定义；
//! Bean 后置处理器在初始化回调前后拦截每个 Bean，可以替换 Bean 的值

use ioc_common::{Bean, BeanCreationResult, BeanDefinitions, BeanValue};

/// 工厂后置处理器
///
/// 每个处理器在构造阶段之前被调用一次，可以修改已有定义的属性或添加新定义，
/// 修改对之后的所有阶段可见
pub trait BeanFactoryPostProcessor: Send + Sync {
    /// 处理器名称，用于日志和错误信息
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// 处理全部 Bean 定义
    fn post_process_bean_factory(&self, definitions: &mut BeanDefinitions) -> BeanCreationResult<()>;
}

/// Bean 后置处理器
///
/// 钩子返回的值无条件替换注册表中该 Bean 的值；默认实现原样返回
pub trait BeanPostProcessor: Send + Sync {
    /// 处理器名称，用于日志和错误信息
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// 初始化回调之前调用
    fn post_process_before_initialization(
        &self,
        bean: &Bean,
        _key: &str,
    ) -> BeanCreationResult<BeanValue> {
        Ok(bean.value().clone())
    }

    /// 初始化回调之后调用
    fn post_process_after_initialization(
        &self,
        bean: &Bean,
        _key: &str,
    ) -> BeanCreationResult<BeanValue> {
        Ok(bean.value().clone())
    }
}
