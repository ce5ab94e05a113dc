//! Bean 生命周期管理

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bean 生命周期状态
///
/// `Constructed -> BeforeInit -> PostConstruct -> AfterInit -> Ready`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LifecycleState {
    /// 已构造，属性已注入
    #[default]
    Constructed,
    /// 初始化前钩子执行中
    BeforeInit,
    /// 初始化回调执行中
    PostConstruct,
    /// 初始化后钩子执行中
    AfterInit,
    /// 可供调用方使用
    Ready,
}

impl LifecycleState {
    /// 下一个状态，`Ready` 为终态
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Constructed => Some(Self::BeforeInit),
            Self::BeforeInit => Some(Self::PostConstruct),
            Self::PostConstruct => Some(Self::AfterInit),
            Self::AfterInit => Some(Self::Ready),
            Self::Ready => None,
        }
    }

    /// 是否已完成初始化
    pub fn is_ready(self) -> bool {
        self == Self::Ready
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Constructed => "CONSTRUCTED",
            Self::BeforeInit => "BEFORE_INIT",
            Self::PostConstruct => "POST_CONSTRUCT",
            Self::AfterInit => "AFTER_INIT",
            Self::Ready => "READY",
        };
        f.write_str(name)
    }
}

/// 初始化回调的执行策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostConstructPolicy {
    /// 每个 Bean 恰好执行一次，与后置处理器的数量无关：
    /// 先执行全部 before 钩子，再执行初始化回调，最后执行全部 after 钩子
    #[default]
    Once,
    /// 每个后置处理器一轮：每轮对每个 Bean 依次执行 before、初始化回调、after。
    /// 没有后置处理器时不执行初始化回调，Bean 停留在 `Constructed`
    PerInterceptorPass,
}

impl PostConstructPolicy {
    /// 从配置字符串解析
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "once" => Some(Self::Once),
            "per_interceptor_pass" => Some(Self::PerInterceptorPass),
            _ => None,
        }
    }
}
