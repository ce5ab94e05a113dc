//! # 示例应用程序
//!
//! 演示如何使用 Lorn IoC 从定义文件装配对象图

mod domain;

use anyhow::Context;
use clap::Parser;
use config_impl::ContextConfigBinder;
use di_abstractions::ApplicationContext;
use domain::{InitLoggingPostProcessor, MailSender, MailService, SecureMailPostProcessor, UserService};
use ioc_common::PostConstructPolicy;
use ioc_composition::{ApplicationContextBuilder, LoggingConfig};
use std::path::PathBuf;
use tracing::{info, warn};

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "Lorn IoC 示例应用")]
struct Args {
    /// 容器配置文件路径
    #[arg(short, long, default_value = "config/context.toml")]
    config: PathBuf,

    /// 额外的 Bean 定义文件，在配置声明的文件之前读取
    #[arg(short, long)]
    definitions: Vec<PathBuf>,

    /// 初始化回调策略: once | per-interceptor-pass
    #[arg(long)]
    policy: Option<String>,

    /// 日志级别，覆盖配置文件
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = ContextConfigBinder::new()
        .with_optional_file(&args.config)
        .load()
        .with_context(|| format!("加载配置失败: {}", args.config.display()))?;
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }

    let logging = LoggingConfig::from_settings(&config.logging)?;

    let mut builder = ApplicationContextBuilder::new()
        .with_logging(logging)
        .register_type::<MailService>()
        .register_type::<UserService>()
        .register_type::<SecureMailPostProcessor>()
        .register_type::<InitLoggingPostProcessor>();

    for path in &args.definitions {
        builder = builder.add_definitions_file(path);
    }
    if let Some(policy) = &args.policy {
        let policy = PostConstructPolicy::parse(policy)
            .with_context(|| format!("未知的初始化回调策略: {}", policy))?;
        builder = builder.with_post_construct_policy(policy);
    }

    let context = builder.with_config(config).build()?;
    info!(
        "应用上下文 {} 启动于 {}，共 {} 个 Bean",
        context.id(),
        context.startup_date(),
        context.bean_count()
    );

    demonstrate_lookup(&context)?;
    Ok(())
}

/// 演示各种查询方式
fn demonstrate_lookup(context: &impl ApplicationContext) -> anyhow::Result<()> {
    for key in context.bean_names() {
        info!("Bean {}: {:?}", key, context.lifecycle_state(&key));
    }

    for (key, sender) in context.get_beans_of_type::<dyn MailSender>() {
        info!("邮件服务 {} 使用协议 {}", key, sender.read().protocol());
    }

    match context.get_bean_of_type::<dyn MailSender>() {
        Ok(Some(sender)) => info!("唯一的邮件服务: {}", sender.read().protocol()),
        Ok(None) => warn!("没有邮件服务"),
        Err(e) => warn!("{}", e),
    }

    if let Some(users) = context.get_bean_of_type::<UserService>()? {
        match users.read().welcome("alice@example.com") {
            Some(receipt) => info!("{}", receipt),
            None => warn!("用户服务没有注入邮件服务"),
        }
    }

    Ok(())
}
