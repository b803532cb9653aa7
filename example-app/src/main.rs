//! # 示例应用程序
//!
//! 演示启动时的两遍模块发现，以及之后按能力和限定符查找实现

mod greeter;
mod greeters;

use clap::Parser;
use di_impl::{ServiceLocator, ServiceLookup};
use greeter::{Greeter, GreetingService};
use infrastructure_composition::{AggregatorFormat, DiscoverySettings, LoggingConfig, ServiceBootstrapper};
use std::path::PathBuf;
use tracing::{info, warn};

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "服务定位器示例应用")]
struct Args {
    /// 发现配置文件路径（TOML）
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 扫描根目录，默认为本 crate 的 src 目录
    #[arg(long)]
    root: Option<PathBuf>,

    /// 使用 `from . import` 格式的聚合清单
    #[arg(long)]
    relative_import: bool,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,

    /// 要问候的名字
    #[arg(default_value = "world")]
    name: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut settings = DiscoverySettings::load(args.config.as_deref())?
        .with_root(
            args.root
                .clone()
                .unwrap_or_else(|| PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/src"))),
        );
    if settings.root_module.is_none() {
        settings = settings.with_root_module(env!("CARGO_CRATE_NAME"));
    }
    if args.relative_import {
        settings = settings.with_format(AggregatorFormat::RelativeImport);
    }

    let report = ServiceBootstrapper::new(settings)
        .with_logging(LoggingConfig::default().with_level(args.log_level))
        .bootstrap()?;
    info!(
        "启动完成: {} 个聚合清单, {} 个提供者",
        report.aggregators_written, report.providers_registered
    );

    list_providers();
    demonstrate_lookup(&args.name);
    demonstrate_proxies(&args.name).await?;

    Ok(())
}

/// 列出已注册的提供者
fn list_providers() {
    for descriptor in ServiceLocator::global().providers() {
        info!(
            "提供者: {} '{}' ({})",
            descriptor.capability.short_name(),
            descriptor.qualifier,
            descriptor.scope.map_or("unknown", |scope| scope.as_str())
        );
    }
}

/// 直接查找
fn demonstrate_lookup(name: &str) {
    for qualifier in ["", "loud", "formal", "quiet"] {
        match ServiceLookup::lookup::<dyn Greeter>(qualifier) {
            Some(greeter) => info!("[{}] {}", qualifier, greeter.greet(name)),
            None => warn!("没有限定符为 '{}' 的问候实现", qualifier),
        }
    }
}

/// 多个任务通过延迟代理共享同一单例
async fn demonstrate_proxies(name: &str) -> anyhow::Result<()> {
    let mut handles = Vec::new();
    for task in 0..3 {
        let name = format!("{}-{}", name, task);
        handles.push(tokio::spawn(async move {
            let proxy = ServiceLookup::proxy::<dyn Greeter>("loud");
            proxy.greet(&name)
        }));
    }
    for handle in handles {
        info!("{}", handle.await??);
    }

    let missing = ServiceLookup::proxy::<dyn Greeter>("quiet");
    if let Err(e) = missing.greet(name) {
        warn!("代理解析失败: {}", e);
    }
    Ok(())
}
