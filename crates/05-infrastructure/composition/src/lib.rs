//! # 服务发现组合层
//!
//! 把模块源、声明检测、路径解析和声明加载组合成完整的两遍发现流程，
//! 并提供配置加载、日志初始化和启动器。
//!
//! ## 主要功能
//!
//! - **第一遍**: 为每个含 `#[service_provider]` 声明的目录生成聚合清单
//! - **第二遍**: 解析聚合清单的模块路径并注册其中模块的提供者
//! - **配置**: `config` 读取默认值、TOML 文件和环境变量
//! - **启动器**: 发现完成后按需封存注册表
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use infrastructure_composition::{DiscoverySettings, LoggingConfig, ServiceBootstrapper};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = DiscoverySettings::load(None)?
//!         .with_root("src")
//!         .with_root_module("my_app");
//!
//!     let report = ServiceBootstrapper::new(settings)
//!         .with_logging(LoggingConfig::development())
//!         .bootstrap()?;
//!     println!("注册了 {} 个提供者", report.providers_registered);
//!     Ok(())
//! }
//! ```

pub mod aggregator;
pub mod bootstrapper;
pub mod detector;
pub mod discovery;
pub mod logging;
pub mod resolver;
pub mod settings;
pub mod source;

pub use aggregator::{AggregatorFormat, DEFAULT_AGGREGATOR_FILE_NAME};
pub use bootstrapper::{BootstrapReport, ServiceBootstrapper};
pub use detector::AttributeDetector;
pub use discovery::{DiscoveryReport, GeneratedAggregator, LoadReport, ProviderDiscovery};
pub use logging::LoggingConfig;
pub use resolver::{ExplicitModuleMap, PackageMarkerResolver};
pub use settings::DiscoverySettings;
pub use source::FileSystemModuleSource;

// 重新导出错误类型
pub use infrastructure_common::InfrastructureError;
