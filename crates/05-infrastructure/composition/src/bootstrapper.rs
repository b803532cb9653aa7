//! 服务启动器

use crate::discovery::ProviderDiscovery;
use crate::logging::LoggingConfig;
use crate::settings::DiscoverySettings;
use di_impl::{DeclarationLoader, ServiceLocator};
use infrastructure_common::{InfrastructureError, InfrastructureResult};
use tracing::{error, info};

/// 启动结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    /// 第一遍写入的聚合清单数
    pub aggregators_written: usize,
    /// 第二遍加载的模块数
    pub modules_loaded: usize,
    /// 新注册的提供者数
    pub providers_registered: usize,
    /// 注册表是否已封存
    pub sealed: bool,
}

/// 服务启动器
///
/// 负责在任何查找之前完成模块发现：初始化日志（可选），执行两遍发现，
/// 按配置封存注册表。
#[derive(Debug, Clone)]
pub struct ServiceBootstrapper {
    settings: DiscoverySettings,
    logging: Option<LoggingConfig>,
}

impl ServiceBootstrapper {
    /// 创建新的服务启动器
    pub fn new(settings: DiscoverySettings) -> Self {
        Self {
            settings,
            logging: None,
        }
    }

    /// 启动时初始化日志
    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.logging = Some(config);
        self
    }

    /// 发现配置
    pub fn settings(&self) -> &DiscoverySettings {
        &self.settings
    }

    /// 对进程级注册表执行发现
    pub fn bootstrap(&self) -> InfrastructureResult<BootstrapReport> {
        self.bootstrap_with(ServiceLocator::global(), DeclarationLoader::global())
    }

    /// 对指定注册表执行发现，使用新的加载器
    pub fn bootstrap_into(&self, registry: &ServiceLocator) -> InfrastructureResult<BootstrapReport> {
        self.bootstrap_with(registry, &DeclarationLoader::new())
    }

    /// 使用指定的注册表和加载器执行发现
    pub fn bootstrap_with(
        &self,
        registry: &ServiceLocator,
        loader: &DeclarationLoader,
    ) -> InfrastructureResult<BootstrapReport> {
        if let Some(logging) = &self.logging {
            logging.init()?;
        }

        let root = &self.settings.root;
        info!("开始服务发现, 根目录: {}", root.display());
        if !root.is_dir() {
            error!("扫描根目录不存在: {}", root.display());
            return Err(InfrastructureError::BootstrapFailed {
                message: format!("扫描根目录不存在: {}", root.display()),
            });
        }

        let discovery = ProviderDiscovery::from_settings(&self.settings);
        let report = discovery.run(root, loader, registry).map_err(|e| {
            error!("服务发现失败: {}", e);
            InfrastructureError::from(e)
        })?;

        if self.settings.seal_after_discovery {
            registry.seal();
        }

        let report = BootstrapReport {
            aggregators_written: report.generated.len(),
            modules_loaded: report.loaded.modules_loaded(),
            providers_registered: report.loaded.providers_registered,
            sealed: registry.is_sealed(),
        };
        info!(
            "服务发现完成: {} 个聚合清单, {} 个模块, {} 个提供者",
            report.aggregators_written, report.modules_loaded, report.providers_registered
        );
        Ok(report)
    }
}
