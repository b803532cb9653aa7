//! 两遍模块发现
//!
//! 第一遍为每个含提供者声明的目录生成聚合清单，第二遍逐个强制加载聚合清单，
//! 由模块加载器完成提供者注册。两遍都完成后才允许查找。

use crate::aggregator::{AggregatorFormat, DEFAULT_AGGREGATOR_FILE_NAME};
use crate::detector::AttributeDetector;
use crate::settings::DiscoverySettings;
use crate::source::FileSystemModuleSource;
use di_abstractions::{Aggregator, ModuleLoader, ModulePathResolver, ModuleSource, ProviderDetector};
use infrastructure_common::{DiscoveryError, DiscoveryResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// 第一遍生成的聚合清单
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedAggregator {
    /// 聚合清单文件路径
    pub location: PathBuf,
    /// 按发现顺序列出的模块名
    pub modules: Vec<String>,
}

/// 第二遍加载结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// 已加载的聚合清单（按遍历顺序）
    pub aggregators: Vec<Aggregator>,
    /// 新注册的提供者数量
    pub providers_registered: usize,
}

impl LoadReport {
    /// 聚合清单列出的模块总数
    pub fn modules_loaded(&self) -> usize {
        self.aggregators.iter().map(|aggregator| aggregator.modules.len()).sum()
    }
}

/// 完整发现结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryReport {
    /// 第一遍生成的聚合清单
    pub generated: Vec<GeneratedAggregator>,
    /// 第二遍加载结果
    pub loaded: LoadReport,
}

/// 提供者发现
pub struct ProviderDiscovery {
    source: Arc<dyn ModuleSource>,
    detector: Box<dyn ProviderDetector>,
    resolver: Box<dyn ModulePathResolver>,
    format: AggregatorFormat,
    aggregator_file_name: String,
    source_extension: String,
}

impl ProviderDiscovery {
    /// 使用文件系统模块源、属性检测器和默认清单格式
    pub fn new(resolver: impl ModulePathResolver + 'static) -> Self {
        Self {
            source: Arc::new(FileSystemModuleSource::new()),
            detector: Box::new(AttributeDetector::new()),
            resolver: Box::new(resolver),
            format: AggregatorFormat::default(),
            aggregator_file_name: DEFAULT_AGGREGATOR_FILE_NAME.to_string(),
            source_extension: "rs".to_string(),
        }
    }

    /// 按配置构造
    pub fn from_settings(settings: &DiscoverySettings) -> Self {
        Self::new(settings.resolver())
            .with_format(settings.aggregator_format)
            .with_aggregator_file_name(settings.aggregator_file_name.as_str())
            .with_source_extension(settings.source_extension.as_str())
    }

    /// 替换模块源
    pub fn with_source(mut self, source: Arc<dyn ModuleSource>) -> Self {
        self.source = source;
        self
    }

    /// 替换提供者检测器
    pub fn with_detector(mut self, detector: impl ProviderDetector + 'static) -> Self {
        self.detector = Box::new(detector);
        self
    }

    /// 聚合清单格式
    pub fn with_format(mut self, format: AggregatorFormat) -> Self {
        self.format = format;
        self
    }

    /// 聚合清单文件名
    pub fn with_aggregator_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.aggregator_file_name = file_name.into();
        self
    }

    /// 参与扫描的源文件扩展名
    pub fn with_source_extension(mut self, extension: impl Into<String>) -> Self {
        self.source_extension = extension.into();
        self
    }

    /// 第一遍：删除旧聚合清单，扫描源文件，为每个命中目录写入新清单
    pub fn generate_aggregators(&self, root: &Path) -> DiscoveryResult<Vec<GeneratedAggregator>> {
        info!("第一遍: 生成聚合清单, 根目录: {}", root.display());

        let mut directories: Vec<(PathBuf, Vec<String>)> = Vec::new();
        let mut index: HashMap<PathBuf, usize> = HashMap::new();

        for entry in self.source.walk(root)? {
            if entry.file_name == self.aggregator_file_name {
                debug!("删除旧聚合清单: {}", entry.path().display());
                self.source.remove(&entry.path())?;
                continue;
            }
            if entry.extension() != Some(self.source_extension.as_str()) {
                continue;
            }

            let path = entry.path();
            let content = self.source.read_to_string(&path)?;
            if !self.detector.declares_provider(&path, &content) {
                continue;
            }

            let slot = *index.entry(entry.directory.clone()).or_insert_with(|| {
                directories.push((entry.directory.clone(), Vec::new()));
                directories.len() - 1
            });
            directories[slot].1.push(entry.module_name().to_string());
        }

        let mut generated = Vec::with_capacity(directories.len());
        for (directory, modules) in directories {
            let location = directory.join(&self.aggregator_file_name);
            self.source.write(&location, &self.format.render(&modules))?;
            debug!("写入聚合清单: {} ({} 个模块)", location.display(), modules.len());
            generated.push(GeneratedAggregator { location, modules });
        }

        info!("第一遍完成, 生成 {} 个聚合清单", generated.len());
        Ok(generated)
    }

    /// 第二遍：解析每个聚合清单的加载路径并强制加载
    pub fn load_aggregators<L>(&self, root: &Path, loader: &L, target: &L::Target) -> DiscoveryResult<LoadReport>
    where
        L: ModuleLoader + ?Sized,
    {
        info!("第二遍: 加载聚合清单, 根目录: {}", root.display());

        let mut report = LoadReport::default();
        for entry in self.source.walk(root)? {
            if entry.file_name != self.aggregator_file_name {
                continue;
            }

            let aggregator = self.read_aggregator(&entry.directory, &entry.path())?;
            debug!("加载包 {} ({} 个模块)", aggregator.package, aggregator.modules.len());
            report.providers_registered += loader.load_module(&aggregator, target)?;
            report.aggregators.push(aggregator);
        }

        info!(
            "第二遍完成, 加载 {} 个聚合清单, 注册 {} 个提供者",
            report.aggregators.len(),
            report.providers_registered
        );
        Ok(report)
    }

    /// 依次执行两遍发现
    pub fn run<L>(&self, root: &Path, loader: &L, target: &L::Target) -> DiscoveryResult<DiscoveryReport>
    where
        L: ModuleLoader + ?Sized,
    {
        let generated = self.generate_aggregators(root)?;
        let loaded = self.load_aggregators(root, loader, target)?;
        Ok(DiscoveryReport { generated, loaded })
    }

    fn read_aggregator(&self, directory: &Path, location: &Path) -> DiscoveryResult<Aggregator> {
        let package = self
            .resolver
            .resolve(directory, self.source.as_ref())
            .ok_or_else(|| DiscoveryError::UnresolvedModule {
                path: location.to_path_buf(),
            })?;

        let content = self.source.read_to_string(location)?;
        let modules = self
            .format
            .parse(location, &content)?
            .iter()
            .map(|module| self.resolver.qualify(&package, module))
            .collect();

        Ok(Aggregator {
            location: location.to_path_buf(),
            package,
            modules,
        })
    }
}
