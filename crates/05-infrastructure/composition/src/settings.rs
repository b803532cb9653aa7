//! 模块发现配置

use crate::aggregator::{AggregatorFormat, DEFAULT_AGGREGATOR_FILE_NAME};
use crate::resolver::PackageMarkerResolver;
use infrastructure_common::{SettingsError, SettingsResult};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// 环境变量前缀
pub const ENV_PREFIX: &str = "SERVICE_LOCATOR";

/// 模块发现配置
///
/// 依次叠加：默认值、可选的 TOML 文件、`SERVICE_LOCATOR_` 开头的环境变量
/// （例如 `SERVICE_LOCATOR_AGGREGATOR_FORMAT=relative_import`）。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DiscoverySettings {
    /// 扫描根目录
    pub root: PathBuf,
    /// 聚合清单文件名
    pub aggregator_file_name: String,
    /// 聚合清单格式
    pub aggregator_format: AggregatorFormat,
    /// 参与扫描的源文件扩展名
    pub source_extension: String,
    /// 包标记文件名
    pub package_marker: String,
    /// 模块路径分隔符
    pub module_separator: String,
    /// 根模块名（通常是 crate 名）
    pub root_module: Option<String>,
    /// 发现完成后是否封存注册表
    pub seal_after_discovery: bool,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("src"),
            aggregator_file_name: DEFAULT_AGGREGATOR_FILE_NAME.to_string(),
            aggregator_format: AggregatorFormat::Manifest,
            source_extension: "rs".to_string(),
            package_marker: "mod.rs".to_string(),
            module_separator: "::".to_string(),
            root_module: None,
            seal_after_discovery: true,
        }
    }
}

impl DiscoverySettings {
    /// 从可选配置文件和进程环境变量加载
    pub fn load(file: Option<&Path>) -> SettingsResult<Self> {
        Self::load_with(file, Self::environment())
    }

    /// 从可选配置文件和给定的环境变量集合加载
    pub fn load_from_env(file: Option<&Path>, variables: HashMap<String, String>) -> SettingsResult<Self> {
        Self::load_with(file, Self::environment().source(Some(variables)))
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn load_with(file: Option<&Path>, environment: config::Environment) -> SettingsResult<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            if !path.is_file() {
                error!("配置文件不存在: {}", path.display());
                return Err(SettingsError::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            debug!("加载发现配置文件: {}", path.display());
            builder = builder.add_source(config::File::from(path).format(config::FileFormat::Toml));
        }

        let settings = builder.add_source(environment).build().map_err(|e| {
            error!("配置构建失败: {}", e);
            SettingsError::ParseError { source: Box::new(e) }
        })?;

        settings.try_deserialize().map_err(|e| {
            error!("配置绑定失败: {}", e);
            SettingsError::ParseError { source: Box::new(e) }
        })
    }

    /// 设置扫描根目录
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// 设置根模块名
    pub fn with_root_module(mut self, root_module: impl Into<String>) -> Self {
        self.root_module = Some(root_module.into());
        self
    }

    /// 设置聚合清单格式
    pub fn with_format(mut self, format: AggregatorFormat) -> Self {
        self.aggregator_format = format;
        self
    }

    /// 设置发现后是否封存注册表
    pub fn seal_after_discovery(mut self, seal: bool) -> Self {
        self.seal_after_discovery = seal;
        self
    }

    /// 按配置构造包标记解析器
    pub fn resolver(&self) -> PackageMarkerResolver {
        let root_module = self.root_module.clone().unwrap_or_default();
        if self.package_marker == "mod.rs" && self.module_separator == "::" {
            return PackageMarkerResolver::rust(root_module);
        }

        let marker_module = Path::new(&self.package_marker)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        PackageMarkerResolver::new(self.package_marker.as_str(), self.module_separator.as_str())
            .with_root_module(root_module)
            .with_self_modules([marker_module])
    }
}
