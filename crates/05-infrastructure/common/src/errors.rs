//! 错误类型定义

use std::path::PathBuf;
use thiserror::Error;

/// 服务注册与解析错误类型
#[derive(Error, Debug)]
pub enum DependencyError {
    /// 提供者声明的配置无效（例如作用域取值非法），在声明时立即报告
    #[error("提供者配置无效: {message}")]
    Configuration { message: String },

    /// 同一 (能力, 限定符) 被注册了第二次
    #[error("重复注册: 能力 {capability} 已存在限定符 '{qualifier}' 的实现")]
    DuplicateRegistration {
        capability: String,
        qualifier: String,
    },

    /// 延迟代理首次使用时未能解析到实现
    #[error("服务解析失败: 能力 {capability} 没有限定符 '{qualifier}' 的实现")]
    Resolution {
        capability: String,
        qualifier: String,
    },

    #[error("注册表已封存, 无法注册 {capability} ('{qualifier}')")]
    RegistrySealed {
        capability: String,
        qualifier: String,
    },
}

impl DependencyError {
    /// 创建配置错误
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// 创建重复注册错误
    pub fn duplicate(capability: impl Into<String>, qualifier: impl Into<String>) -> Self {
        Self::DuplicateRegistration {
            capability: capability.into(),
            qualifier: qualifier.into(),
        }
    }

    /// 创建解析错误
    pub fn resolution(capability: impl Into<String>, qualifier: impl Into<String>) -> Self {
        Self::Resolution {
            capability: capability.into(),
            qualifier: qualifier.into(),
        }
    }
}

/// 模块发现错误类型
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("模块源读写失败: {path}, 原因: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("无法确定聚合清单的加载路径: {path}")]
    UnresolvedModule { path: PathBuf },

    #[error("聚合清单无效: {path}, 第 {line} 行: {content}")]
    InvalidAggregator {
        path: PathBuf,
        line: usize,
        content: String,
    },

    /// 聚合清单列出的模块中没有任何已链接的提供者声明
    #[error("模块 {module} 中没有已链接的提供者声明")]
    ModuleNotLinked { module: String },

    #[error("加载模块 {module} 时注册失败: {source}")]
    Registration {
        module: String,
        #[source]
        source: DependencyError,
    },
}

impl DiscoveryError {
    /// 创建 I/O 错误
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// 配置加载错误类型
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: PathBuf },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// 基础设施错误类型
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("依赖注入错误: {source}")]
    DependencyError {
        #[from]
        source: DependencyError,
    },

    #[error("模块发现错误: {source}")]
    DiscoveryError {
        #[from]
        source: DiscoveryError,
    },

    #[error("配置错误: {source}")]
    SettingsError {
        #[from]
        source: SettingsError,
    },

    #[error("基础设施启动失败: {message}")]
    BootstrapFailed { message: String },
}

/// 结果类型别名
pub type DependencyResult<T> = Result<T, DependencyError>;
/// 模块发现结果类型
pub type DiscoveryResult<T> = Result<T, DiscoveryError>;
/// 配置加载结果类型
pub type SettingsResult<T> = Result<T, SettingsError>;
/// 基础设施结果类型
pub type InfrastructureResult<T> = Result<T, InfrastructureError>;
