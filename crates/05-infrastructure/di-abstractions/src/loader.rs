//! 模块加载抽象接口

use infrastructure_common::DiscoveryResult;
use std::path::PathBuf;

/// 已解析的聚合清单
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregator {
    /// 聚合清单文件路径
    pub location: PathBuf,
    /// 所在目录的包加载路径
    pub package: String,
    /// 清单列出的模块加载路径（按发现顺序）
    pub modules: Vec<String>,
}

/// 模块加载器 trait
///
/// 强制加载聚合清单，即加载其列出的每个模块并注册这些模块声明的提供者。
/// 同一加载器对同一模块至多加载一次。
pub trait ModuleLoader: Send + Sync {
    /// 注册的目标（通常是服务注册表）
    type Target: ?Sized;

    /// 加载聚合清单，返回本次新注册的提供者数量
    fn load_module(&self, aggregator: &Aggregator, target: &Self::Target) -> DiscoveryResult<usize>;
}
