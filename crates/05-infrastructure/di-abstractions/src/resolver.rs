//! 模块加载路径解析接口
//!
//! 将聚合清单所在目录映射为模块系统可加载的标识

use crate::discovery::ModuleSource;
use std::path::Path;

/// 模块路径解析器 trait
pub trait ModulePathResolver: Send + Sync {
    /// 解析目录对应的包加载路径，无法解析时返回 `None`
    fn resolve(&self, directory: &Path, source: &dyn ModuleSource) -> Option<String>;

    /// 由包加载路径和模块名拼出模块加载路径
    fn qualify(&self, package: &str, module: &str) -> String;
}
