//! 提供者声明检测接口

use std::path::Path;

/// 提供者声明检测器 trait
///
/// 第一遍发现时对每个源文件调用，判断该文件是否声明了至少一个提供者。
pub trait ProviderDetector: Send + Sync {
    /// 检测器名称
    fn name(&self) -> &str;

    /// 源文件是否包含提供者声明
    fn declares_provider(&self, path: &Path, source: &str) -> bool;
}
