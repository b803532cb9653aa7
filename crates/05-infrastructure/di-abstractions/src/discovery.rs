//! 模块源抽象接口
//!
//! 模块发现通过该接口访问宿主的模块/文件系统

use infrastructure_common::DiscoveryResult;
use std::path::{Path, PathBuf};

/// 模块源中的一个文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    /// 所在目录
    pub directory: PathBuf,
    /// 文件名
    pub file_name: String,
}

impl SourceEntry {
    /// 创建新的文件条目
    pub fn new(directory: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            file_name: file_name.into(),
        }
    }

    /// 完整路径
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }

    /// 模块名（去掉扩展名的文件名）
    pub fn module_name(&self) -> &str {
        match self.file_name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => &self.file_name,
        }
    }

    /// 扩展名
    pub fn extension(&self) -> Option<&str> {
        match self.file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => Some(ext),
            _ => None,
        }
    }
}

/// 模块源 trait
pub trait ModuleSource: Send + Sync {
    /// 递归列出根目录下的所有文件，顺序须稳定
    fn walk(&self, root: &Path) -> DiscoveryResult<Vec<SourceEntry>>;

    /// 读取文件文本
    fn read_to_string(&self, path: &Path) -> DiscoveryResult<String>;

    /// 写入文件（覆盖）
    fn write(&self, path: &Path, content: &str) -> DiscoveryResult<()>;

    /// 删除文件
    fn remove(&self, path: &Path) -> DiscoveryResult<()>;

    /// 目录中是否存在指定文件（用于包标记判断）
    fn contains(&self, directory: &Path, file_name: &str) -> bool;
}
