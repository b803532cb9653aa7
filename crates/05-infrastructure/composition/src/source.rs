//! 基于文件系统的模块源

use di_abstractions::{ModuleSource, SourceEntry};
use infrastructure_common::{DiscoveryError, DiscoveryResult};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// 文件系统模块源
///
/// 按文件名排序深度优先遍历，两次遍历同一棵树得到相同的顺序。
#[derive(Debug, Clone, Default)]
pub struct FileSystemModuleSource {
    follow_links: bool,
}

impl FileSystemModuleSource {
    /// 不跟随符号链接
    pub fn new() -> Self {
        Self::default()
    }

    /// 是否跟随符号链接
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }
}

impl ModuleSource for FileSystemModuleSource {
    fn walk(&self, root: &Path) -> DiscoveryResult<Vec<SourceEntry>> {
        let mut entries = Vec::new();
        let walker = WalkDir::new(root)
            .follow_links(self.follow_links)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root).to_path_buf();
                DiscoveryError::io(path, e.into())
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(directory) = entry.path().parent() else {
                continue;
            };
            entries.push(SourceEntry::new(
                directory,
                entry.file_name().to_string_lossy().into_owned(),
            ));
        }
        Ok(entries)
    }

    fn read_to_string(&self, path: &Path) -> DiscoveryResult<String> {
        fs::read_to_string(path).map_err(|e| DiscoveryError::io(path, e))
    }

    fn write(&self, path: &Path, content: &str) -> DiscoveryResult<()> {
        fs::write(path, content).map_err(|e| DiscoveryError::io(path, e))
    }

    fn remove(&self, path: &Path) -> DiscoveryResult<()> {
        fs::remove_file(path).map_err(|e| DiscoveryError::io(path, e))
    }

    fn contains(&self, directory: &Path, file_name: &str) -> bool {
        directory.join(file_name).is_file()
    }
}
