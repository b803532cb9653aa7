//! 聚合清单加载路径解析

use di_abstractions::{ModulePathResolver, ModuleSource};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// 基于包标记文件的解析器
///
/// 从聚合清单所在目录向上查找，直到遇到不是包的目录（基准目录），
/// 基准目录到清单目录的相对路径即包加载路径。基准目录本身也可以是清单目录，
/// 此时包加载路径为空（或为根模块名）。
///
/// 目录含包标记文件即为包；设置了模块文件扩展名时，上级目录中存在同名模块文件
/// （`foo/` 旁的 `foo.rs`）也视为包。
#[derive(Debug, Clone)]
pub struct PackageMarkerResolver {
    marker: String,
    separator: String,
    root_module: Option<String>,
    self_modules: Vec<String>,
    module_file_extension: Option<String>,
}

impl PackageMarkerResolver {
    /// 使用指定的包标记文件和分隔符
    pub fn new(marker: impl Into<String>, separator: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            separator: separator.into(),
            root_module: None,
            self_modules: Vec::new(),
            module_file_extension: None,
        }
    }

    /// Rust 约定：`mod.rs` 或同名的 `foo.rs` 标记模块目录，路径以 `::` 连接
    ///
    /// `mod.rs`、`lib.rs`、`main.rs` 代表所在目录自身的模块。
    pub fn rust(root_module: impl Into<String>) -> Self {
        Self::new("mod.rs", "::")
            .with_root_module(root_module)
            .with_self_modules(["mod", "lib", "main"])
            .with_module_file_extension("rs")
    }

    /// 包目录由 `__init__.py` 标记、以 `.` 连接的约定
    pub fn python() -> Self {
        Self::new("__init__.py", ".").with_self_modules(["__init__"])
    }

    /// 为所有加载路径加上根模块前缀
    pub fn with_root_module(mut self, root_module: impl Into<String>) -> Self {
        let root_module = root_module.into();
        self.root_module = if root_module.is_empty() {
            None
        } else {
            Some(root_module)
        };
        self
    }

    /// 代表所在目录自身的模块名
    pub fn with_self_modules<I, S>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.self_modules = modules.into_iter().map(Into::into).collect();
        self
    }

    /// 上级目录中的 `<目录名>.<扩展名>` 同样标记包目录
    pub fn with_module_file_extension(mut self, extension: impl Into<String>) -> Self {
        self.module_file_extension = Some(extension.into());
        self
    }

    fn is_package(&self, directory: &Path, source: &dyn ModuleSource) -> bool {
        if source.contains(directory, &self.marker) {
            return true;
        }
        let Some(extension) = &self.module_file_extension else {
            return false;
        };
        match (directory.file_name().and_then(|name| name.to_str()), directory.parent()) {
            (Some(name), Some(parent)) => source.contains(parent, &format!("{}.{}", name, extension)),
            _ => false,
        }
    }

    fn join(&self, package: &str, module: &str) -> String {
        match (package.is_empty(), module.is_empty()) {
            (true, _) => module.to_string(),
            (_, true) => package.to_string(),
            _ => format!("{}{}{}", package, self.separator, module),
        }
    }
}

impl ModulePathResolver for PackageMarkerResolver {
    fn resolve(&self, directory: &Path, source: &dyn ModuleSource) -> Option<String> {
        let mut segments = Vec::new();
        let mut current = directory;
        while self.is_package(current, source) {
            let name = current.file_name()?.to_str()?;
            segments.push(name.to_string());
            current = current.parent()?;
        }
        segments.reverse();

        let relative = segments.join(&self.separator);
        let root = self.root_module.as_deref().unwrap_or_default();
        Some(self.join(root, &relative))
    }

    fn qualify(&self, package: &str, module: &str) -> String {
        if self.self_modules.iter().any(|name| name == module) {
            return package.to_string();
        }
        self.join(package, module)
    }
}

/// 显式目录映射解析器
///
/// 由调用方直接给出 目录 → 包加载路径 的映射，未登记的目录无法解析。
#[derive(Debug, Clone)]
pub struct ExplicitModuleMap {
    packages: HashMap<PathBuf, String>,
    separator: String,
}

impl ExplicitModuleMap {
    /// 创建空映射，`separator` 用于连接包路径与模块名
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            packages: HashMap::new(),
            separator: separator.into(),
        }
    }

    /// 登记目录的包加载路径
    pub fn insert(mut self, directory: impl Into<PathBuf>, package: impl Into<String>) -> Self {
        self.packages.insert(directory.into(), package.into());
        self
    }

    /// 已登记的目录数量
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// 是否未登记任何目录
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl ModulePathResolver for ExplicitModuleMap {
    fn resolve(&self, directory: &Path, _source: &dyn ModuleSource) -> Option<String> {
        self.packages.get(directory).cloned()
    }

    fn qualify(&self, package: &str, module: &str) -> String {
        if package.is_empty() {
            module.to_string()
        } else {
            format!("{}{}{}", package, self.separator, module)
        }
    }
}
