//! 聚合清单格式

use infrastructure_common::{DiscoveryError, DiscoveryResult};
use serde::Deserialize;
use std::path::Path;

/// 默认聚合清单文件名
pub const DEFAULT_AGGREGATOR_FILE_NAME: &str = "_services.manifest";

/// 聚合清单格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregatorFormat {
    /// 每行一个模块名，忽略空行和 `#` 开头的注释行
    #[default]
    Manifest,
    /// 每行一条 `from . import <模块名>`
    RelativeImport,
}

const RELATIVE_IMPORT_PREFIX: &str = "from . import ";

impl AggregatorFormat {
    /// 按发现顺序生成清单内容
    pub fn render<S: AsRef<str>>(&self, modules: &[S]) -> String {
        let mut content = String::new();
        for module in modules {
            if *self == Self::RelativeImport {
                content.push_str(RELATIVE_IMPORT_PREFIX);
            }
            content.push_str(module.as_ref());
            content.push('\n');
        }
        content
    }

    /// 解析清单内容，返回模块名列表
    pub fn parse(&self, path: &Path, content: &str) -> DiscoveryResult<Vec<String>> {
        let mut modules = Vec::new();
        for (index, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let module = match self {
                Self::Manifest => Some(trimmed),
                Self::RelativeImport => trimmed.strip_prefix(RELATIVE_IMPORT_PREFIX).map(str::trim),
            };
            match module {
                Some(module) if is_module_name(module) => modules.push(module.to_string()),
                _ => {
                    return Err(DiscoveryError::InvalidAggregator {
                        path: path.to_path_buf(),
                        line: index + 1,
                        content: line.to_string(),
                    })
                }
            }
        }
        Ok(modules)
    }

    /// 配置中使用的格式名
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manifest => "manifest",
            Self::RelativeImport => "relative_import",
        }
    }
}

fn is_module_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_alphabetic() => {
            chars.all(|c| c == '_' || c.is_alphanumeric())
        }
        _ => false,
    }
}
