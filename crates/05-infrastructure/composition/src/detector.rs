//! 提供者声明检测

use di_abstractions::ProviderDetector;
use std::path::Path;
use syn::{Attribute, Item};
use tracing::{debug, warn};

/// 默认检测的属性名
pub const DEFAULT_PROVIDER_ATTRIBUTE: &str = "service_provider";

/// 基于语法树的属性检测器
///
/// 用 `syn` 解析 Rust 源文件，查找带有提供者属性的结构体（含内联模块中的结构体）。
/// 属性按路径最后一段匹配，`#[service_provider]` 与 `#[provider_macros::service_provider]` 等价。
/// 无法解析的文件视为不含声明。
#[derive(Debug, Clone)]
pub struct AttributeDetector {
    attribute: String,
}

impl AttributeDetector {
    /// 检测 `#[service_provider]`
    pub fn new() -> Self {
        Self::with_attribute(DEFAULT_PROVIDER_ATTRIBUTE)
    }

    /// 检测自定义属性名
    pub fn with_attribute(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
        }
    }

    fn is_provider_attribute(&self, attribute: &Attribute) -> bool {
        attribute
            .path()
            .segments
            .last()
            .map_or(false, |segment| segment.ident == self.attribute.as_str())
    }

    fn contains_provider(&self, items: &[Item]) -> bool {
        items.iter().any(|item| match item {
            Item::Struct(item) => item.attrs.iter().any(|attr| self.is_provider_attribute(attr)),
            Item::Mod(module) => module
                .content
                .as_ref()
                .map_or(false, |(_, items)| self.contains_provider(items)),
            _ => false,
        })
    }
}

impl Default for AttributeDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderDetector for AttributeDetector {
    fn name(&self) -> &str {
        &self.attribute
    }

    fn declares_provider(&self, path: &Path, source: &str) -> bool {
        match syn::parse_file(source) {
            Ok(file) => {
                let found = self.contains_provider(&file.items);
                if found {
                    debug!("发现提供者声明: {}", path.display());
                }
                found
            }
            Err(e) => {
                warn!("源文件解析失败, 跳过: {} ({})", path.display(), e);
                false
            }
        }
    }
}
