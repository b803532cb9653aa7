//! 提供者声明
//!
//! `#[service_provider]` 宏为每个实现生成一个 [`ProviderDeclaration`]，
//! 链接期收集到 [`PROVIDER_DECLARATIONS`]。声明本身不注册任何东西，
//! 注册由模块加载器显式执行。

use crate::locator::ServiceLocator;
use infrastructure_common::{DependencyResult, Scope};
use linkme::distributed_slice;
use std::fmt;

/// 将声明注册到注册表的函数
pub type RegisterFn = fn(&ServiceLocator, &ProviderDeclaration) -> DependencyResult<()>;

/// 链接进当前程序的全部提供者声明
#[distributed_slice]
pub static PROVIDER_DECLARATIONS: [ProviderDeclaration] = [..];

/// 提供者声明
pub struct ProviderDeclaration {
    /// 限定符
    pub qualifier: &'static str,
    /// 作用域
    pub scope: Scope,
    /// 声明所在模块（`module_path!()`）
    pub module_path: &'static str,
    /// 实现类型名
    pub implementation: &'static str,
    capability: fn() -> &'static str,
    register: RegisterFn,
}

impl ProviderDeclaration {
    /// 由 `#[service_provider]` 展开调用
    pub const fn new(
        qualifier: &'static str,
        scope: Scope,
        module_path: &'static str,
        implementation: &'static str,
        capability: fn() -> &'static str,
        register: RegisterFn,
    ) -> Self {
        Self {
            qualifier,
            scope,
            module_path,
            implementation,
            capability,
            register,
        }
    }

    /// 能力类型名
    pub fn capability(&self) -> &'static str {
        (self.capability)()
    }

    /// 将该声明注册到注册表
    pub fn register(&self, registry: &ServiceLocator) -> DependencyResult<()> {
        (self.register)(registry, self)
    }

    /// 声明是否位于指定模块
    pub fn is_declared_in(&self, module_path: &str) -> bool {
        self.module_path == module_path
    }

    /// 声明是否属于指定模块，包括其中的内联子模块
    pub fn belongs_to(&self, module_path: &str) -> bool {
        self.module_path
            .strip_prefix(module_path)
            .map_or(false, |rest| rest.is_empty() || rest.starts_with("::"))
    }
}

impl fmt::Debug for ProviderDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderDeclaration")
            .field("capability", &self.capability())
            .field("qualifier", &self.qualifier)
            .field("scope", &self.scope)
            .field("module_path", &self.module_path)
            .field("implementation", &self.implementation)
            .finish()
    }
}

/// 遍历所有已链接的声明
pub fn declarations() -> impl Iterator<Item = &'static ProviderDeclaration> {
    PROVIDER_DECLARATIONS.iter()
}
