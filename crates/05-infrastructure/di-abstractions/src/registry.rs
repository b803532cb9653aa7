//! 服务注册表抽象接口

use crate::factory::ServiceFactory;
use infrastructure_common::{DependencyResult, ProviderDescriptor};
use std::sync::Arc;

/// 服务注册表 trait
///
/// 维护 能力 → {限定符 → 工厂} 的映射。每个 (能力, 限定符) 至多一个条目，
/// 注册只追加，不提供更新或删除。
pub trait ServiceRegistry: Send + Sync {
    /// 注册工厂
    ///
    /// (能力, 限定符) 已存在时返回 `DuplicateRegistration`，原有条目保持不变。
    fn register<C>(&self, factory: ServiceFactory<C>, qualifier: &str) -> DependencyResult<()>
    where
        C: ?Sized + Send + Sync + 'static;

    /// 解析实现
    ///
    /// 能力或限定符未知时返回 `None`（这不是错误）。
    fn lookup<C>(&self, qualifier: &str) -> Option<Arc<C>>
    where
        C: ?Sized + Send + Sync + 'static;

    /// 检查 (能力, 限定符) 是否已注册
    fn contains<C>(&self, qualifier: &str) -> bool
    where
        C: ?Sized + 'static;

    /// 获取所有已注册提供者的描述符
    fn providers(&self) -> Vec<ProviderDescriptor>;
}
