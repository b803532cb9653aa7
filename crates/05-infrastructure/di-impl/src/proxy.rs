//! 延迟解析代理

use crate::locator::ServiceLocator;
use infrastructure_common::{CapabilityKey, DependencyError, DependencyResult};
use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// 延迟解析代理
///
/// 构造时不访问注册表，首次使用时才解析并缓存实例，此后始终转发到该实例。
/// 能力 trait 可以为 `ServiceProxy<'_, dyn Capability>` 显式实现，
/// 每个方法通过 [`ServiceProxy::with`] 委托给已解析的实例。
pub struct ServiceProxy<'r, C>
where
    C: ?Sized + Send + Sync + 'static,
{
    registry: &'r ServiceLocator,
    qualifier: String,
    instance: OnceCell<Arc<C>>,
}

impl<'r, C> ServiceProxy<'r, C>
where
    C: ?Sized + Send + Sync + 'static,
{
    /// 创建代理
    pub fn new(registry: &'r ServiceLocator, qualifier: impl Into<String>) -> Self {
        Self {
            registry,
            qualifier: qualifier.into(),
            instance: OnceCell::new(),
        }
    }

    /// 解析（首次）或返回已缓存的实例
    ///
    /// 注册表中不存在对应实现时返回 `DependencyError::Resolution`，
    /// 失败不会被缓存。
    pub fn resolve(&self) -> DependencyResult<Arc<C>> {
        self.instance
            .get_or_try_init(|| {
                let capability = CapabilityKey::of::<C>();
                match self.registry.lookup::<C>(&self.qualifier) {
                    Some(instance) => {
                        debug!("代理已解析: {} (限定符: '{}')", capability, self.qualifier);
                        Ok(instance)
                    }
                    None => {
                        warn!("代理解析失败: {} (限定符: '{}')", capability, self.qualifier);
                        Err(DependencyError::resolution(capability.name, self.qualifier.as_str()))
                    }
                }
            })
            .map(Arc::clone)
    }

    /// 在已解析的实例上执行操作
    pub fn with<R>(&self, operation: impl FnOnce(&C) -> R) -> DependencyResult<R> {
        let instance = self.resolve()?;
        Ok(operation(&instance))
    }

    /// 是否已经解析
    pub fn is_resolved(&self) -> bool {
        self.instance.get().is_some()
    }

    /// 代理的限定符
    pub fn qualifier(&self) -> &str {
        &self.qualifier
    }

    /// 代理的能力
    pub fn capability(&self) -> CapabilityKey {
        CapabilityKey::of::<C>()
    }
}

impl<C> fmt::Debug for ServiceProxy<'_, C>
where
    C: ?Sized + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceProxy")
            .field("capability", &self.capability().name)
            .field("qualifier", &self.qualifier)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}
