//! 服务定位器（注册表）实现

use crate::factory;
use crate::proxy::ServiceProxy;
use di_abstractions::{ServiceFactory, ServiceRegistry};
use infrastructure_common::{
    CapabilityKey, DependencyError, DependencyResult, ProviderDescriptor, Scope,
};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info};

/// 进程级默认注册表
static GLOBAL_SERVICE_LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);

/// 注册条目
struct ProviderEntry {
    descriptor: ProviderDescriptor,
    /// 实际类型为 `ServiceFactory<C>`
    factory: Box<dyn Any + Send + Sync>,
}

#[derive(Default)]
struct RegistryState {
    services: HashMap<TypeId, HashMap<String, ProviderEntry>>,
    sealed: bool,
}

impl RegistryState {
    fn check_insertable(&self, capability: &CapabilityKey, qualifier: &str) -> DependencyResult<()> {
        if self.sealed {
            return Err(DependencyError::RegistrySealed {
                capability: capability.name.to_string(),
                qualifier: qualifier.to_string(),
            });
        }
        let exists = self
            .services
            .get(&capability.id)
            .map_or(false, |qualifiers| qualifiers.contains_key(qualifier));
        if exists {
            return Err(DependencyError::duplicate(capability.name, qualifier));
        }
        Ok(())
    }
}

/// 服务定位器
///
/// 能力 → {限定符 → 工厂} 的注册表。可以独立构造（测试中每次新建），
/// 也可以通过 [`ServiceLocator::global`] 使用进程级默认实例。
/// 内部使用读写锁，工厂在锁外调用，构造函数内可以再次解析其他服务。
pub struct ServiceLocator {
    state: RwLock<RegistryState>,
}

impl ServiceLocator {
    /// 创建空注册表
    pub fn new() -> Self {
        Self {
            state: RwLock::new(RegistryState::default()),
        }
    }

    /// 进程级默认注册表，首次访问时创建
    pub fn global() -> &'static ServiceLocator {
        &GLOBAL_SERVICE_LOCATOR
    }

    /// 注册已包装的工厂
    pub fn register<C>(&self, factory: ServiceFactory<C>, qualifier: &str) -> DependencyResult<()>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        let descriptor = ProviderDescriptor::new(CapabilityKey::of::<C>(), qualifier);
        self.insert(descriptor, factory)
    }

    /// 按作用域注册构造函数
    ///
    /// 单例作用域在注册时立即构造实例；若该 (能力, 限定符) 已被占用或注册表已封存，
    /// 不会调用构造函数。
    pub fn register_provider<C, F>(
        &self,
        qualifier: &str,
        scope: Scope,
        constructor: F,
    ) -> DependencyResult<()>
    where
        C: ?Sized + Send + Sync + 'static,
        F: Fn() -> Arc<C> + Send + Sync + 'static,
    {
        let capability = CapabilityKey::of::<C>();
        self.state.read().check_insertable(&capability, qualifier)?;

        let descriptor = ProviderDescriptor::new(capability, qualifier).with_scope(scope);
        self.insert(descriptor, factory::scoped(scope, constructor))
    }

    fn insert<C>(&self, descriptor: ProviderDescriptor, factory: ServiceFactory<C>) -> DependencyResult<()>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        let capability = descriptor.capability;
        let qualifier = descriptor.qualifier.clone();

        let mut state = self.state.write();
        if let Err(e) = state.check_insertable(&capability, &qualifier) {
            error!("注册服务失败: {}", e);
            return Err(e);
        }

        info!(
            "注册服务: {} (限定符: '{}', 作用域: {})",
            capability,
            qualifier,
            descriptor.scope.map_or("unknown", |scope| scope.as_str())
        );
        state.services.entry(capability.id).or_default().insert(
            qualifier,
            ProviderEntry {
                descriptor,
                factory: Box::new(factory),
            },
        );
        Ok(())
    }

    /// 解析实现，未注册时返回 `None`
    pub fn lookup<C>(&self, qualifier: &str) -> Option<Arc<C>>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        let capability = CapabilityKey::of::<C>();
        let factory = {
            let state = self.state.read();
            let Some(entry) = state
                .services
                .get(&capability.id)
                .and_then(|qualifiers| qualifiers.get(qualifier))
            else {
                debug!("未找到服务: {} (限定符: '{}')", capability, qualifier);
                return None;
            };
            match entry.factory.downcast_ref::<ServiceFactory<C>>() {
                Some(factory) => Arc::clone(factory),
                None => {
                    error!("服务工厂类型不匹配: {}", capability);
                    return None;
                }
            }
        };
        Some(factory())
    }

    /// 创建延迟解析代理，不会触发解析
    pub fn proxy<C>(&self, qualifier: impl Into<String>) -> ServiceProxy<'_, C>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        ServiceProxy::new(self, qualifier)
    }

    /// 检查 (能力, 限定符) 是否已注册
    pub fn contains<C>(&self, qualifier: &str) -> bool
    where
        C: ?Sized + 'static,
    {
        self.state
            .read()
            .services
            .get(&TypeId::of::<C>())
            .map_or(false, |qualifiers| qualifiers.contains_key(qualifier))
    }

    /// 已注册条目数量
    pub fn len(&self) -> usize {
        self.state.read().services.values().map(HashMap::len).sum()
    }

    /// 是否没有任何注册条目
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 获取所有已注册提供者，按能力名与限定符排序
    pub fn providers(&self) -> Vec<ProviderDescriptor> {
        let state = self.state.read();
        let mut providers: Vec<ProviderDescriptor> = state
            .services
            .values()
            .flat_map(|qualifiers| qualifiers.values().map(|entry| entry.descriptor.clone()))
            .collect();
        providers.sort_by(|a, b| {
            a.capability
                .name
                .cmp(b.capability.name)
                .then_with(|| a.qualifier.cmp(&b.qualifier))
        });
        providers
    }

    /// 封存注册表，之后的注册全部失败
    pub fn seal(&self) {
        let mut state = self.state.write();
        if !state.sealed {
            state.sealed = true;
            info!("注册表已封存, 共 {} 个服务", state.services.values().map(HashMap::len).sum::<usize>());
        }
    }

    /// 是否已封存
    pub fn is_sealed(&self) -> bool {
        self.state.read().sealed
    }
}

impl Default for ServiceLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ServiceLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceLocator")
            .field("providers", &self.len())
            .field("sealed", &self.is_sealed())
            .finish()
    }
}

impl ServiceRegistry for ServiceLocator {
    fn register<C>(&self, factory: ServiceFactory<C>, qualifier: &str) -> DependencyResult<()>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        ServiceLocator::register(self, factory, qualifier)
    }

    fn lookup<C>(&self, qualifier: &str) -> Option<Arc<C>>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        ServiceLocator::lookup(self, qualifier)
    }

    fn contains<C>(&self, qualifier: &str) -> bool
    where
        C: ?Sized + 'static,
    {
        ServiceLocator::contains::<C>(self, qualifier)
    }

    fn providers(&self) -> Vec<ProviderDescriptor> {
        ServiceLocator::providers(self)
    }
}
