//! 进程级注册表的查找门面

use crate::locator::ServiceLocator;
use crate::proxy::ServiceProxy;
use std::sync::Arc;

/// 查找门面
///
/// 在 [`ServiceLocator::global`] 上执行查找，适用于无法传递注册表引用的调用方。
pub struct ServiceLookup;

impl ServiceLookup {
    /// 解析实现，未注册时返回 `None`
    pub fn lookup<C>(qualifier: &str) -> Option<Arc<C>>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        ServiceLocator::global().lookup::<C>(qualifier)
    }

    /// 创建绑定到进程级注册表的延迟代理
    pub fn proxy<C>(qualifier: impl Into<String>) -> ServiceProxy<'static, C>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        ServiceLocator::global().proxy::<C>(qualifier)
    }
}
