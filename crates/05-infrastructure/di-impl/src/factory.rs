//! 作用域工厂包装
//!
//! 原型包装的是构造函数，单例包装的是已经构造好的实例。

use di_abstractions::ServiceFactory;
use infrastructure_common::Scope;
use std::sync::Arc;

/// 原型工厂：每次调用都执行构造函数
pub fn prototype<C, F>(constructor: F) -> ServiceFactory<C>
where
    C: ?Sized + Send + Sync + 'static,
    F: Fn() -> Arc<C> + Send + Sync + 'static,
{
    Arc::new(constructor)
}

/// 单例工厂：始终返回同一个实例
pub fn singleton<C>(instance: Arc<C>) -> ServiceFactory<C>
where
    C: ?Sized + Send + Sync + 'static,
{
    Arc::new(move || Arc::clone(&instance))
}

/// 按作用域包装构造函数
///
/// 单例作用域在此处立即调用一次构造函数。
pub fn scoped<C, F>(scope: Scope, constructor: F) -> ServiceFactory<C>
where
    C: ?Sized + Send + Sync + 'static,
    F: Fn() -> Arc<C> + Send + Sync + 'static,
{
    match scope {
        Scope::Prototype => prototype(constructor),
        Scope::Singleton => singleton(constructor()),
    }
}
