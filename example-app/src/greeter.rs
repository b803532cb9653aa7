//! 问候能力

use di_impl::ServiceProxy;
use infrastructure_common::DependencyResult;

/// 问候能力
pub trait Greeter: Send + Sync {
    fn greet(&self, name: &str) -> String;
}

/// 代理上的问候操作，首次调用时才解析实现
pub trait GreetingService {
    fn greet(&self, name: &str) -> DependencyResult<String>;
}

impl GreetingService for ServiceProxy<'_, dyn Greeter> {
    fn greet(&self, name: &str) -> DependencyResult<String> {
        self.with(|greeter| greeter.greet(name))
    }
}
