use crate::greeter::Greeter;
use provider_macros::service_provider;

/// 默认实现，每次查找都新建
#[service_provider(dyn Greeter)]
#[derive(Debug, Default)]
pub struct PlainGreeter;

impl Greeter for PlainGreeter {
    fn greet(&self, name: &str) -> String {
        format!("Hello, {}", name)
    }
}
