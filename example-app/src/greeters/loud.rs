use crate::greeter::Greeter;
use provider_macros::service_provider;
use std::sync::atomic::{AtomicUsize, Ordering};

#[service_provider(dyn Greeter, qualifier = "loud", scope = Singleton)]
#[derive(Debug, Default)]
pub struct LoudGreeter {
    greeted: AtomicUsize,
}

impl Greeter for LoudGreeter {
    fn greet(&self, name: &str) -> String {
        let count = self.greeted.fetch_add(1, Ordering::Relaxed) + 1;
        format!("HELLO, {}! (#{})", name.to_uppercase(), count)
    }
}
