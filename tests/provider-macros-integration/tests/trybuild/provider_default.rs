use di_impl::{DeclarationLoader, ServiceLocator};
use provider_macros::service_provider;

pub trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

#[service_provider(dyn Clock)]
#[derive(Default)]
struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        7
    }
}

fn main() {
    let registry = ServiceLocator::new();
    DeclarationLoader::new().register_all(&registry).unwrap();
    assert_eq!(registry.lookup::<dyn Clock>("").unwrap().now(), 7);
}
