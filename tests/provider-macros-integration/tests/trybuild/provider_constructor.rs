use di_impl::ServiceLocator;
use provider_macros::service_provider;

pub trait Store: Send + Sync {
    fn capacity(&self) -> usize;
}

mod stores {
    use super::Store;
    use provider_macros::service_provider;

    #[service_provider(dyn Store, qualifier = "bounded", scope = Singleton, constructor = BoundedStore::with_default_capacity)]
    pub struct BoundedStore {
        capacity: usize,
    }

    impl BoundedStore {
        pub fn with_default_capacity() -> Self {
            Self { capacity: 16 }
        }
    }

    impl Store for BoundedStore {
        fn capacity(&self) -> usize {
            self.capacity
        }
    }
}

#[service_provider(dyn Store, qualifier = "empty", scope = "prototype", constructor = empty_store)]
struct EmptyStore;

fn empty_store() -> EmptyStore {
    EmptyStore
}

impl Store for EmptyStore {
    fn capacity(&self) -> usize {
        0
    }
}

fn main() {
    let registry = ServiceLocator::new();
    for declaration in di_impl::declarations() {
        declaration.register(&registry).unwrap();
    }
    assert_eq!(registry.lookup::<dyn Store>("bounded").unwrap().capacity(), 16);
    assert_eq!(registry.lookup::<dyn Store>("empty").unwrap().capacity(), 0);
}
