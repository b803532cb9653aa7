//! 发现、注册、解析的端到端测试
//!
//! 临时目录中的源文件树与本文件的内联模块一一对应：
//! `pkg/impl_a.rs` ↔ `end_to_end::pkg::impl_a`，`pkg/impl_b.rs` ↔ `end_to_end::pkg::impl_b`。

use di_impl::{DeclarationLoader, ServiceLocator};
use infrastructure_common::{DependencyError, DiscoveryError, InfrastructureError};
use infrastructure_composition::{
    AggregatorFormat, DiscoverySettings, PackageMarkerResolver, ProviderDiscovery, ServiceBootstrapper,
};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

const ROOT_MODULE: &str = "end_to_end";

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

fn next_id() -> usize {
    NEXT_ID.fetch_add(1, Ordering::SeqCst)
}

pub trait Greeter: Send + Sync {
    fn greet(&self) -> String;
    fn id(&self) -> usize;
}

mod pkg {
    pub mod impl_a {
        use crate::{next_id, Greeter};
        use provider_macros::service_provider;

        #[service_provider(dyn Greeter)]
        pub struct GreeterA {
            id: usize,
        }

        impl Default for GreeterA {
            fn default() -> Self {
                Self { id: next_id() }
            }
        }

        impl Greeter for GreeterA {
            fn greet(&self) -> String {
                "hello".to_string()
            }

            fn id(&self) -> usize {
                self.id
            }
        }
    }

    pub mod impl_b {
        use crate::{next_id, Greeter};
        use provider_macros::service_provider;

        #[service_provider(dyn Greeter, qualifier = "loud", scope = Singleton, constructor = GreeterB::new)]
        pub struct GreeterB {
            id: usize,
        }

        impl GreeterB {
            fn new() -> Self {
                Self { id: next_id() }
            }
        }

        impl Greeter for GreeterB {
            fn greet(&self) -> String {
                "HELLO".to_string()
            }

            fn id(&self) -> usize {
                self.id
            }
        }
    }
}

const IMPL_A: &str = r#"
use provider_macros::service_provider;

#[service_provider(dyn Greeter)]
pub struct GreeterA {
    id: usize,
}
"#;

const IMPL_B: &str = r#"
use provider_macros::service_provider;

#[service_provider(dyn Greeter, qualifier = "loud", scope = Singleton, constructor = GreeterB::new)]
pub struct GreeterB {
    id: usize,
}
"#;

fn source_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    let pkg = dir.path().join("pkg");
    fs::create_dir_all(&pkg).unwrap();
    fs::write(pkg.join("mod.rs"), "pub mod impl_a;\npub mod impl_b;\n").unwrap();
    fs::write(pkg.join("impl_a.rs"), IMPL_A).unwrap();
    fs::write(pkg.join("impl_b.rs"), IMPL_B).unwrap();
    dir
}

fn settings(root: &Path) -> DiscoverySettings {
    DiscoverySettings::default()
        .with_root(root)
        .with_root_module(ROOT_MODULE)
}

#[test]
fn test_greeter_scenario() {
    let tree = source_tree();
    let registry = ServiceLocator::new();

    let report = ServiceBootstrapper::new(settings(tree.path()))
        .bootstrap_into(&registry)
        .unwrap();
    assert_eq!(report.aggregators_written, 1);
    assert_eq!(report.modules_loaded, 2);
    assert_eq!(report.providers_registered, 2);
    assert!(report.sealed);

    // PROTOTYPE: 每次查找都是新实例
    let first = registry.lookup::<dyn Greeter>("").unwrap();
    let second = registry.lookup::<dyn Greeter>("").unwrap();
    assert_eq!(first.greet(), "hello");
    assert!(!Arc::ptr_eq(&first, &second));
    assert_ne!(first.id(), second.id());

    // SINGLETON: 每次查找都是同一实例
    let loud = registry.lookup::<dyn Greeter>("loud").unwrap();
    let again = registry.lookup::<dyn Greeter>("loud").unwrap();
    assert_eq!(loud.greet(), "HELLO");
    assert!(Arc::ptr_eq(&loud, &again));
    assert_eq!(loud.id(), again.id());

    assert!(registry.lookup::<dyn Greeter>("quiet").is_none());

    let manifest = fs::read_to_string(tree.path().join("pkg/_services.manifest")).unwrap();
    assert_eq!(manifest, "impl_a\nimpl_b\n");
}

#[test]
fn test_proxy_created_before_discovery() {
    let tree = source_tree();
    let registry = ServiceLocator::new();
    let proxy = registry.proxy::<dyn Greeter>("loud");
    assert!(!proxy.is_resolved());

    ServiceBootstrapper::new(settings(tree.path()))
        .bootstrap_into(&registry)
        .unwrap();

    let greeting = proxy.with(|greeter| greeter.greet()).unwrap();
    assert_eq!(greeting, "HELLO");
    assert!(Arc::ptr_eq(
        &proxy.resolve().unwrap(),
        &registry.lookup::<dyn Greeter>("loud").unwrap()
    ));

    let missing = registry.proxy::<dyn Greeter>("quiet");
    assert!(matches!(
        missing.resolve(),
        Err(DependencyError::Resolution { .. })
    ));
}

#[test]
fn test_discovery_twice_is_idempotent() {
    let tree = source_tree();
    let registry = ServiceLocator::new();
    let loader = DeclarationLoader::new();
    let discovery = ProviderDiscovery::new(PackageMarkerResolver::rust(ROOT_MODULE));

    let first = discovery.run(tree.path(), &loader, &registry).unwrap();
    let second = discovery.run(tree.path(), &loader, &registry).unwrap();

    assert_eq!(first.generated, second.generated);
    assert_eq!(first.loaded.providers_registered, 2);
    assert_eq!(second.loaded.providers_registered, 0);
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_second_registration_source_is_rejected() {
    let tree = source_tree();
    let registry = ServiceLocator::new();
    let discovery = ProviderDiscovery::new(PackageMarkerResolver::rust(ROOT_MODULE));

    discovery.run(tree.path(), &DeclarationLoader::new(), &registry).unwrap();
    let loud = registry.lookup::<dyn Greeter>("loud").unwrap();

    // 新的加载器不知道模块已加载过，注册表仍然拒绝重复注册
    let err = discovery
        .run(tree.path(), &DeclarationLoader::new(), &registry)
        .unwrap_err();
    match err {
        DiscoveryError::Registration { module, source } => {
            assert_eq!(module, "end_to_end::pkg::impl_a");
            assert!(matches!(source, DependencyError::DuplicateRegistration { .. }));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(Arc::ptr_eq(&loud, &registry.lookup::<dyn Greeter>("loud").unwrap()));
}

#[test]
fn test_relative_import_aggregators() {
    let tree = source_tree();
    let registry = ServiceLocator::new();
    let settings = DiscoverySettings {
        aggregator_file_name: "_services.py".to_string(),
        ..settings(tree.path())
    }
    .with_format(AggregatorFormat::RelativeImport);

    let report = ServiceBootstrapper::new(settings).bootstrap_into(&registry).unwrap();
    assert_eq!(report.providers_registered, 2);

    let aggregator = fs::read_to_string(tree.path().join("pkg/_services.py")).unwrap();
    assert_eq!(aggregator, "from . import impl_a\nfrom . import impl_b\n");
}

#[test]
fn test_sealed_registry_rejects_late_registration() {
    let tree = source_tree();
    let registry = ServiceLocator::new();
    ServiceBootstrapper::new(settings(tree.path()))
        .bootstrap_into(&registry)
        .unwrap();

    let loader = DeclarationLoader::new();
    let err = loader.register_all(&registry).unwrap_err();
    assert!(matches!(
        err,
        DiscoveryError::Registration {
            source: DependencyError::RegistrySealed { .. },
            ..
        }
    ));
}

#[test]
fn test_unlinked_module_fails_discovery() {
    let tree = source_tree();
    let registry = ServiceLocator::new();
    let settings = settings(tree.path()).with_root_module("elsewhere");

    let err = ServiceBootstrapper::new(settings)
        .bootstrap_into(&registry)
        .unwrap_err();
    match err {
        InfrastructureError::DiscoveryError {
            source: DiscoveryError::ModuleNotLinked { module },
        } => assert_eq!(module, "elsewhere::pkg::impl_a"),
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(registry.is_empty());
    assert!(!registry.is_sealed());
}

#[test]
fn test_missing_root_is_reported() {
    let tree = source_tree();
    let settings = settings(&tree.path().join("absent"));
    let err = ServiceBootstrapper::new(settings)
        .bootstrap_into(&ServiceLocator::new())
        .unwrap_err();
    assert!(matches!(err, InfrastructureError::BootstrapFailed { .. }));
}
