//! 多目录、多层嵌套下的发现完整性

use di_impl::{DeclarationLoader, ServiceLocator};
use infrastructure_composition::{PackageMarkerResolver, ProviderDiscovery};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

pub trait Plugin: Send + Sync {
    fn name(&self) -> &'static str;
}

macro_rules! plugin {
    ($ty:ident, $name:literal) => {
        impl crate::Plugin for $ty {
            fn name(&self) -> &'static str {
                $name
            }
        }
    };
}

mod alpha {
    pub mod one {
        use crate::Plugin;
        use provider_macros::service_provider;

        #[service_provider(dyn Plugin, qualifier = "one")]
        #[derive(Default)]
        pub struct One;
        plugin!(One, "one");
    }

    pub mod two {
        use crate::Plugin;
        use provider_macros::service_provider;

        #[service_provider(dyn Plugin, qualifier = "two", scope = Singleton)]
        #[derive(Default)]
        pub struct Two;
        plugin!(Two, "two");
    }

    pub mod nested {
        pub mod three {
            use crate::Plugin;
            use provider_macros::service_provider;

            #[service_provider(dyn Plugin, qualifier = "three")]
            #[derive(Default)]
            pub struct Three;
            plugin!(Three, "three");
        }
    }
}

mod beta {
    pub mod four {
        use crate::Plugin;
        use provider_macros::service_provider;

        #[service_provider(dyn Plugin, qualifier = "four", scope = Singleton)]
        #[derive(Default)]
        pub struct Four;
        plugin!(Four, "four");
    }
}

mod inline {
    pub mod host {
        pub mod inner {
            use crate::Plugin;
            use provider_macros::service_provider;

            #[service_provider(dyn Plugin, qualifier = "inline")]
            #[derive(Default)]
            pub struct Inner;
            plugin!(Inner, "inline");
        }
    }
}

mod modern {
    pub mod loud {
        use crate::Plugin;
        use provider_macros::service_provider;

        #[service_provider(dyn Plugin, qualifier = "modern", scope = Singleton)]
        #[derive(Default)]
        pub struct Loud;
        plugin!(Loud, "modern");
    }
}

fn provider_source(name: &str) -> String {
    format!(
        "#[service_provider(dyn Plugin, qualifier = \"{}\")]\n#[derive(Default)]\npub struct Provider;\n",
        name
    )
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn source_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "alpha/mod.rs", "pub mod one;\npub mod two;\npub mod nested;\n");
    write(root, "alpha/one.rs", &provider_source("one"));
    write(root, "alpha/two.rs", &provider_source("two"));
    write(root, "alpha/util.rs", "pub fn helper() {}\n");
    write(root, "alpha/nested/mod.rs", "pub mod three;\n");
    write(root, "alpha/nested/three.rs", &provider_source("three"));
    write(root, "beta/mod.rs", "pub mod four;\n");
    write(root, "beta/four.rs", &provider_source("four"));
    write(root, "gamma/mod.rs", "pub struct Nothing;\n");
    dir
}

#[test]
fn test_every_declaring_file_is_registered_once() {
    let tree = source_tree();
    let registry = ServiceLocator::new();
    let loader = DeclarationLoader::new();
    let discovery = ProviderDiscovery::new(PackageMarkerResolver::rust("discovery_completeness"));

    let report = discovery.run(tree.path(), &loader, &registry).unwrap();

    // 三个目录含声明：alpha、alpha/nested、beta
    assert_eq!(report.generated.len(), 3);
    let modules: Vec<Vec<String>> = report
        .generated
        .iter()
        .map(|aggregator| aggregator.modules.clone())
        .collect();
    assert!(modules.contains(&vec!["one".to_string(), "two".to_string()]));
    assert!(modules.contains(&vec!["three".to_string()]));
    assert!(modules.contains(&vec!["four".to_string()]));
    assert!(!tree.path().join("gamma/_services.manifest").exists());

    assert_eq!(report.loaded.providers_registered, 4);
    assert_eq!(registry.len(), 4);
    for name in ["one", "two", "three", "four"] {
        let plugin = registry.lookup::<dyn Plugin>(name).unwrap();
        assert_eq!(plugin.name(), name);
    }
}

#[test]
fn test_qualified_module_paths() {
    let tree = source_tree();
    let registry = ServiceLocator::new();
    let loader = DeclarationLoader::new();
    let discovery = ProviderDiscovery::new(PackageMarkerResolver::rust("discovery_completeness"));

    let report = discovery.run(tree.path(), &loader, &registry).unwrap();
    let packages: Vec<&str> = report
        .loaded
        .aggregators
        .iter()
        .map(|aggregator| aggregator.package.as_str())
        .collect();
    assert_eq!(
        packages,
        vec![
            "discovery_completeness::alpha",
            "discovery_completeness::alpha::nested",
            "discovery_completeness::beta",
        ]
    );
    assert!(loader.is_loaded("discovery_completeness::alpha::nested::three"));

    let descriptors = registry.providers();
    let qualifiers: Vec<&str> = descriptors.iter().map(|d| d.qualifier.as_str()).collect();
    assert_eq!(qualifiers, vec!["four", "one", "three", "two"]);
}

#[test]
fn test_stale_aggregators_are_replaced() {
    let tree = source_tree();
    write(tree.path(), "gamma/_services.manifest", "ghost\n");
    write(tree.path(), "alpha/_services.manifest", "ghost\n");

    let discovery = ProviderDiscovery::new(PackageMarkerResolver::rust("discovery_completeness"));
    let generated = discovery.generate_aggregators(tree.path()).unwrap();

    assert_eq!(generated.len(), 3);
    assert!(!tree.path().join("gamma/_services.manifest").exists());
    let alpha = fs::read_to_string(tree.path().join("alpha/_services.manifest")).unwrap();
    assert_eq!(alpha, "one\ntwo\n");
}

#[test]
fn test_providers_in_inline_modules_are_registered() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "inline/mod.rs", "pub mod host;\n");
    write(
        dir.path(),
        "inline/host.rs",
        "pub mod inner {\n    #[service_provider(dyn Plugin, qualifier = \"inline\")]\n    #[derive(Default)]\n    pub struct Inner;\n}\n",
    );

    let registry = ServiceLocator::new();
    let loader = DeclarationLoader::new();
    let discovery = ProviderDiscovery::new(PackageMarkerResolver::rust("discovery_completeness"));
    let report = discovery.run(dir.path(), &loader, &registry).unwrap();

    assert_eq!(report.loaded.aggregators[0].modules, vec!["discovery_completeness::inline::host"]);
    assert_eq!(report.loaded.providers_registered, 1);
    assert_eq!(registry.lookup::<dyn Plugin>("inline").unwrap().name(), "inline");
}

#[test]
fn test_module_file_layout_is_resolved() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "modern.rs", "pub mod loud;\n");
    write(dir.path(), "modern/loud.rs", &provider_source("modern"));

    let registry = ServiceLocator::new();
    let loader = DeclarationLoader::new();
    let discovery = ProviderDiscovery::new(PackageMarkerResolver::rust("discovery_completeness"));
    let report = discovery.run(dir.path(), &loader, &registry).unwrap();

    assert_eq!(report.generated.len(), 1);
    assert_eq!(report.loaded.aggregators[0].package, "discovery_completeness::modern");
    assert_eq!(report.loaded.aggregators[0].modules, vec!["discovery_completeness::modern::loud"]);
    let loud = registry.lookup::<dyn Plugin>("modern").unwrap();
    assert!(Arc::ptr_eq(&loud, &registry.lookup::<dyn Plugin>("modern").unwrap()));
}
