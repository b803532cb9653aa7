//! Centralized integration tests for provider-macros crate

use di_impl::{declarations, DeclarationLoader, ProviderDeclaration, ServiceLocator, ServiceProxy};
use infrastructure_common::{DependencyResult, Scope};
use provider_macros::service_provider;
use std::sync::Arc;

pub trait Notifier: Send + Sync {
    fn channel(&self) -> String;
}

/// 通过显式委托让代理实现能力接口
pub trait NotifierService {
    fn channel(&self) -> DependencyResult<String>;
}

impl NotifierService for ServiceProxy<'_, dyn Notifier> {
    fn channel(&self) -> DependencyResult<String> {
        self.with(|notifier| notifier.channel())
    }
}

mod notifiers {
    pub mod email {
        use crate::Notifier;
        use provider_macros::service_provider;

        #[service_provider(dyn Notifier)]
        #[derive(Debug, Default)]
        pub struct EmailNotifier;

        impl Notifier for EmailNotifier {
            fn channel(&self) -> String {
                "email".to_string()
            }
        }
    }

    pub mod sms {
        use crate::Notifier;
        use provider_macros::service_provider;

        #[service_provider(dyn Notifier, qualifier = "sms", scope = Singleton, constructor = SmsNotifier::new)]
        #[derive(Debug)]
        pub struct SmsNotifier {
            gateway: String,
        }

        impl SmsNotifier {
            pub fn new() -> Self {
                Self {
                    gateway: "sms-gateway".to_string(),
                }
            }
        }

        impl Notifier for SmsNotifier {
            fn channel(&self) -> String {
                self.gateway.clone()
            }
        }
    }
}

#[service_provider(dyn Notifier, qualifier = "log", scope = prototype)]
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn channel(&self) -> String {
        "log".to_string()
    }
}

fn find(implementation: &str) -> &'static ProviderDeclaration {
    declarations()
        .find(|declaration| declaration.implementation == implementation)
        .unwrap()
}

#[test]
fn test_declaration_metadata() {
    let email = find("EmailNotifier");
    assert_eq!(email.qualifier, "");
    assert_eq!(email.scope, Scope::Prototype);
    assert_eq!(email.module_path, "integration_tests::notifiers::email");
    assert!(email.capability().ends_with("Notifier"));

    let sms = find("SmsNotifier");
    assert_eq!(sms.qualifier, "sms");
    assert_eq!(sms.scope, Scope::Singleton);
    assert!(sms.is_declared_in("integration_tests::notifiers::sms"));

    let log = find("LogNotifier");
    assert_eq!(log.scope, Scope::Prototype);
    assert_eq!(log.module_path, "integration_tests");
}

#[test]
fn test_struct_is_left_intact() {
    let notifier = notifiers::sms::SmsNotifier::new();
    assert_eq!(notifier.channel(), "sms-gateway");
    assert_eq!(format!("{:?}", notifiers::email::EmailNotifier), "EmailNotifier");
}

#[test]
fn test_declaring_does_not_register() {
    let registry = ServiceLocator::new();
    assert!(registry.is_empty());
    assert!(declarations().count() >= 3);
    assert!(registry.lookup::<dyn Notifier>("sms").is_none());
}

#[test]
fn test_register_all_applies_scopes() {
    let registry = ServiceLocator::new();
    let registered = DeclarationLoader::new().register_all(&registry).unwrap();
    assert_eq!(registered, 3);

    let first = registry.lookup::<dyn Notifier>("").unwrap();
    let second = registry.lookup::<dyn Notifier>("").unwrap();
    assert_eq!(first.channel(), "email");
    assert!(!Arc::ptr_eq(&first, &second));

    let sms = registry.lookup::<dyn Notifier>("sms").unwrap();
    assert!(Arc::ptr_eq(&sms, &registry.lookup::<dyn Notifier>("sms").unwrap()));
    assert_eq!(sms.channel(), "sms-gateway");
}

#[test]
fn test_load_single_module() {
    let registry = ServiceLocator::new();
    let loader = DeclarationLoader::new();

    assert_eq!(loader.load("integration_tests::notifiers::sms", &registry).unwrap(), 1);
    assert_eq!(loader.load("integration_tests::notifiers::sms", &registry).unwrap(), 0);
    assert!(registry.contains::<dyn Notifier>("sms"));
    assert!(!registry.contains::<dyn Notifier>(""));
}

#[test]
fn test_proxy_delegation() {
    let registry = ServiceLocator::new();
    let proxy = registry.proxy::<dyn Notifier>("log");
    assert!(proxy.channel().is_err());

    find("LogNotifier").register(&registry).unwrap();
    assert_eq!(proxy.channel().unwrap(), "log");
    assert!(proxy.is_resolved());
}
