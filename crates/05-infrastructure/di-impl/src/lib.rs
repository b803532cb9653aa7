//! # 服务定位器具体实现
//!
//! 提供注册表、作用域工厂、延迟代理以及提供者声明的收集与加载。
//!
//! ```rust
//! use di_impl::ServiceLocator;
//! use infrastructure_common::Scope;
//! use std::sync::Arc;
//!
//! trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! struct Loud;
//!
//! impl Greeter for Loud {
//!     fn greet(&self) -> String {
//!         "HELLO".into()
//!     }
//! }
//!
//! let locator = ServiceLocator::new();
//! locator
//!     .register_provider::<dyn Greeter, _>("loud", Scope::Singleton, || Arc::new(Loud))
//!     .unwrap();
//!
//! let greeter = locator.lookup::<dyn Greeter>("loud").unwrap();
//! assert_eq!(greeter.greet(), "HELLO");
//! assert!(locator.lookup::<dyn Greeter>("quiet").is_none());
//! ```

pub mod declaration;
pub mod factory;
pub mod loader;
pub mod locator;
pub mod lookup;
pub mod proxy;

pub use declaration::{declarations, ProviderDeclaration, RegisterFn, PROVIDER_DECLARATIONS};
pub use loader::DeclarationLoader;
pub use locator::ServiceLocator;
pub use lookup::ServiceLookup;
pub use proxy::ServiceProxy;

/// `#[service_provider]` 宏展开所需的路径，不属于公开 API
#[doc(hidden)]
pub mod __private {
    pub use infrastructure_common::{DependencyResult, Scope};
    pub use linkme;
    pub use std::sync::Arc;
}
