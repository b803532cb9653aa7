//! # Dependency Injection Abstractions
//!
//! 服务定位器的抽象层，定义注册表与模块发现各协作方的接口。
//!
//! ## 核心接口
//!
//! - [`ServiceRegistry`] - 服务注册表接口
//! - [`ServiceFactory`] - 已按作用域包装的零参数工厂
//! - [`ModuleSource`] - 模块源（文件树）接口
//! - [`ProviderDetector`] - 提供者声明检测接口
//! - [`ModulePathResolver`] - 聚合清单加载路径解析接口
//! - [`ModuleLoader`] - 模块强制加载接口

pub mod registry;
pub mod scanner;
pub mod resolver;
pub mod factory;
pub mod discovery;
pub mod loader;

pub use registry::*;
pub use scanner::*;
pub use resolver::*;
pub use factory::*;
pub use discovery::*;
pub use loader::*;
