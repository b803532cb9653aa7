//! # Infrastructure Common
//!
//! 服务定位器各层共享的基础类型。
//!
//! ## 核心类型
//!
//! - [`Scope`] - 提供者作用域（原型 / 单例）
//! - [`CapabilityKey`] - 能力（服务接口）标识
//! - [`ProviderDescriptor`] - 已注册提供者的描述
//! - [`DependencyError`] / [`DiscoveryError`] - 错误类型

pub mod errors;
pub mod lifecycle;
pub mod metadata;

pub use errors::*;
pub use lifecycle::*;
pub use metadata::*;
