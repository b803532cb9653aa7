//! 服务工厂抽象
//!
//! 注册表中保存的工厂已经按作用域包装好，调用方只需无参调用。

use std::sync::Arc;

/// 服务工厂类型
///
/// 零参数、可重复调用，返回能力 `C` 的一个实例（原型作用域下每次新建，
/// 单例作用域下始终是同一个实例）。
pub type ServiceFactory<C> = Arc<dyn Fn() -> Arc<C> + Send + Sync>;
