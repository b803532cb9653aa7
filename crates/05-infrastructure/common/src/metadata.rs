//! 元数据定义
//!
//! 提供能力标识与已注册提供者的描述信息

use crate::lifecycle::Scope;
use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// 能力标识
///
/// 能力通常是一个 trait object 类型（如 `dyn Greeter`），按 `TypeId` 区分，
/// 类型名仅用于诊断输出。
#[derive(Debug, Clone, Copy)]
pub struct CapabilityKey {
    /// 类型ID
    pub id: TypeId,
    /// 类型名称
    pub name: &'static str,
}

impl CapabilityKey {
    /// 从类型获取能力标识
    pub fn of<C: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<C>(),
            name: std::any::type_name::<C>(),
        }
    }

    /// 获取简短的类型名称（不包含模块路径）
    pub fn short_name(&self) -> &'static str {
        let name = self.name.trim_start_matches("dyn ");
        name.rsplit("::").next().unwrap_or(name)
    }
}

impl PartialEq for CapabilityKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CapabilityKey {}

impl Hash for CapabilityKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for CapabilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// 已注册提供者的描述符
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderDescriptor {
    /// 能力标识
    pub capability: CapabilityKey,
    /// 限定符
    pub qualifier: String,
    /// 作用域, 直接注册原始工厂时未知
    pub scope: Option<Scope>,
}

impl ProviderDescriptor {
    /// 创建作用域未知的描述
    pub fn new(capability: CapabilityKey, qualifier: impl Into<String>) -> Self {
        Self {
            capability,
            qualifier: qualifier.into(),
            scope: None,
        }
    }

    /// 设置作用域
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }
}
