//! 提供者作用域

use crate::errors::DependencyError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// 提供者作用域
///
/// 决定注册表每次解析时是构造新实例还是返回共享实例。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// 原型模式 - 每次解析都调用构造函数
    #[default]
    Prototype,
    /// 单例模式 - 注册时构造一次, 之后始终返回同一实例
    Singleton,
}

impl Scope {
    /// 作用域的规范名称
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Prototype => "prototype",
            Self::Singleton => "singleton",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = DependencyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "prototype" => Ok(Self::Prototype),
            "singleton" => Ok(Self::Singleton),
            other => Err(DependencyError::configuration(format!(
                "作用域取值 '{}' 无效, 只能是 prototype 或 singleton",
                other
            ))),
        }
    }
}
