//! 问候能力的实现，由启动时的模块发现注册

pub mod formal;
pub mod loud;
pub mod plain;
