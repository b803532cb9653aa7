//! # Provider Macros
//!
//! 声明服务提供者的过程宏。宏只生成声明，注册由模块发现流程显式执行。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use provider_macros::service_provider;
//!
//! pub trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! #[service_provider(dyn Greeter, qualifier = "loud", scope = Singleton)]
//! #[derive(Default)]
//! pub struct LoudGreeter;
//!
//! impl Greeter for LoudGreeter {
//!     fn greet(&self) -> String {
//!         "HELLO".to_string()
//!     }
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, ItemStruct};

mod provider;
mod utils;

/// 服务提供者声明宏
///
/// # 参数
///
/// - 第一个参数为能力类型，通常是 `dyn Trait`
/// - `qualifier = "..."` - 限定符（默认为空字符串）
/// - `scope = Singleton | Prototype` - 作用域（默认为 `Prototype`），其他取值编译失败
/// - `constructor = path` - 零参数构造函数（默认为 `Default::default`）
///
/// 使用方需要依赖 `di-impl`。
#[proc_macro_attribute]
pub fn service_provider(args: TokenStream, input: TokenStream) -> TokenStream {
    let args = parse_macro_input!(args as provider::ProviderArgs);
    let item = parse_macro_input!(input as ItemStruct);

    provider::expand(args, item)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
