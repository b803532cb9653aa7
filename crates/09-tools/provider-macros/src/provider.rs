//! 服务提供者声明宏实现

use crate::utils::{hidden_ident, hidden_static_ident};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    parse::Parse, parse::ParseStream, Error, Ident, ItemStruct, LitStr, Path, Result, Token, Type,
};

/// 作用域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderScope {
    Prototype,
    Singleton,
}

impl ProviderScope {
    fn parse_value(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "prototype" => Some(Self::Prototype),
            "singleton" => Some(Self::Singleton),
            _ => None,
        }
    }
}

/// 宏参数
pub struct ProviderArgs {
    /// 能力类型，例如 `dyn Greeter`
    pub capability: Type,
    /// 限定符，缺省为空字符串
    pub qualifier: String,
    /// 作用域，缺省为 `Prototype`
    pub scope: ProviderScope,
    /// 构造函数，缺省为 `Default::default`
    pub constructor: Option<Path>,
}

impl Parse for ProviderArgs {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        if input.is_empty() {
            return Err(input.error("缺少能力类型, 例如 #[service_provider(dyn Greeter)]"));
        }
        let capability: Type = input.parse()?;

        let mut qualifier: Option<String> = None;
        let mut scope: Option<ProviderScope> = None;
        let mut constructor: Option<Path> = None;

        while !input.is_empty() {
            input.parse::<Token![,]>()?;
            if input.is_empty() {
                break;
            }

            let key: Ident = input.parse()?;
            input.parse::<Token![=]>()?;
            if key == "qualifier" {
                let value: LitStr = input.parse()?;
                set_once(&mut qualifier, value.value(), &key)?;
            } else if key == "scope" {
                let (text, span) = if input.peek(LitStr) {
                    let value: LitStr = input.parse()?;
                    (value.value(), value.span())
                } else {
                    let value: Ident = input.parse()?;
                    (value.to_string(), value.span())
                };
                let parsed = ProviderScope::parse_value(&text).ok_or_else(|| {
                    Error::new(span, format!("无效的作用域 '{}', 可选值: Singleton, Prototype", text))
                })?;
                set_once(&mut scope, parsed, &key)?;
            } else if key == "constructor" {
                let value: Path = input.parse()?;
                set_once(&mut constructor, value, &key)?;
            } else {
                return Err(Error::new(
                    key.span(),
                    format!("未知参数 '{}', 可选参数: qualifier, scope, constructor", key),
                ));
            }
        }

        Ok(Self {
            capability,
            qualifier: qualifier.unwrap_or_default(),
            scope: scope.unwrap_or(ProviderScope::Prototype),
            constructor,
        })
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T, key: &Ident) -> Result<()> {
    if slot.is_some() {
        return Err(Error::new(key.span(), format!("参数 '{}' 重复", key)));
    }
    *slot = Some(value);
    Ok(())
}

/// 展开 #[service_provider]
///
/// 保留原结构体，并在同一模块生成注册函数和一条链接期收集的声明。
/// 声明本身不注册任何东西。
pub fn expand(args: ProviderArgs, item: ItemStruct) -> Result<TokenStream> {
    if !item.generics.params.is_empty() {
        return Err(Error::new_spanned(&item.generics, "服务提供者不支持泛型结构体"));
    }

    let ident = &item.ident;
    let capability = &args.capability;
    let qualifier = &args.qualifier;
    let scope = match args.scope {
        ProviderScope::Prototype => quote! { ::di_impl::__private::Scope::Prototype },
        ProviderScope::Singleton => quote! { ::di_impl::__private::Scope::Singleton },
    };
    let construct = match &args.constructor {
        Some(path) => quote! { #path() },
        None => quote! { <#ident as ::core::default::Default>::default() },
    };

    let register_fn = hidden_ident("__register_service_provider_", ident);
    let capability_fn = hidden_ident("__service_provider_capability_", ident);
    let declaration_static = hidden_static_ident("__SERVICE_PROVIDER_", ident);

    Ok(quote! {
        #item

        #[doc(hidden)]
        fn #capability_fn() -> &'static str {
            ::core::any::type_name::<#capability>()
        }

        #[doc(hidden)]
        fn #register_fn(
            registry: &::di_impl::ServiceLocator,
            declaration: &::di_impl::ProviderDeclaration,
        ) -> ::di_impl::__private::DependencyResult<()> {
            registry.register_provider::<#capability, _>(declaration.qualifier, declaration.scope, || {
                let instance: ::di_impl::__private::Arc<#capability> =
                    ::di_impl::__private::Arc::new(#construct);
                instance
            })
        }

        #[doc(hidden)]
        #[::di_impl::__private::linkme::distributed_slice(::di_impl::PROVIDER_DECLARATIONS)]
        #[linkme(crate = ::di_impl::__private::linkme)]
        static #declaration_static: ::di_impl::ProviderDeclaration = ::di_impl::ProviderDeclaration::new(
            #qualifier,
            #scope,
            ::core::module_path!(),
            ::core::stringify!(#ident),
            #capability_fn,
            #register_fn,
        );
    })
}
