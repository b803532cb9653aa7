//! 宏工具函数

use proc_macro2::Span;
use syn::Ident;

/// 驼峰命名转蛇形命名
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut snake = String::with_capacity(name.len() + 4);
    for (index, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let after_lower = index > 0 && (chars[index - 1].is_lowercase() || chars[index - 1].is_ascii_digit());
            let before_lower = index > 0
                && chars[index - 1].is_uppercase()
                && chars.get(index + 1).map_or(false, |next| next.is_lowercase());
            if after_lower || before_lower {
                snake.push('_');
            }
            snake.extend(c.to_lowercase());
        } else {
            snake.push(c);
        }
    }
    snake
}

/// 生成带前缀的内部标识符
pub fn hidden_ident(prefix: &str, name: &Ident) -> Ident {
    Ident::new(&format!("{}{}", prefix, to_snake_case(&name.to_string())), Span::call_site())
}

/// 生成带前缀的内部静态变量名
pub fn hidden_static_ident(prefix: &str, name: &Ident) -> Ident {
    Ident::new(
        &format!("{}{}", prefix, to_snake_case(&name.to_string()).to_uppercase()),
        Span::call_site(),
    )
}
