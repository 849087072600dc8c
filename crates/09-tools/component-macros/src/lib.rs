//! # Component Macros
//!
//! 这个 crate 提供了用于生成组件类型描述符并自动注册的过程宏。
//!
//! ## 核心宏
//!
//! - [`Component`](derive@Component) - 组件派生宏，支持 `#[component]`、`#[autowired]`、`#[implements]`
//! - [`lifecycle`] - 收集 impl 块中带 `#[post_construct]` 的方法
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use component_macros::{lifecycle, Component};
//! use std::sync::Arc;
//!
//! #[derive(Debug, Default, Component)]
//! #[component(name = "mydog")]
//! pub struct Dog;
//!
//! #[derive(Debug, Default, Component)]
//! #[component(lifecycle)]
//! pub struct Cat {
//!     #[autowired]
//!     dog: Option<Arc<Dog>>,
//! }
//!
//! #[lifecycle]
//! impl Cat {
//!     #[post_construct]
//!     fn init(&mut self) {
//!         println!("cat 喵喵 {:?}", self.dog);
//!     }
//! }
//! ```
//!
//! 使用方需要依赖 `ctor` 和 `infrastructure-common`。

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod component;
mod lifecycle;
mod utils;

/// 组件派生宏
///
/// 为结构体实现 `ComponentType`，并在程序启动时注册到全局类型目录。
///
/// # 参数
///
/// - `#[component(name = "custom_name")]` - 自定义 bean 名，默认为类型名
/// - `#[component(constructor = "Self::new")]` - 无参构造函数，默认使用 `Default`
/// - `#[component(lifecycle)]` - 从 `#[lifecycle]` impl 块读取方法
/// - `#[implements(dyn Trait, ...)]` - 可以按这些接口查找
/// - 字段上的 `#[autowired]` - 按声明类型注入，字段类型必须是 `Option<Arc<T>>`
///
/// # 示例
///
/// ```rust,ignore
/// #[derive(Default, Component)]
/// #[component(name = "mydog")]
/// #[implements(dyn Animal)]
/// pub struct Dog;
/// ```
#[proc_macro_derive(Component, attributes(component, autowired, implements))]
pub fn derive_component(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    component::derive_component_impl(input)
}

/// 生命周期方法宏
///
/// 用于固有 impl 块，收集带 `#[post_construct]` 标记的方法并实现 `DeclaredMethods`。
/// 初始化方法只能接收 `&self` 或 `&mut self`，返回 `()` 或 `Result<(), E>`。
///
/// # 示例
///
/// ```rust,ignore
/// #[lifecycle]
/// impl Cat {
///     #[post_construct]
///     fn init(&mut self) -> Result<(), std::io::Error> {
///         Ok(())
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn lifecycle(args: TokenStream, input: TokenStream) -> TokenStream {
    lifecycle::lifecycle_impl(args, input)
}
