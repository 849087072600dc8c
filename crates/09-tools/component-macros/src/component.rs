//! 组件派生宏实现

use crate::utils::{extract_optional_arc, field_has_attribute, to_snake_case};
use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{
    parse::Parse, parse::ParseStream, punctuated::Punctuated, Data, DeriveInput, Expr, Fields,
    Ident, Lit, Meta, Result, Token, Type,
};

/// 组件配置参数
#[derive(Clone, Default)]
pub struct ComponentArgs {
    /// 自定义组件名称
    pub name: Option<String>,
    /// 无参构造函数路径
    pub constructor: Option<syn::Path>,
    /// 是否读取 `#[lifecycle]` 声明的方法
    pub lifecycle: bool,
}

impl Parse for ComponentArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut args = ComponentArgs::default();

        let parsed = Punctuated::<Meta, Token![,]>::parse_terminated(input)?;

        for meta in parsed {
            match meta {
                Meta::Path(path) if path.is_ident("lifecycle") => {
                    args.lifecycle = true;
                }
                Meta::NameValue(nv) if nv.path.is_ident("name") => {
                    args.name = Some(string_value(&nv.value)?.value());
                }
                Meta::NameValue(nv) if nv.path.is_ident("constructor") => {
                    args.constructor = Some(string_value(&nv.value)?.parse()?);
                }
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "不支持的 component 参数，可用: name, constructor, lifecycle",
                    ));
                }
            }
        }

        Ok(args)
    }
}

fn string_value(expr: &Expr) -> Result<&syn::LitStr> {
    if let Expr::Lit(expr_lit) = expr {
        if let Lit::Str(lit_str) = &expr_lit.lit {
            return Ok(lit_str);
        }
    }
    Err(syn::Error::new_spanned(expr, "参数值必须是字符串字面量"))
}

/// 待注入字段
struct AutowiredField {
    ident: Ident,
    dependency: Type,
}

/// 组件派生宏的实现
pub fn derive_component_impl(input: DeriveInput) -> TokenStream {
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(error) => error.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> Result<TokenStream2> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Component 不支持泛型结构体",
        ));
    }

    let args = parse_component_args(input)?;
    let implements = parse_implements(input)?;
    let autowired = collect_autowired_fields(input)?;

    let struct_name = &input.ident;
    let simple_name = struct_name.to_string();

    let marker = match &args.name {
        Some(name) => quote! { ::infrastructure_common::ComponentMarker::named(#name) },
        None => quote! { ::infrastructure_common::ComponentMarker::new() },
    };

    let constructor = match &args.constructor {
        Some(path) => quote! { .constructor(#path) },
        None => quote! { .default_constructor() },
    };

    let injections = autowired.iter().map(|field| {
        let ident = &field.ident;
        let dependency = &field.dependency;
        let field_name = ident.to_string();
        quote! {
            .autowired::<#dependency, _>(
                #field_name,
                |this: &mut Self, bean: ::std::sync::Arc<#dependency>| {
                    this.#ident = ::core::option::Option::Some(bean);
                },
            )
        }
    });

    let views = implements.iter().map(|view| {
        quote! {
            .implements::<#view>(|bean: ::std::sync::Arc<Self>| -> ::std::sync::Arc<#view> { bean })
        }
    });

    let methods = if args.lifecycle {
        quote! { .methods(<Self as ::infrastructure_common::DeclaredMethods>::declared_methods()) }
    } else {
        quote! {}
    };

    let register_fn = Ident::new(
        &format!("__register_component_{}", to_snake_case(&simple_name)),
        Span::call_site(),
    );

    Ok(quote! {
        impl ::infrastructure_common::ComponentType for #struct_name {
            fn type_descriptor() -> ::infrastructure_common::TypeDescriptor {
                ::infrastructure_common::TypeDescriptor::builder::<Self>()
                    .simple_name(#simple_name)
                    .in_module(::core::module_path!())
                    .component(#marker)
                    #constructor
                    #(#injections)*
                    #(#views)*
                    #methods
                    .build()
            }
        }

        #[doc(hidden)]
        #[allow(non_snake_case)]
        #[ctor::ctor]
        fn #register_fn() {
            ::infrastructure_common::register_type::<#struct_name>();
        }
    })
}

fn parse_component_args(input: &DeriveInput) -> Result<ComponentArgs> {
    let mut args = ComponentArgs::default();
    for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("component")) {
        if let Meta::Path(_) = attr.meta {
            continue;
        }
        let parsed: ComponentArgs = attr.parse_args()?;
        if parsed.name.is_some() {
            args.name = parsed.name;
        }
        if parsed.constructor.is_some() {
            args.constructor = parsed.constructor;
        }
        args.lifecycle |= parsed.lifecycle;
    }
    Ok(args)
}

fn parse_implements(input: &DeriveInput) -> Result<Vec<Type>> {
    let mut views = Vec::new();
    for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("implements")) {
        let parsed = attr.parse_args_with(Punctuated::<Type, Token![,]>::parse_terminated)?;
        views.extend(parsed);
    }
    Ok(views)
}

fn collect_autowired_fields(input: &DeriveInput) -> Result<Vec<AutowiredField>> {
    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Component 只能用于结构体",
            ))
        }
    };

    let named = match fields {
        Fields::Named(named) => &named.named,
        _ => return Ok(Vec::new()),
    };

    named
        .iter()
        .filter(|field| field_has_attribute(field, "autowired"))
        .map(|field| {
            let dependency = extract_optional_arc(&field.ty).ok_or_else(|| {
                syn::Error::new_spanned(&field.ty, "#[autowired] 字段的类型必须是 Option<Arc<T>>")
            })?;
            let ident = field
                .ident
                .clone()
                .ok_or_else(|| syn::Error::new_spanned(field, "#[autowired] 需要具名字段"))?;
            Ok(AutowiredField {
                ident,
                dependency: dependency.clone(),
            })
        })
        .collect()
}
