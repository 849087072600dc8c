//! 生命周期方法宏实现

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, ImplItem, ImplItemFn, ItemImpl, Result, ReturnType};

const POST_CONSTRUCT: &str = "post_construct";

/// 生命周期宏的实现
pub fn lifecycle_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    if !args.is_empty() {
        let args = TokenStream2::from(args);
        return syn::Error::new_spanned(args, "lifecycle 不接受参数")
            .to_compile_error()
            .into();
    }

    let item = parse_macro_input!(input as ItemImpl);
    match expand(item) {
        Ok(tokens) => tokens.into(),
        Err(error) => error.to_compile_error().into(),
    }
}

fn expand(mut item: ItemImpl) -> Result<TokenStream2> {
    if let Some((_, path, _)) = &item.trait_ {
        return Err(syn::Error::new_spanned(path, "lifecycle 只能用于固有 impl 块"));
    }
    if !item.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &item.generics,
            "lifecycle 不支持泛型 impl 块",
        ));
    }

    let mut descriptors = Vec::new();
    for impl_item in &mut item.items {
        if let ImplItem::Fn(method) = impl_item {
            let before = method.attrs.len();
            method.attrs.retain(|attr| !attr.path().is_ident(POST_CONSTRUCT));
            if method.attrs.len() != before {
                descriptors.push(post_construct_descriptor(method)?);
            }
        }
    }

    let self_ty = &item.self_ty;
    Ok(quote! {
        #item

        impl ::infrastructure_common::DeclaredMethods for #self_ty {
            fn declared_methods() -> ::std::vec::Vec<::infrastructure_common::MethodDescriptor> {
                ::std::vec![#(#descriptors),*]
            }
        }
    })
}

/// 为初始化方法生成方法描述符
fn post_construct_descriptor(method: &ImplItemFn) -> Result<TokenStream2> {
    let sig = &method.sig;

    if sig.asyncness.is_some() {
        return Err(syn::Error::new_spanned(sig, "初始化方法不能是 async"));
    }
    if !sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(&sig.generics, "初始化方法不能是泛型"));
    }
    match sig.receiver() {
        Some(receiver) if receiver.reference.is_some() => {}
        _ => {
            return Err(syn::Error::new_spanned(
                sig,
                "初始化方法需要 &self 或 &mut self",
            ))
        }
    }
    if sig.inputs.len() > 1 {
        return Err(syn::Error::new_spanned(&sig.inputs, "初始化方法不能带参数"));
    }

    let name = &sig.ident;
    let name_str = name.to_string();
    let call = match &sig.output {
        ReturnType::Default => quote! {
            this.#name();
            ::core::result::Result::Ok(())
        },
        ReturnType::Type(..) => quote! {
            this.#name().map_err(::core::convert::Into::into)
        },
    };

    Ok(quote! {
        ::infrastructure_common::MethodDescriptor::post_construct::<Self, _>(
            #name_str,
            |this: &mut Self| -> ::core::result::Result<(), ::infrastructure_common::BoxError> {
                #call
            },
        )
    })
}
