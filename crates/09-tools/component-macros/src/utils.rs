//! 宏工具函数

use syn::{Field, Type};

/// 从类型中提取第一个泛型参数
pub fn extract_generic_type(ty: &Type) -> Option<&Type> {
    if let Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                if let Some(syn::GenericArgument::Type(inner_type)) = args.args.first() {
                    return Some(inner_type);
                }
            }
        }
    }
    None
}

/// 检查类型的最后一段是否为指定名称
pub fn is_type_named(ty: &Type, name: &str) -> bool {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map_or(false, |segment| segment.ident == name),
        _ => false,
    }
}

/// 检查类型是否为 Option<T>
pub fn is_option_type(ty: &Type) -> bool {
    is_type_named(ty, "Option")
}

/// 从 `Option<Arc<T>>` 中提取 `T`
pub fn extract_optional_arc(ty: &Type) -> Option<&Type> {
    if !is_option_type(ty) {
        return None;
    }
    let arc = extract_generic_type(ty)?;
    if !is_type_named(arc, "Arc") {
        return None;
    }
    extract_generic_type(arc)
}

/// 检查字段是否有特定属性
pub fn field_has_attribute(field: &Field, attr_name: &str) -> bool {
    field.attrs.iter().any(|attr| attr.path().is_ident(attr_name))
}

/// 将驼峰命名转换为蛇形命名
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() && i > 0 {
            // 检查前一个字符是否为小写，或者下一个字符是否为小写
            let prev_is_lower = chars.get(i - 1).map_or(false, |c| c.is_lowercase());
            let next_is_lower = chars.get(i + 1).map_or(false, |c| c.is_lowercase());

            if prev_is_lower || next_is_lower {
                result.push('_');
            }
        }
        result.push(ch.to_lowercase().next().unwrap_or(ch));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("MyService"), "my_service");
        assert_eq!(to_snake_case("HTTPClient"), "http_client");
        assert_eq!(to_snake_case("Cat"), "cat");
    }

    #[test]
    fn test_extract_optional_arc() {
        let ty: Type = syn::parse_quote!(Option<Arc<Dog>>);
        let inner = extract_optional_arc(&ty).expect("inner type");
        assert!(is_type_named(inner, "Dog"));

        let ty: Type = syn::parse_quote!(std::option::Option<std::sync::Arc<dyn Animal>>);
        assert!(matches!(extract_optional_arc(&ty), Some(Type::TraitObject(_))));

        let ty: Type = syn::parse_quote!(Option<Box<Dog>>);
        assert!(extract_optional_arc(&ty).is_none());

        let ty: Type = syn::parse_quote!(Arc<Dog>);
        assert!(extract_optional_arc(&ty).is_none());
    }
}
