//! 元数据定义
//!
//! 提供组件类型的元数据信息

use std::any::TypeId;
use std::fmt;

/// 类型信息
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    /// 类型简称（不包含模块路径）
    pub name: String,
    /// 类型ID
    pub id: TypeId,
    /// 完整类型路径
    pub module_path: String,
}

impl TypeInfo {
    /// 创建新的类型信息
    pub fn new(type_id: TypeId, name: impl Into<String>, module_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: type_id,
            module_path: module_path.into(),
        }
    }

    /// 从类型获取类型信息
    ///
    /// 支持 `dyn Trait` 这类非 Sized 类型，用于按接口查找
    pub fn of<T: ?Sized + 'static>() -> Self {
        let full_name = std::any::type_name::<T>();
        Self {
            name: simple_type_name(full_name).to_string(),
            id: TypeId::of::<T>(),
            module_path: full_name.to_string(),
        }
    }

    /// 获取简短的类型名称（不包含模块路径）
    pub fn short_name(&self) -> &str {
        &self.name
    }

    /// 类型所在的模块路径，例如 `app::animals::Cat` 位于 `app::animals`
    pub fn parent_module(&self) -> &str {
        parent_module(&self.module_path)
    }

    /// 是否为指定类型
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.module_path)
    }
}

/// 从完整类型名提取简称
///
/// 泛型参数与 `dyn` 前缀会被忽略：`dyn app::Animal` -> `Animal`，
/// `app::Holder<app::Cat>` -> `Holder`
pub fn simple_type_name(full_name: &str) -> &str {
    let trimmed = full_name.trim_start_matches("dyn ");
    let base = trimmed.split('<').next().unwrap_or(trimmed);
    base.rsplit("::").next().unwrap_or(base)
}

/// 从完整类型名提取模块路径
pub fn parent_module(full_name: &str) -> &str {
    let trimmed = full_name.trim_start_matches("dyn ");
    let base = trimmed.split('<').next().unwrap_or(trimmed);
    match base.rfind("::") {
        Some(index) => &base[..index],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod animals {
        pub struct Cat;
        pub trait Animal {}
    }

    #[test]
    fn test_type_info_of_concrete_type() {
        let info = TypeInfo::of::<animals::Cat>();

        assert_eq!(info.short_name(), "Cat");
        assert!(info.module_path.ends_with("animals::Cat"));
        assert!(info.parent_module().ends_with("animals"));
        assert!(info.is::<animals::Cat>());
    }

    #[test]
    fn test_type_info_of_trait_object() {
        let info = TypeInfo::of::<dyn animals::Animal>();

        assert_eq!(info.short_name(), "Animal");
        assert!(info.is::<dyn animals::Animal>());
        assert!(!info.is::<animals::Cat>());
    }

    #[test]
    fn test_type_info_new() {
        let info = TypeInfo::new(std::any::TypeId::of::<animals::Cat>(), "Cat", "zoo::Cat");

        assert_eq!(info.to_string(), "zoo::Cat");
        assert_eq!(info.parent_module(), "zoo");
        assert!(info.is::<animals::Cat>());
        assert_ne!(info, TypeInfo::of::<animals::Cat>());
    }

    #[test]
    fn test_simple_type_name() {
        assert_eq!(simple_type_name("a::b::Cat"), "Cat");
        assert_eq!(simple_type_name("Cat"), "Cat");
        assert_eq!(simple_type_name("a::Holder<a::Cat>"), "Holder");
        assert_eq!(parent_module("a::b::Cat"), "a::b");
        assert_eq!(parent_module("Cat"), "");
    }
}
