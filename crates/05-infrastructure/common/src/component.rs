//! 组件基础接口定义
//!
//! 通常由 `component-macros` 自动实现，也可以手写

use crate::descriptor::{MethodDescriptor, TypeDescriptor};
use std::any::Any;

/// 组件类型 trait
///
/// 提供类型描述符，容器据此完成构造、注入和初始化回调
pub trait ComponentType: Any + Send + Sync {
    /// 获取类型描述符
    fn type_descriptor() -> TypeDescriptor
    where
        Self: Sized;
}

/// 声明的方法列表
///
/// 由 `#[lifecycle]` 为 impl 块生成，顺序与源码声明顺序一致
pub trait DeclaredMethods: Any + Send + Sync {
    /// 获取方法描述符
    fn declared_methods() -> Vec<MethodDescriptor>
    where
        Self: Sized;
}
