//! Bean 定义
//!
//! 从类型描述符构建的不可变元数据，容器据此构造和初始化 bean

use infrastructure_common::{
    AssignableType, Constructor, DefinitionResult, FieldDescriptor, MethodDescriptor,
    TypeDescriptor, TypeInfo,
};
use std::any::TypeId;
use std::sync::Arc;

/// Bean 定义
#[derive(Debug, Clone)]
pub struct BeanDefinition {
    /// Bean 名，容器内唯一
    pub name: String,
    /// 组件类型
    pub type_info: TypeInfo,
    /// 无参构造函数
    pub constructor: Constructor,
    /// 初始化回调方法
    pub post_construct: Option<MethodDescriptor>,
    /// 自动注入字段，按声明顺序
    pub injection_points: Vec<FieldDescriptor>,
    /// 可赋值类型
    pub assignable: Arc<[AssignableType]>,
}

impl BeanDefinition {
    /// 是否可以赋值给指定类型
    pub fn is_assignable_to(&self, type_id: TypeId) -> bool {
        self.assignable.iter().any(|target| target.matches(type_id))
    }

    /// 初始化回调方法名
    pub fn post_construct_name(&self) -> Option<&str> {
        self.post_construct.as_ref().map(|method| method.name.as_str())
    }
}

/// Bean 定义构建器 trait
///
/// 纯转换，没有副作用
pub trait DefinitionBuilder: Send + Sync {
    /// 从类型描述符构建 bean 定义
    fn build(&self, descriptor: &TypeDescriptor) -> DefinitionResult<BeanDefinition>;
}
