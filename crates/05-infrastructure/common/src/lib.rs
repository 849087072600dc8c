//! # Infrastructure Common
//!
//! minispring IoC 容器的公共类型：标记模型、类型描述符、错误类型和配置。
//!
//! ## 核心组件
//!
//! - [`ComponentMarker`] / [`AutoWiredMarker`] / [`PostConstructMarker`] - 声明式标记
//! - [`TypeDescriptor`] - 代替反射的类型描述符
//! - [`ComponentType`] - 组件类型 trait
//! - [`ContainerConfig`] - 容器配置
//!
//! ## 设计原则
//!
//! - 组件在声明处注册描述符，运行时不做类型内省
//! - 容器是显式的值，全局状态只用于收集类型描述符

pub mod component;
pub mod configuration;
pub mod descriptor;
pub mod errors;
pub mod lifecycle;
pub mod markers;
pub mod metadata;

pub use component::*;
pub use configuration::*;
pub use descriptor::*;
pub use errors::*;
pub use lifecycle::*;
pub use markers::*;
pub use metadata::*;

/// 描述符工厂函数
pub type DescriptorFactory = fn() -> TypeDescriptor;

/// 全局类型目录
///
/// 由 `#[derive(Component)]` 生成的 ctor 函数在程序启动时填充
static GLOBAL_TYPE_CATALOG: once_cell::sync::Lazy<parking_lot::RwLock<Vec<DescriptorFactory>>> =
    once_cell::sync::Lazy::new(|| parking_lot::RwLock::new(Vec::new()));

/// 注册组件类型到全局类型目录
pub fn register_type<T: ComponentType>() {
    register_descriptor_factory(T::type_descriptor);
}

/// 注册描述符工厂到全局类型目录，重复注册会被忽略
pub fn register_descriptor_factory(factory: DescriptorFactory) {
    let mut catalog = GLOBAL_TYPE_CATALOG.write();
    if catalog.iter().any(|existing| *existing as usize == factory as usize) {
        return;
    }
    catalog.push(factory);
}

/// 获取全局类型目录中的所有类型描述符，按注册顺序
pub fn registered_types() -> Vec<TypeDescriptor> {
    let factories = GLOBAL_TYPE_CATALOG.read().clone();
    factories.into_iter().map(|factory| factory()).collect()
}
