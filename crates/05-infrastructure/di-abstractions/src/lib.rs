//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义 bean 生命周期引擎的核心接口。
//!
//! ## 核心接口
//!
//! - [`TypeDiscovery`] - 类型发现接口（外部协作者）
//! - [`DefinitionBuilder`] - Bean 定义构建接口
//! - [`BeanFactory`] - Bean 查询接口

pub mod definition;
pub mod discovery;
pub mod registry;

pub use definition::*;
pub use discovery::*;
pub use registry::*;
