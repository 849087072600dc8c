//! # 依赖注入具体实现
//!
//! 提供 bean 定义构建器、IoC 容器和类型发现器的具体实现

pub mod context;
pub mod definition;
pub mod discovery;

pub use context::ApplicationContext;
pub use definition::DefaultDefinitionBuilder;
pub use discovery::{CatalogTypeDiscovery, StaticTypeDiscovery};

pub use di_abstractions::{BeanDefinition, BeanFactory, DefinitionBuilder, Namespace, TypeDiscovery};
