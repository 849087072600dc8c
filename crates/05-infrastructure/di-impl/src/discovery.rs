//! 类型发现器实现

use async_trait::async_trait;
use di_abstractions::{Namespace, TypeDiscovery};
use infrastructure_common::{registered_types, ComponentType, InitializationError, TypeDescriptor};
use tracing::debug;

/// 显式注册的类型发现器
///
/// 按注册顺序返回命名空间下的类型
#[derive(Debug, Clone, Default)]
pub struct StaticTypeDiscovery {
    descriptors: Vec<TypeDescriptor>,
}

impl StaticTypeDiscovery {
    /// 创建空的发现器
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加组件类型
    pub fn with_type<T: ComponentType>(mut self) -> Self {
        self.register_type::<T>();
        self
    }

    /// 添加类型描述符
    pub fn with_descriptor(mut self, descriptor: TypeDescriptor) -> Self {
        self.register_descriptor(descriptor);
        self
    }

    /// 注册组件类型
    pub fn register_type<T: ComponentType>(&mut self) {
        self.register_descriptor(T::type_descriptor());
    }

    /// 注册类型描述符
    pub fn register_descriptor(&mut self, descriptor: TypeDescriptor) {
        self.descriptors.push(descriptor);
    }

    /// 已注册的类型数量
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// 是否没有注册任何类型
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

#[async_trait]
impl TypeDiscovery for StaticTypeDiscovery {
    async fn discover(
        &self,
        namespace: &Namespace,
    ) -> Result<Vec<TypeDescriptor>, InitializationError> {
        let found: Vec<TypeDescriptor> = self
            .descriptors
            .iter()
            .filter(|descriptor| namespace.contains(&descriptor.module_path))
            .cloned()
            .collect();

        debug!("命名空间 {} 下发现 {} 个类型", namespace, found.len());
        Ok(found)
    }

    fn name(&self) -> &str {
        "static"
    }
}

/// 基于全局类型目录的发现器
///
/// 读取 `#[derive(Component)]` 在启动时注册的类型，
/// 结果按模块路径和类型简称排序
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogTypeDiscovery;

impl CatalogTypeDiscovery {
    /// 创建新的发现器
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TypeDiscovery for CatalogTypeDiscovery {
    async fn discover(
        &self,
        namespace: &Namespace,
    ) -> Result<Vec<TypeDescriptor>, InitializationError> {
        let mut found: Vec<TypeDescriptor> = registered_types()
            .into_iter()
            .filter(|descriptor| namespace.contains(&descriptor.module_path))
            .collect();
        found.sort_by(|a, b| {
            (a.module_path.as_str(), a.simple_name.as_str())
                .cmp(&(b.module_path.as_str(), b.simple_name.as_str()))
        });

        debug!("类型目录中命名空间 {} 下发现 {} 个类型", namespace, found.len());
        Ok(found)
    }

    fn name(&self) -> &str {
        "catalog"
    }
}
