//! Bean 定义构建器实现

use di_abstractions::{BeanDefinition, DefinitionBuilder};
use infrastructure_common::{DefinitionError, DefinitionResult, MethodDescriptor, TypeDescriptor};
use tracing::debug;

/// 默认 bean 定义构建器
///
/// 初始化方法取声明顺序中第一个带标记的方法；该方法带参数时拒绝构建。
/// 开启严格模式后，声明多个初始化方法同样拒绝构建。
#[derive(Debug, Clone, Default)]
pub struct DefaultDefinitionBuilder {
    strict_post_construct: bool,
}

impl DefaultDefinitionBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置是否严格检查初始化方法
    pub fn with_strict_post_construct(mut self, strict: bool) -> Self {
        self.strict_post_construct = strict;
        self
    }

    fn resolve_post_construct(
        &self,
        descriptor: &TypeDescriptor,
    ) -> DefinitionResult<Option<MethodDescriptor>> {
        let marked: Vec<&MethodDescriptor> = descriptor.post_construct_methods().collect();

        if self.strict_post_construct && marked.len() > 1 {
            return Err(DefinitionError::MultiplePostConstruct {
                type_name: descriptor.type_info.module_path.clone(),
                methods: marked.iter().map(|method| method.name.clone()).collect(),
            });
        }

        match marked.first() {
            Some(method) if method.parameter_count > 0 => {
                Err(DefinitionError::PostConstructWithParameters {
                    type_name: descriptor.type_info.module_path.clone(),
                    method: method.name.clone(),
                    parameter_count: method.parameter_count,
                })
            }
            Some(method) => Ok(Some((*method).clone())),
            None => Ok(None),
        }
    }
}

impl DefinitionBuilder for DefaultDefinitionBuilder {
    fn build(&self, descriptor: &TypeDescriptor) -> DefinitionResult<BeanDefinition> {
        let type_name = &descriptor.type_info.module_path;

        let marker = descriptor
            .component
            .as_ref()
            .ok_or_else(|| DefinitionError::MissingComponentMarker {
                type_name: type_name.clone(),
            })?;

        let constructor =
            descriptor
                .constructor
                .clone()
                .ok_or_else(|| DefinitionError::MissingConstructor {
                    type_name: type_name.clone(),
                })?;

        let post_construct = self.resolve_post_construct(descriptor)?;
        let name = marker.resolve_name(&descriptor.simple_name).to_string();

        debug!("构建 bean 定义: {} ({})", name, type_name);

        Ok(BeanDefinition {
            name,
            type_info: descriptor.type_info.clone(),
            constructor,
            post_construct,
            injection_points: descriptor.autowired_fields().cloned().collect(),
            assignable: descriptor.assignable.clone().into(),
        })
    }
}
