//! 组件标记模型
//!
//! 三种声明式标记：组件、自动注入字段、初始化回调方法。
//! 标记只承载元数据，本身没有行为。

use serde::{Deserialize, Serialize};

/// 组件标记
///
/// 标记一个类型可以被容器实例化。未设置名称时使用类型简称作为 bean 名。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentMarker {
    /// 显式 bean 名
    pub name: Option<String>,
}

impl ComponentMarker {
    /// 创建不带显式名称的组件标记
    pub fn new() -> Self {
        Self { name: None }
    }

    /// 创建带显式名称的组件标记
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    /// 显式名称，空字符串视为未设置
    pub fn explicit_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    /// 解析 bean 名
    pub fn resolve_name<'a>(&'a self, simple_name: &'a str) -> &'a str {
        self.explicit_name().unwrap_or(simple_name)
    }
}

/// 自动注入标记，按字段声明类型注入
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoWiredMarker;

/// 初始化回调标记，实例创建后调用
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostConstructMarker;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_marker_naming() {
        assert_eq!(ComponentMarker::new().resolve_name("Cat"), "Cat");
        assert_eq!(ComponentMarker::named("mydog").resolve_name("Dog"), "mydog");
        assert_eq!(ComponentMarker::named("").resolve_name("Dog"), "Dog");
        assert_eq!(ComponentMarker::named("").explicit_name(), None);
    }
}
