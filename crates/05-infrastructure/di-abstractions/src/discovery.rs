//! 类型发现抽象接口
//!
//! 枚举命名空间下所有可加载的类型描述符。具体的枚举方式由实现决定。

use async_trait::async_trait;
use infrastructure_common::{InitializationError, TypeDescriptor};
use std::fmt;

/// 类型发现器 trait
#[async_trait]
pub trait TypeDiscovery: Send + Sync {
    /// 发现命名空间下的所有类型
    async fn discover(
        &self,
        namespace: &Namespace,
    ) -> Result<Vec<TypeDescriptor>, InitializationError>;

    /// 获取发现器名称
    fn name(&self) -> &str;
}

/// 扫描命名空间
///
/// 使用 Rust 模块路径表示，也接受 `.` 分隔的写法
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace {
    path: String,
}

impl Namespace {
    /// 解析命名空间
    pub fn new(path: impl AsRef<str>) -> Self {
        let path = path
            .as_ref()
            .trim()
            .replace('.', "::")
            .trim_matches(':')
            .to_string();
        Self { path }
    }

    /// 根命名空间，包含所有模块
    pub fn root() -> Self {
        Self {
            path: String::new(),
        }
    }

    /// 命名空间路径
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// 是否为根命名空间
    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// 模块是否属于此命名空间（自身或子模块）
    pub fn contains(&self, module_path: &str) -> bool {
        if self.is_root() {
            return true;
        }
        match module_path.strip_prefix(self.path.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with("::"),
            None => false,
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl From<&str> for Namespace {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for Namespace {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}
