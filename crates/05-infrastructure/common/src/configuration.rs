//! 容器配置

use crate::errors::{ConfigError, ConfigResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// 字段注入策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InjectionPolicy {
    /// 构造后按声明类型查找 bean 并注入，找不到时跳过
    #[default]
    BestEffort,
    /// 不自动注入，字段需要手动装配
    Disabled,
}

/// 容器配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// 字段注入策略
    pub injection: InjectionPolicy,
    /// 组件声明多个初始化方法时报错，默认只使用第一个
    pub strict_post_construct: bool,
}

impl ContainerConfig {
    /// 设置注入策略
    pub fn with_injection(mut self, injection: InjectionPolicy) -> Self {
        self.injection = injection;
        self
    }

    /// 设置是否严格检查初始化方法
    pub fn with_strict_post_construct(mut self, strict: bool) -> Self {
        self.strict_post_construct = strict;
        self
    }

    /// 从 TOML 文本解析
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// 从 TOML 文件加载
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        load_toml_file(path)
    }
}

/// 读取 TOML 文件并反序列化
///
/// 容器配置和应用自己的配置文件共用这个入口
pub fn load_toml_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> ConfigResult<T> {
    let path = path.as_ref();
    debug!("加载配置文件: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileReadError {
        path: path.display().to_string(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}
