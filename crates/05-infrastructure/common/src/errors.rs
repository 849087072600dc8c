//! 错误类型定义

use std::fmt;
use thiserror::Error;

/// 装箱的底层错误
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败: {path}, 原因: {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置解析失败: {source}")]
    ParseError {
        #[from]
        source: toml::de::Error,
    },
}

/// Bean 定义错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("类型缺少组件标记: {type_name}")]
    MissingComponentMarker { type_name: String },

    #[error("组件缺少无参构造函数: {type_name}")]
    MissingConstructor { type_name: String },

    #[error("初始化方法不能带参数: {type_name}::{method}, 参数个数: {parameter_count}")]
    PostConstructWithParameters {
        type_name: String,
        method: String,
        parameter_count: usize,
    },

    #[error("组件声明了多个初始化方法: {type_name}, 方法: {methods:?}")]
    MultiplePostConstruct {
        type_name: String,
        methods: Vec<String>,
    },
}

/// Bean 创建阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationPhase {
    /// 调用构造函数
    Construct,
    /// 字段注入
    Inject,
    /// 调用初始化方法
    PostConstruct,
}

impl fmt::Display for CreationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Construct => f.write_str("构造"),
            Self::Inject => f.write_str("注入"),
            Self::PostConstruct => f.write_str("初始化回调"),
        }
    }
}

/// 容器初始化错误类型
///
/// 任何一个错误都会终止整个上下文的创建，不返回部分初始化的容器
#[derive(Error, Debug)]
pub enum InitializationError {
    #[error("Bean 定义失败: {source}")]
    Definition {
        #[from]
        source: DefinitionError,
    },

    #[error("Bean 名重复: {name} ({existing} 与 {duplicate})")]
    DuplicateName {
        name: String,
        existing: String,
        duplicate: String,
    },

    #[error("Bean 创建失败: {name}, 阶段: {phase}, 原因: {source}")]
    BeanCreation {
        name: String,
        phase: CreationPhase,
        source: BoxError,
    },

    #[error("类型发现失败: {namespace}, 原因: {message}")]
    Discovery { namespace: String, message: String },
}

impl InitializationError {
    /// 创建 Bean 创建错误
    pub fn bean_creation(name: impl Into<String>, phase: CreationPhase, source: BoxError) -> Self {
        Self::BeanCreation {
            name: name.into(),
            phase,
            source,
        }
    }

    /// 创建类型发现错误
    pub fn discovery(namespace: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Discovery {
            namespace: namespace.into(),
            message: message.into(),
        }
    }

    /// 是否为重复名称错误
    pub fn is_duplicate_name(&self) -> bool {
        matches!(self, Self::DuplicateName { .. })
    }

    /// 是否为 Bean 创建错误
    pub fn is_bean_creation(&self) -> bool {
        matches!(self, Self::BeanCreation { .. })
    }
}

/// 字段注入时的类型不匹配
#[derive(Error, Debug)]
#[error("注入类型不匹配: 字段 {field} 期望 {expected}")]
pub struct InjectionMismatch {
    pub field: String,
    pub expected: String,
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type DefinitionResult<T> = Result<T, DefinitionError>;
pub type InitializationResult<T> = Result<T, InitializationError>;
