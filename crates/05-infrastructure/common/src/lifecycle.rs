//! Bean 生命周期状态

use std::fmt;

/// 单个 bean 名的生命周期状态
///
/// 状态只会单向推进：`Defined -> Creating -> Constructed`，
/// 每个名称在同一个容器内最多经过每个状态一次
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BeanState {
    /// 已注册定义，尚未创建实例
    #[default]
    Defined,
    /// 正在创建（构造、注入或初始化回调中）
    Creating,
    /// 实例已放入容器
    Constructed,
}

impl BeanState {
    /// 是否可以开始创建
    pub fn can_create(self) -> bool {
        matches!(self, Self::Defined)
    }
}

impl fmt::Display for BeanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defined => f.write_str("defined"),
            Self::Creating => f.write_str("creating"),
            Self::Constructed => f.write_str("constructed"),
        }
    }
}
