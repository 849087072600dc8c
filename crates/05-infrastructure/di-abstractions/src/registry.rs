//! Bean 查询接口

use infrastructure_common::BeanInstance;
use std::any::Any;
use std::sync::Arc;

/// Bean 工厂 trait
///
/// 查询不会失败：找不到时返回 `None` 或空列表
pub trait BeanFactory: Send + Sync {
    /// 按名称获取 bean
    fn get_bean_by_name(&self, name: &str) -> Option<BeanInstance>;

    /// 按名称获取指定类型的 bean，类型不匹配时返回 `None`
    fn get_named_bean<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
        self.get_bean_by_name(name)?.downcast::<T>().ok()
    }

    /// 按类型获取 bean
    ///
    /// `T` 可以是具体类型，也可以是组件声明实现的 `dyn Trait`；
    /// 多个匹配时返回容器迭代顺序中的第一个
    fn get_bean<T: ?Sized + 'static>(&self) -> Option<Arc<T>>;

    /// 按类型获取所有 bean，按容器迭代顺序
    fn get_beans<T: ?Sized + 'static>(&self) -> Vec<Arc<T>>;

    /// 是否包含指定名称的 bean
    fn contains_bean(&self, name: &str) -> bool {
        self.get_bean_by_name(name).is_some()
    }

    /// 所有 bean 名，按容器迭代顺序
    fn bean_names(&self) -> Vec<String>;
}
