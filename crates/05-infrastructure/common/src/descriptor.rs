//! 类型描述符
//!
//! 代替运行时反射：每个组件类型在声明处给出构造函数、字段、方法以及可赋值的接口视图，
//! 容器只通过描述符操作实例，不需要对类型做任何内省。

use crate::errors::{BoxError, InjectionMismatch};
use crate::markers::{AutoWiredMarker, ComponentMarker, PostConstructMarker};
use crate::metadata::{parent_module, TypeInfo};
use std::any::{Any, TypeId};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// 容器持有的 bean 实例
pub type BeanInstance = Arc<dyn Any + Send + Sync>;

/// 尚未放入容器的 bean 实例
pub type BoxedBean = Box<dyn Any + Send + Sync>;

type ConstructorFn = dyn Fn() -> Result<BoxedBean, BoxError> + Send + Sync;
type MethodInvoker = dyn Fn(&mut (dyn Any + Send + Sync)) -> Result<(), BoxError> + Send + Sync;
type FieldInjector =
    dyn Fn(&mut (dyn Any + Send + Sync), Box<dyn Any>) -> Result<(), BoxError> + Send + Sync;
type UpcastFn = dyn Fn(BeanInstance) -> Option<Box<dyn Any>> + Send + Sync;

/// 无参构造函数
#[derive(Clone)]
pub struct Constructor {
    create: Arc<ConstructorFn>,
}

impl Constructor {
    /// 包装不会失败的构造函数
    pub fn new<T, F>(create: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            create: Arc::new(move || Ok(Box::new(create()) as BoxedBean)),
        }
    }

    /// 包装可能失败的构造函数
    pub fn fallible<T, E, F>(create: F) -> Self
    where
        T: Any + Send + Sync,
        E: Into<BoxError>,
        F: Fn() -> Result<T, E> + Send + Sync + 'static,
    {
        Self {
            create: Arc::new(move || {
                create()
                    .map(|instance| Box::new(instance) as BoxedBean)
                    .map_err(Into::into)
            }),
        }
    }

    /// 调用构造函数
    pub fn invoke(&self) -> Result<BoxedBean, BoxError> {
        (self.create)()
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Constructor(<function>)")
    }
}

/// 可赋值类型
///
/// 描述 bean 可以被当作哪种类型取出：类型本身，或它实现的 `dyn Trait`。
#[derive(Clone)]
pub struct AssignableType {
    /// 目标类型
    pub type_info: TypeInfo,
    upcast: Arc<UpcastFn>,
}

impl AssignableType {
    /// 使用自定义转换函数创建
    ///
    /// 转换函数返回的 `Box<dyn Any>` 中必须装着 `Arc<U>`
    pub fn new<U, F>(upcast: F) -> Self
    where
        U: ?Sized + 'static,
        F: Fn(BeanInstance) -> Option<Box<dyn Any>> + Send + Sync + 'static,
    {
        Self {
            type_info: TypeInfo::of::<U>(),
            upcast: Arc::new(upcast),
        }
    }

    /// 类型本身
    pub fn identity<T: Any + Send + Sync>() -> Self {
        Self::new::<T, _>(|bean| {
            bean.downcast::<T>()
                .ok()
                .map(|instance| Box::new(instance) as Box<dyn Any>)
        })
    }

    /// `T` 作为 `U` 的视图，通常 `U` 是 `T` 实现的 trait 对象
    pub fn view<T, U>(cast: fn(Arc<T>) -> Arc<U>) -> Self
    where
        T: Any + Send + Sync,
        U: ?Sized + 'static,
    {
        Self::new::<U, _>(move |bean| {
            bean.downcast::<T>()
                .ok()
                .map(|instance| Box::new(cast(instance)) as Box<dyn Any>)
        })
    }

    /// 是否为指定类型
    pub fn matches(&self, type_id: TypeId) -> bool {
        self.type_info.id == type_id
    }

    /// 转换为目标类型，结果中装着 `Arc<目标类型>`
    pub fn upcast(&self, bean: &BeanInstance) -> Option<Box<dyn Any>> {
        (self.upcast)(Arc::clone(bean))
    }

    /// 转换为 `Arc<U>`
    pub fn cast<U: ?Sized + 'static>(&self, bean: &BeanInstance) -> Option<Arc<U>> {
        if !self.matches(TypeId::of::<U>()) {
            return None;
        }
        self.upcast(bean)?
            .downcast::<Arc<U>>()
            .ok()
            .map(|boxed| *boxed)
    }
}

impl fmt::Debug for AssignableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssignableType")
            .field("type_info", &self.type_info)
            .field("upcast", &"<function>")
            .finish()
    }
}

/// 构造 `AssignableType` 视图
///
/// ```ignore
/// let view = assignable!(Cat => dyn Animal);
/// ```
#[macro_export]
macro_rules! assignable {
    ($concrete:ty => $view:ty) => {
        $crate::AssignableType::view::<$concrete, $view>(
            |bean: ::std::sync::Arc<$concrete>| -> ::std::sync::Arc<$view> { bean },
        )
    };
}

/// 字段描述符
#[derive(Clone)]
pub struct FieldDescriptor {
    /// 字段名
    pub name: String,
    /// 声明类型，自动注入按此类型查找
    pub declared_type: TypeInfo,
    /// 自动注入标记
    pub autowired: Option<AutoWiredMarker>,
    injector: Option<Arc<FieldInjector>>,
}

impl FieldDescriptor {
    /// 普通字段，不参与注入
    pub fn new(name: impl Into<String>, declared_type: TypeInfo) -> Self {
        Self {
            name: name.into(),
            declared_type,
            autowired: None,
            injector: None,
        }
    }

    /// 自动注入字段
    ///
    /// `assign` 把找到的 `Arc<D>` 写入目标实例
    pub fn autowired<T, D, F>(name: impl Into<String>, assign: F) -> Self
    where
        T: Any + Send + Sync,
        D: ?Sized + 'static,
        F: Fn(&mut T, Arc<D>) + Send + Sync + 'static,
    {
        let name = name.into();
        let field = name.clone();
        let injector = move |target: &mut (dyn Any + Send + Sync),
                             value: Box<dyn Any>|
              -> Result<(), BoxError> {
            let mismatch = || InjectionMismatch {
                field: field.clone(),
                expected: std::any::type_name::<D>().to_string(),
            };
            let target = target.downcast_mut::<T>().ok_or_else(mismatch)?;
            let value = value.downcast::<Arc<D>>().map_err(|_| mismatch())?;
            assign(target, *value);
            Ok(())
        };

        Self {
            name,
            declared_type: TypeInfo::of::<D>(),
            autowired: Some(AutoWiredMarker),
            injector: Some(Arc::new(injector)),
        }
    }

    /// 是否带自动注入标记
    pub fn is_autowired(&self) -> bool {
        self.autowired.is_some()
    }

    /// 是否可以写入
    pub fn is_injectable(&self) -> bool {
        self.injector.is_some()
    }

    /// 写入字段，`value` 中必须装着 `Arc<声明类型>`
    pub fn inject(
        &self,
        target: &mut (dyn Any + Send + Sync),
        value: Box<dyn Any>,
    ) -> Result<(), BoxError> {
        match &self.injector {
            Some(injector) => injector(target, value),
            None => Err(Box::new(InjectionMismatch {
                field: self.name.clone(),
                expected: self.declared_type.name.clone(),
            })),
        }
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("declared_type", &self.declared_type)
            .field("autowired", &self.autowired)
            .finish()
    }
}

/// 方法描述符
#[derive(Clone)]
pub struct MethodDescriptor {
    /// 方法名
    pub name: String,
    /// 参数个数（不含 self）
    pub parameter_count: usize,
    /// 初始化回调标记
    pub post_construct: Option<PostConstructMarker>,
    invoker: Option<Arc<MethodInvoker>>,
}

impl MethodDescriptor {
    /// 只声明方法签名，不提供调用能力
    pub fn new(name: impl Into<String>, parameter_count: usize) -> Self {
        Self {
            name: name.into(),
            parameter_count,
            post_construct: None,
            invoker: None,
        }
    }

    /// 无参初始化回调
    pub fn post_construct<T, F>(name: impl Into<String>, hook: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&mut T) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        Self::new(name, 0).with_invoker(hook).marked_post_construct()
    }

    /// 设置调用函数
    pub fn with_invoker<T, F>(mut self, invoke: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&mut T) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        let method = self.name.clone();
        self.invoker = Some(Arc::new(
            move |target: &mut (dyn Any + Send + Sync)| -> Result<(), BoxError> {
                let target = target.downcast_mut::<T>().ok_or_else(|| {
                    format!(
                        "方法 {method} 的接收者不是 {}",
                        std::any::type_name::<T>()
                    )
                })?;
                invoke(target)
            },
        ));
        self
    }

    /// 添加初始化回调标记
    pub fn marked_post_construct(mut self) -> Self {
        self.post_construct = Some(PostConstructMarker);
        self
    }

    /// 是否带初始化回调标记
    pub fn is_post_construct(&self) -> bool {
        self.post_construct.is_some()
    }

    /// 调用方法
    pub fn invoke(&self, target: &mut (dyn Any + Send + Sync)) -> Result<(), BoxError> {
        match &self.invoker {
            Some(invoker) => invoker(target),
            None => Err(format!("方法 {} 不可调用", self.name).into()),
        }
    }
}

impl fmt::Debug for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDescriptor")
            .field("name", &self.name)
            .field("parameter_count", &self.parameter_count)
            .field("post_construct", &self.post_construct)
            .finish()
    }
}

/// 类型描述符
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    /// 类型信息
    pub type_info: TypeInfo,
    /// 类型简称，默认 bean 名
    pub simple_name: String,
    /// 类型所在模块，用于命名空间扫描
    pub module_path: String,
    /// 组件标记
    pub component: Option<ComponentMarker>,
    /// 无参构造函数
    pub constructor: Option<Constructor>,
    /// 字段，按声明顺序
    pub fields: Vec<FieldDescriptor>,
    /// 方法，按声明顺序
    pub methods: Vec<MethodDescriptor>,
    /// 可赋值类型，第一个总是类型本身
    pub assignable: Vec<AssignableType>,
}

impl TypeDescriptor {
    /// 创建类型描述符构建器
    pub fn builder<T: Any + Send + Sync>() -> TypeDescriptorBuilder<T> {
        TypeDescriptorBuilder::new()
    }

    /// 是否带组件标记
    pub fn is_component(&self) -> bool {
        self.component.is_some()
    }

    /// 带初始化回调标记的方法，按声明顺序
    pub fn post_construct_methods(&self) -> impl Iterator<Item = &MethodDescriptor> {
        self.methods.iter().filter(|method| method.is_post_construct())
    }

    /// 带自动注入标记的字段，按声明顺序
    pub fn autowired_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|field| field.is_autowired())
    }

    /// 是否可以赋值给指定类型
    pub fn is_assignable_to(&self, type_id: TypeId) -> bool {
        self.assignable.iter().any(|target| target.matches(type_id))
    }
}

/// 类型描述符构建器
pub struct TypeDescriptorBuilder<T> {
    descriptor: TypeDescriptor,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Any + Send + Sync> TypeDescriptorBuilder<T> {
    fn new() -> Self {
        let type_info = TypeInfo::of::<T>();
        let descriptor = TypeDescriptor {
            simple_name: type_info.name.clone(),
            module_path: parent_module(&type_info.module_path).to_string(),
            type_info,
            component: None,
            constructor: None,
            fields: Vec::new(),
            methods: Vec::new(),
            assignable: vec![AssignableType::identity::<T>()],
        };

        Self {
            descriptor,
            _marker: PhantomData,
        }
    }

    /// 设置类型简称
    pub fn simple_name(mut self, name: impl Into<String>) -> Self {
        self.descriptor.simple_name = name.into();
        self
    }

    /// 设置所在模块
    pub fn in_module(mut self, module_path: impl Into<String>) -> Self {
        self.descriptor.module_path = module_path.into();
        self
    }

    /// 设置组件标记
    pub fn component(mut self, marker: ComponentMarker) -> Self {
        self.descriptor.component = Some(marker);
        self
    }

    /// 使用 `Default` 作为构造函数
    pub fn default_constructor(self) -> Self
    where
        T: Default,
    {
        self.constructor(T::default)
    }

    /// 设置构造函数
    pub fn constructor<F>(mut self, create: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.descriptor.constructor = Some(Constructor::new(create));
        self
    }

    /// 设置可能失败的构造函数
    pub fn fallible_constructor<E, F>(mut self, create: F) -> Self
    where
        E: Into<BoxError>,
        F: Fn() -> Result<T, E> + Send + Sync + 'static,
    {
        self.descriptor.constructor = Some(Constructor::fallible(create));
        self
    }

    /// 添加自动注入字段
    pub fn autowired<D, F>(self, name: impl Into<String>, assign: F) -> Self
    where
        D: ?Sized + 'static,
        F: Fn(&mut T, Arc<D>) + Send + Sync + 'static,
    {
        self.field(FieldDescriptor::autowired::<T, D, F>(name, assign))
    }

    /// 添加字段
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.descriptor.fields.push(field);
        self
    }

    /// 添加初始化回调
    pub fn post_construct<F>(self, name: impl Into<String>, hook: F) -> Self
    where
        F: Fn(&mut T) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.method(MethodDescriptor::post_construct::<T, F>(name, hook))
    }

    /// 添加方法
    pub fn method(mut self, method: MethodDescriptor) -> Self {
        self.descriptor.methods.push(method);
        self
    }

    /// 批量添加方法
    pub fn methods(mut self, methods: impl IntoIterator<Item = MethodDescriptor>) -> Self {
        self.descriptor.methods.extend(methods);
        self
    }

    /// 声明实现的接口视图
    pub fn implements<U: ?Sized + 'static>(self, cast: fn(Arc<T>) -> Arc<U>) -> Self {
        self.assignable(AssignableType::view::<T, U>(cast))
    }

    /// 添加可赋值类型
    pub fn assignable(mut self, target: AssignableType) -> Self {
        self.descriptor.assignable.push(target);
        self
    }

    /// 完成构建
    pub fn build(self) -> TypeDescriptor {
        self.descriptor
    }
}
