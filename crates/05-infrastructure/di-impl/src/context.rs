//! 应用上下文
//!
//! IoC 容器：持有 bean 定义表和实例表，负责实例化、字段注入、初始化回调和查询。

use crate::definition::DefaultDefinitionBuilder;
use di_abstractions::{BeanDefinition, BeanFactory, DefinitionBuilder, Namespace, TypeDiscovery};
use indexmap::IndexMap;
use infrastructure_common::{
    AssignableType, BeanInstance, BeanState, BoxedBean, ContainerConfig, CreationPhase,
    FieldDescriptor, InitializationError, InitializationResult, InjectionPolicy,
};
use std::any::{Any, TypeId};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 容器中的 bean 实例
struct BeanEntry {
    instance: BeanInstance,
    assignable: Arc<[AssignableType]>,
}

impl BeanEntry {
    fn upcast(&self, type_id: TypeId) -> Option<Box<dyn Any>> {
        self.assignable
            .iter()
            .find(|target| target.matches(type_id))?
            .upcast(&self.instance)
    }

    fn cast<T: ?Sized + 'static>(&self) -> Option<Arc<T>> {
        self.assignable
            .iter()
            .find(|target| target.matches(TypeId::of::<T>()))?
            .cast::<T>(&self.instance)
    }
}

/// 应用上下文
///
/// 创建时一次性完成扫描、定义注册和 bean 创建；任一步骤失败都不会返回容器。
/// 创建完成后只读，可以在多个线程间共享查询。
///
/// 字段注入采用尽力而为策略：构造完成后、初始化回调之前，按字段声明类型查找 bean。
/// 已创建的 bean 优先；否则按需创建匹配的定义；只有正在创建中的候选（自身或循环）
/// 或没有候选时跳过该字段。
pub struct ApplicationContext {
    namespace: Namespace,
    config: ContainerConfig,
    definitions: IndexMap<String, BeanDefinition>,
    states: IndexMap<String, BeanState>,
    instances: IndexMap<String, BeanEntry>,
}

impl ApplicationContext {
    /// 扫描命名空间并创建上下文
    pub async fn create<D>(namespace: impl Into<Namespace>, discovery: &D) -> InitializationResult<Self>
    where
        D: TypeDiscovery + ?Sized,
    {
        Self::create_with_config(namespace, discovery, ContainerConfig::default()).await
    }

    /// 使用指定配置扫描命名空间并创建上下文
    pub async fn create_with_config<D>(
        namespace: impl Into<Namespace>,
        discovery: &D,
        config: ContainerConfig,
    ) -> InitializationResult<Self>
    where
        D: TypeDiscovery + ?Sized,
    {
        let mut context = Self {
            namespace: namespace.into(),
            config,
            definitions: IndexMap::new(),
            states: IndexMap::new(),
            instances: IndexMap::new(),
        };
        context.initialize(discovery).await?;
        Ok(context)
    }

    /// 初始化上下文
    async fn initialize<D>(&mut self, discovery: &D) -> InitializationResult<()>
    where
        D: TypeDiscovery + ?Sized,
    {
        info!("开始初始化上下文: {} (发现器: {})", self.namespace, discovery.name());

        let descriptors = discovery.discover(&self.namespace).await?;
        if descriptors.is_empty() {
            warn!("命名空间 {} 下没有发现任何类型", self.namespace);
        }

        let builder = DefaultDefinitionBuilder::new()
            .with_strict_post_construct(self.config.strict_post_construct);
        for descriptor in descriptors.iter().filter(|descriptor| descriptor.is_component()) {
            let definition = builder.build(descriptor)?;
            self.register_definition(definition)?;
        }

        let names: Vec<String> = self.definitions.keys().cloned().collect();
        for name in &names {
            self.create_bean(name)?;
        }

        info!(
            "上下文初始化完成: {}, 共 {} 个 bean",
            self.namespace,
            self.instances.len()
        );
        Ok(())
    }

    /// 注册 bean 定义，名称重复时失败
    fn register_definition(&mut self, definition: BeanDefinition) -> InitializationResult<()> {
        if let Some(existing) = self.definitions.get(&definition.name) {
            return Err(InitializationError::DuplicateName {
                name: definition.name.clone(),
                existing: existing.type_info.module_path.clone(),
                duplicate: definition.type_info.module_path.clone(),
            });
        }

        debug!(
            "注册 bean 定义: {} -> {}",
            definition.name, definition.type_info
        );
        self.states.insert(definition.name.clone(), BeanState::Defined);
        self.definitions.insert(definition.name.clone(), definition);
        Ok(())
    }

    /// 创建 bean
    ///
    /// 幂等：实例已存在或正在创建时直接返回
    fn create_bean(&mut self, name: &str) -> InitializationResult<()> {
        match self.states.get(name) {
            Some(state) if state.can_create() => {}
            _ => return Ok(()),
        }
        let Some(definition) = self.definitions.get(name).cloned() else {
            return Ok(());
        };

        self.states.insert(name.to_string(), BeanState::Creating);
        debug!("创建 bean: {}", name);

        let mut instance = definition.constructor.invoke().map_err(|source| {
            InitializationError::bean_creation(name, CreationPhase::Construct, source)
        })?;

        if self.config.injection == InjectionPolicy::BestEffort {
            self.inject_fields(&definition, &mut instance)?;
        }

        if let Some(method) = &definition.post_construct {
            debug!("调用初始化方法: {}::{}", name, method.name);
            method.invoke(&mut *instance).map_err(|source| {
                InitializationError::bean_creation(name, CreationPhase::PostConstruct, source)
            })?;
        }

        self.instances.insert(
            name.to_string(),
            BeanEntry {
                instance: Arc::from(instance),
                assignable: Arc::clone(&definition.assignable),
            },
        );
        self.states.insert(name.to_string(), BeanState::Constructed);
        Ok(())
    }

    /// 按声明类型注入字段
    fn inject_fields(
        &mut self,
        definition: &BeanDefinition,
        instance: &mut BoxedBean,
    ) -> InitializationResult<()> {
        for field in &definition.injection_points {
            let Some(value) = self.resolve_dependency(&definition.name, field)? else {
                continue;
            };
            field.inject(&mut **instance, value).map_err(|source| {
                InitializationError::bean_creation(&definition.name, CreationPhase::Inject, source)
            })?;
            debug!(
                "注入字段: {}.{} <- {}",
                definition.name, field.name, field.declared_type
            );
        }
        Ok(())
    }

    /// 查找字段依赖，必要时按需创建
    fn resolve_dependency(
        &mut self,
        requester: &str,
        field: &FieldDescriptor,
    ) -> InitializationResult<Option<Box<dyn Any>>> {
        let type_id = field.declared_type.id;
        if let Some(value) = self.find_constructed(type_id) {
            return Ok(Some(value));
        }

        let candidate = self
            .definitions
            .values()
            .filter(|definition| definition.is_assignable_to(type_id))
            .find(|definition| self.state(&definition.name).can_create())
            .map(|definition| definition.name.clone());

        if let Some(dependency) = candidate {
            debug!("按需创建依赖: {} -> {}", requester, dependency);
            self.create_bean(&dependency)?;
            return Ok(self.find_constructed(type_id));
        }

        let in_creation = self.definitions.values().any(|definition| {
            definition.is_assignable_to(type_id)
                && self.state(&definition.name) == BeanState::Creating
        });
        if in_creation {
            warn!(
                "字段 {}.{} 的依赖 {} 正在创建中，跳过注入",
                requester, field.name, field.declared_type
            );
        } else {
            debug!(
                "字段 {}.{} 没有匹配的 bean: {}",
                requester, field.name, field.declared_type
            );
        }
        Ok(None)
    }

    /// 按定义注册顺序查找，与 `get_bean` 选中同一个实例
    fn find_constructed(&self, type_id: TypeId) -> Option<Box<dyn Any>> {
        self.entries().find_map(|entry| entry.upcast(type_id))
    }

    /// 实例，按定义注册顺序
    fn entries(&self) -> impl Iterator<Item = &BeanEntry> {
        self.definitions
            .keys()
            .filter_map(|name| self.instances.get(name))
    }

    fn state(&self, name: &str) -> BeanState {
        self.states.get(name).copied().unwrap_or_default()
    }

    /// 扫描的命名空间
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// 容器配置
    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// 获取 bean 定义
    pub fn definition(&self, name: &str) -> Option<&BeanDefinition> {
        self.definitions.get(name)
    }

    /// 所有 bean 定义，按注册顺序
    pub fn definitions(&self) -> impl Iterator<Item = &BeanDefinition> {
        self.definitions.values()
    }

    /// bean 的生命周期状态，未定义时返回 `None`
    pub fn bean_state(&self, name: &str) -> Option<BeanState> {
        self.states.get(name).copied()
    }

    /// bean 数量
    pub fn bean_count(&self) -> usize {
        self.instances.len()
    }
}

impl BeanFactory for ApplicationContext {
    fn get_bean_by_name(&self, name: &str) -> Option<BeanInstance> {
        self.instances
            .get(name)
            .map(|entry| Arc::clone(&entry.instance))
    }

    fn get_bean<T: ?Sized + 'static>(&self) -> Option<Arc<T>> {
        self.entries().find_map(BeanEntry::cast::<T>)
    }

    fn get_beans<T: ?Sized + 'static>(&self) -> Vec<Arc<T>> {
        self.entries().filter_map(BeanEntry::cast::<T>).collect()
    }

    fn contains_bean(&self, name: &str) -> bool {
        self.instances.contains_key(name)
    }

    fn bean_names(&self) -> Vec<String> {
        self.definitions
            .keys()
            .filter(|name| self.instances.contains_key(*name))
            .cloned()
            .collect()
    }
}

impl std::fmt::Debug for ApplicationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplicationContext")
            .field("namespace", &self.namespace)
            .field("config", &self.config)
            .field("beans", &self.instances.keys().collect::<Vec<_>>())
            .finish()
    }
}
