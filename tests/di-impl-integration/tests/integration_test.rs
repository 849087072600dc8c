//! 宏声明的组件通过类型目录扫描装配的集成测试

use di_abstractions::BeanFactory;
use di_impl::{ApplicationContext, CatalogTypeDiscovery};
use infrastructure_common::{
    BeanState, ContainerConfig, CreationPhase, InitializationError, InjectionPolicy,
};
use std::sync::Arc;

/// 测试用接口
pub trait Animal: Send + Sync {
    fn sound(&self) -> String;
}

fn namespace(module: &str) -> String {
    format!("{}::{}", module_path!(), module)
}

pub mod zoo {
    use super::Animal;
    use component_macros::{lifecycle, Component};
    use std::sync::Arc;

    #[derive(Debug, Default, Component)]
    #[component(name = "mydog")]
    #[implements(dyn Animal)]
    pub struct Dog;

    impl Animal for Dog {
        fn sound(&self) -> String {
            "wang".to_string()
        }
    }

    #[derive(Debug, Default, Component)]
    #[component(lifecycle)]
    #[implements(dyn Animal)]
    pub struct Cat {
        #[autowired]
        pub dog: Option<Arc<Dog>>,
        pub greeting: Option<String>,
        pub saw_dog_in_init: bool,
    }

    impl Animal for Cat {
        fn sound(&self) -> String {
            "miao".to_string()
        }
    }

    #[lifecycle]
    impl Cat {
        #[post_construct]
        fn init(&mut self) {
            self.saw_dog_in_init = self.dog.is_some();
            self.greeting = Some(format!("cat 喵喵 {:?}", self.dog));
        }
    }

    pub mod keepers {
        use super::Animal;
        use component_macros::Component;
        use std::sync::Arc;

        #[derive(Default, Component)]
        pub struct Keeper {
            #[autowired]
            pub animal: Option<Arc<dyn Animal>>,
        }
    }
}

pub mod cycle {
    use component_macros::Component;
    use std::sync::Arc;

    #[derive(Debug, Default, Component)]
    pub struct Alpha {
        #[autowired]
        pub beta: Option<Arc<Beta>>,
    }

    #[derive(Debug, Default, Component)]
    pub struct Beta {
        #[autowired]
        pub alpha: Option<Arc<Alpha>>,
    }

    #[derive(Debug, Default, Component)]
    pub struct Narcissus {
        #[autowired]
        pub me: Option<Arc<Narcissus>>,
    }
}

pub mod broken {
    use component_macros::{lifecycle, Component};

    #[derive(Debug, Default, Component)]
    #[component(lifecycle)]
    pub struct Vault;

    #[lifecycle]
    impl Vault {
        #[post_construct]
        fn open(&self) -> Result<(), String> {
            Err("no keys".to_string())
        }
    }
}

pub mod twins {
    use component_macros::Component;

    #[derive(Debug, Default, Component)]
    #[component(name = "twin")]
    pub struct Left;

    #[derive(Debug, Default, Component)]
    #[component(name = "twin")]
    pub struct Right;
}

use cycle::{Alpha, Beta, Narcissus};
use zoo::keepers::Keeper;
use zoo::{Cat, Dog};

#[tokio::test]
async fn test_cat_dog_scenario() -> anyhow::Result<()> {
    let context = ApplicationContext::create(namespace("zoo"), &CatalogTypeDiscovery).await?;

    let cat = context.get_named_bean::<Cat>("Cat").expect("cat");
    let dog = context.get_named_bean::<Dog>("mydog").expect("dog");

    assert!(Arc::ptr_eq(cat.dog.as_ref().expect("injected dog"), &dog));
    assert!(cat.saw_dog_in_init);
    assert!(cat
        .greeting
        .as_deref()
        .is_some_and(|greeting| greeting.starts_with("cat 喵喵")));
    assert!(context.get_bean_by_name("Dog").is_none());
    Ok(())
}

#[tokio::test]
async fn test_namespace_contains_child_modules() -> anyhow::Result<()> {
    let context = ApplicationContext::create(namespace("zoo"), &CatalogTypeDiscovery).await?;

    assert_eq!(context.bean_count(), 3);
    let keeper = context.get_bean::<Keeper>().expect("keeper");
    assert!(keeper.animal.is_some());

    let child = ApplicationContext::create(namespace("zoo.keepers"), &CatalogTypeDiscovery).await?;
    assert_eq!(child.bean_names(), vec!["Keeper".to_string()]);
    // 命名空间里没有任何 Animal，字段保持为空
    let keeper = child.get_bean::<Keeper>().expect("keeper");
    assert!(keeper.animal.is_none());
    Ok(())
}

#[tokio::test]
async fn test_get_beans_by_trait() -> anyhow::Result<()> {
    let context = ApplicationContext::create(namespace("zoo"), &CatalogTypeDiscovery).await?;

    let sounds: Vec<String> = context
        .get_beans::<dyn Animal>()
        .iter()
        .map(|animal| animal.sound())
        .collect();
    assert_eq!(sounds.len(), 2);
    assert!(sounds.contains(&"miao".to_string()));
    assert!(sounds.contains(&"wang".to_string()));
    Ok(())
}

#[tokio::test]
async fn test_cycle_is_broken_not_fatal() -> anyhow::Result<()> {
    let context = ApplicationContext::create(namespace("cycle"), &CatalogTypeDiscovery).await?;

    let alpha = context.get_bean::<Alpha>().expect("alpha");
    let beta = context.get_bean::<Beta>().expect("beta");

    // Alpha 先创建，Beta 在注入时按需创建，此时 Alpha 仍在创建中
    assert!(Arc::ptr_eq(alpha.beta.as_ref().expect("beta"), &beta));
    assert!(beta.alpha.is_none());

    let narcissus = context.get_bean::<Narcissus>().expect("narcissus");
    assert!(narcissus.me.is_none());

    for name in ["Alpha", "Beta", "Narcissus"] {
        assert_eq!(context.bean_state(name), Some(BeanState::Constructed));
    }
    Ok(())
}

#[tokio::test]
async fn test_disabled_injection_leaves_fields_empty() -> anyhow::Result<()> {
    let config = ContainerConfig::default().with_injection(InjectionPolicy::Disabled);
    let context =
        ApplicationContext::create_with_config(namespace("zoo"), &CatalogTypeDiscovery, config)
            .await?;

    let cat = context.get_bean::<Cat>().expect("cat");
    assert!(cat.dog.is_none());
    assert!(!cat.saw_dog_in_init);
    Ok(())
}

#[tokio::test]
async fn test_failing_post_construct_aborts() {
    let error = ApplicationContext::create(namespace("broken"), &CatalogTypeDiscovery)
        .await
        .unwrap_err();

    match error {
        InitializationError::BeanCreation { name, phase, source } => {
            assert_eq!(name, "Vault");
            assert_eq!(phase, CreationPhase::PostConstruct);
            assert_eq!(source.to_string(), "no keys");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_duplicate_names_abort() {
    let error = ApplicationContext::create(namespace("twins"), &CatalogTypeDiscovery)
        .await
        .unwrap_err();

    assert!(error.is_duplicate_name());
}

#[tokio::test]
async fn test_empty_namespace_yields_empty_context() -> anyhow::Result<()> {
    let context = ApplicationContext::create(namespace("nowhere"), &CatalogTypeDiscovery).await?;

    assert_eq!(context.bean_count(), 0);
    assert!(context.get_bean::<Cat>().is_none());
    Ok(())
}
