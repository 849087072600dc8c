//! 组件宏生成的类型描述符测试

use component_macros::{lifecycle, Component};
use infrastructure_common::{registered_types, ComponentType, TypeInfo};
use std::any::TypeId;
use std::sync::Arc;

/// 测试用接口
pub trait Animal: Send + Sync {
    fn sound(&self) -> String;
}

pub mod pets {
    use super::*;

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
    pub struct Cat {
        #[autowired]
        pub dog: Option<Arc<Dog>>,
        pub greeting: Option<String>,
        pub hooks: Vec<&'static str>,
    }

    #[lifecycle]
    impl Cat {
        #[post_construct]
        fn init(&mut self) {
            self.greeting = Some("cat 喵喵".to_string());
            self.hooks.push("init");
        }

        #[post_construct]
        fn later(&mut self) -> Result<(), std::io::Error> {
            self.hooks.push("later");
            Ok(())
        }

        pub fn describe(&self) -> String {
            format!("{:?} {:?}", self.greeting, self.dog)
        }
    }

    /// 使用自定义构造函数的组件
    #[derive(Debug, Component)]
    #[component(constructor = "Counter::starting_at_ten")]
    pub struct Counter {
        pub value: u32,
    }

    impl Counter {
        fn starting_at_ten() -> Self {
            Self { value: 10 }
        }
    }
}

use pets::{Cat, Counter, Dog};

#[test]
fn test_default_name_and_module() {
    let descriptor = Cat::type_descriptor();

    assert_eq!(descriptor.simple_name, "Cat");
    assert_eq!(descriptor.type_info, TypeInfo::of::<Cat>());
    assert!(descriptor.module_path.ends_with("::pets"));
    assert!(descriptor.is_component());
    assert_eq!(
        descriptor.component.as_ref().and_then(|c| c.explicit_name()),
        None
    );
}

#[test]
fn test_explicit_name() {
    let descriptor = Dog::type_descriptor();
    let marker = descriptor.component.expect("component marker");
    assert_eq!(marker.resolve_name(&descriptor.simple_name), "mydog");
}

#[test]
fn test_autowired_fields() {
    let descriptor = Cat::type_descriptor();
    let autowired: Vec<_> = descriptor.autowired_fields().collect();

    assert_eq!(autowired.len(), 1);
    assert_eq!(autowired[0].name, "dog");
    assert_eq!(autowired[0].declared_type.id, TypeId::of::<Dog>());
    assert!(autowired[0].is_injectable());
}

#[test]
fn test_field_injection_through_descriptor() {
    let descriptor = Cat::type_descriptor();
    let constructor = descriptor.constructor.as_ref().expect("constructor");
    let mut cat = constructor.invoke().expect("constructed");

    let dog = Arc::new(Dog);
    let field = descriptor.autowired_fields().next().expect("dog field");
    field
        .inject(cat.as_mut(), Box::new(Arc::clone(&dog)))
        .expect("injected");

    let cat = cat.downcast::<Cat>().expect("cat");
    assert!(Arc::ptr_eq(cat.dog.as_ref().expect("dog"), &dog));
}

#[test]
fn test_post_construct_methods_in_declaration_order() {
    let descriptor = Cat::type_descriptor();
    let names: Vec<_> = descriptor
        .post_construct_methods()
        .map(|method| method.name.as_str())
        .collect();
    assert_eq!(names, vec!["init", "later"]);

    let mut cat = Cat::default();
    for method in descriptor.post_construct_methods() {
        method.invoke(&mut cat).expect("hook");
    }
    assert_eq!(cat.hooks, vec!["init", "later"]);
    assert!(cat.describe().contains("cat 喵喵"));
}

#[test]
fn test_implements_trait_view() {
    let descriptor = Dog::type_descriptor();
    assert!(descriptor.is_assignable_to(TypeId::of::<Dog>()));
    assert!(descriptor.is_assignable_to(TypeId::of::<dyn Animal>()));
    assert!(!Cat::type_descriptor().is_assignable_to(TypeId::of::<dyn Animal>()));
}

#[test]
fn test_custom_constructor() {
    let descriptor = Counter::type_descriptor();
    let counter = descriptor
        .constructor
        .as_ref()
        .expect("constructor")
        .invoke()
        .expect("constructed")
        .downcast::<Counter>()
        .expect("counter");
    assert_eq!(counter.value, 10);
}

#[test]
fn test_components_registered_at_startup() {
    let registered: Vec<TypeId> = registered_types()
        .iter()
        .map(|descriptor| descriptor.type_info.id)
        .collect();

    for id in [TypeId::of::<Cat>(), TypeId::of::<Dog>(), TypeId::of::<Counter>()] {
        assert!(registered.contains(&id));
    }
}
