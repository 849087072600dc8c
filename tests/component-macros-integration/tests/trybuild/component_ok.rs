use component_macros::{lifecycle, Component};
use infrastructure_common::{ComponentType, TypeDescriptor};
use std::sync::Arc;

pub trait Greeter: Send + Sync {
    fn greet(&self) -> String;
}

#[derive(Default, Component)]
#[component(name = "english")]
#[implements(dyn Greeter)]
pub struct English;

impl Greeter for English {
    fn greet(&self) -> String {
        "hello".to_string()
    }
}

#[derive(Default, Component)]
#[component(lifecycle)]
pub struct Host {
    #[autowired]
    greeter: Option<Arc<dyn Greeter>>,
    #[autowired]
    english: Option<Arc<English>>,
    visits: u32,
}

#[lifecycle]
impl Host {
    #[post_construct]
    fn open(&mut self) {
        self.visits += 1;
    }

    #[post_construct]
    fn check(&self) -> Result<(), String> {
        match (&self.greeter, &self.english) {
            (Some(_), Some(_)) | (None, None) => Ok(()),
            _ => Err("partial wiring".to_string()),
        }
    }
}

fn main() {
    let descriptor: TypeDescriptor = Host::type_descriptor();
    assert_eq!(descriptor.fields.len(), 2);
    assert_eq!(descriptor.methods.len(), 2);
    assert_eq!(English::type_descriptor().simple_name, "English");
}
