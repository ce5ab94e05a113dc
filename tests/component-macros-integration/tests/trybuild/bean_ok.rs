use bean_macros::Bean;
use di_abstractions::{BeanClass, Shared};
use std::any::TypeId;

trait Greeter: Send + Sync {
    fn greet(&self) -> String;
}

#[derive(Default, Bean)]
#[bean(class = "demo.Hello", post_construct = "init", provides(dyn Greeter))]
struct Hello {
    #[bean(value)]
    name: String,
    #[bean(value, name = "times")]
    repeat: u8,
    #[bean(reference)]
    other: Option<Shared<Hello>>,
    ready: bool,
}

impl Hello {
    fn init(&mut self) {
        self.ready = true;
    }
}

impl Greeter for Hello {
    fn greet(&self) -> String {
        format!("hello {} x{}", self.name, self.repeat)
    }
}

fn main() {
    let bean_type = Hello::bean_type();
    assert_eq!(bean_type.class_name(), "demo.Hello");
    assert!(bean_type.property("name").is_some());
    assert!(bean_type.property("times").is_some());
    assert!(bean_type.property("other").is_some());
    assert!(bean_type.property("ready").is_none());
    assert!(bean_type.is_assignable_to(TypeId::of::<dyn Greeter>()));
    assert_eq!(bean_type.post_construct_callbacks().len(), 1);
}
