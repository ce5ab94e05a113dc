use bean_macros::Bean;
use di_abstractions::{BeanClass, Shared};
use std::sync::Arc;

#[derive(Default)]
struct Clock;

#[derive(Bean)]
#[bean(class = "demo.Scheduler", constructor = "Scheduler::new")]
struct Scheduler {
    #[bean(reference)]
    clock: Shared<Clock>,
    #[bean(value)]
    interval: Option<u32>,
}

impl Scheduler {
    fn new() -> Self {
        Self {
            clock: Arc::default(),
            interval: None,
        }
    }
}

fn main() {
    let bean_type = Scheduler::bean_type();
    let value = bean_type.instantiate();
    assert!(value.is::<Scheduler>());
    assert!(bean_type.property("clock").unwrap().kind().is_reference());
    assert!(bean_type.property("interval").unwrap().kind().is_literal());
}
