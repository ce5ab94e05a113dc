use bean_macros::Bean;
use di_abstractions::{
    BeanClass, BeanCreationResult, BeanDefinitions, BeanFactoryPostProcessor, BeanPostProcessor,
};

#[derive(Default, Bean)]
#[bean(factory_post_processor, bean_post_processor)]
struct Audit;

impl BeanFactoryPostProcessor for Audit {
    fn post_process_bean_factory(&self, _definitions: &mut BeanDefinitions) -> BeanCreationResult<()> {
        Ok(())
    }
}

impl BeanPostProcessor for Audit {}

fn main() {
    let bean_type = Audit::bean_type();
    assert_eq!(bean_type.class_name(), "Audit");
    assert!(bean_type.capabilities().factory_post_processor);
    assert!(bean_type.capabilities().bean_post_processor);
    assert!(bean_type.create_factory_post_processor().is_some());
    assert!(bean_type.create_bean_post_processor().is_some());
}
