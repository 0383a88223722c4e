use std::{cell::Cell, rc::Rc};

use needle::{Dispose, MissingDependency, Service, ServiceContainer};

#[Service(singleton, dispose)]
struct Greeting {
    #[di(default = Cell::new(0))]
    greeted: Cell<usize>,
}

impl Greeting {
    fn hello(&self, name: &str) -> String {
        self.greeted.set(self.greeted.get() + 1);
        format!("Hello, {name}!")
    }
}

impl Dispose for Greeting {
    fn dispose(&self) {
        tracing::info!("greeted {} times", self.greeted.get());
    }
}

#[Service]
struct Audit;

#[Service(scoped)]
struct Controller {
    greeting: Rc<Greeting>,
    audit: Option<Rc<Audit>>,
}

impl Controller {
    fn run(&self, name: &str) {
        println!("{}", self.greeting.hello(name));

        if self.audit.is_none() {
            tracing::warn!("running without audit");
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // `Audit` is never registered, so its optional slot is skipped
    let container = ServiceContainer::options()
        .missing_dependency(MissingDependency::Skip)
        .auto_register();

    for name in ["World", "Needle"] {
        match container.get_service::<Controller>() {
            Ok(controller) => controller.run(name),
            Err(e) => tracing::error!("{e}"),
        }
    }

    container.collect_singleton::<Greeting>();
}
