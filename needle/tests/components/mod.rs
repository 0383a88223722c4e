use std::{cell::Cell, rc::Rc};

use needle::{Dispose, Service};

thread_local! {
    static CREATED: Cell<usize> = const { Cell::new(0) };
    static DISPOSED: Cell<usize> = const { Cell::new(0) };
}

fn next_id() -> usize {
    CREATED.with(|created| {
        let id = created.get();
        created.set(id + 1);
        id
    })
}

/// Number of `SingletonService` built on the current thread.
#[allow(dead_code)]
pub(crate) fn created() -> usize {
    CREATED.with(Cell::get)
}

/// Number of `SingletonService` disposed on the current thread.
#[allow(dead_code)]
pub(crate) fn disposed() -> usize {
    DISPOSED.with(Cell::get)
}

#[Service(dispose)]
pub(crate) struct SingletonService {
    #[di(default = next_id())]
    pub(crate) id: usize,
}

impl SingletonService {
    #[allow(dead_code)]
    pub(crate) fn say_hello(&self) -> &'static str {
        "hello"
    }
}

impl Dispose for SingletonService {
    fn dispose(&self) {
        DISPOSED.with(|disposed| disposed.set(disposed.get() + 1));
    }
}

#[allow(dead_code)]
#[Service]
pub(crate) struct ScopedServiceWithOneSingleton {
    pub(crate) test_service: Rc<SingletonService>,
}

#[allow(dead_code)]
#[Service]
pub(crate) struct ScopedServiceWithTwoSingleton {
    pub(crate) singleton_service_a: Rc<SingletonService>,
    pub(crate) singleton_service_b: Rc<SingletonService>,
}
