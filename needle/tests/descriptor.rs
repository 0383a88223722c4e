use std::{cell::Cell, rc::Rc};

use needle::{
    describe, Arguments, Descriptor, Error, Injectable, ServiceContainer, TypeToken,
};

thread_local! {
    static CLOSED: Cell<usize> = const { Cell::new(0) };
}

fn closed() -> usize {
    CLOSED.with(Cell::get)
}

struct Connection;

struct Pool {
    connection: Rc<Connection>,
}

fn close(_: &Pool) {
    CLOSED.with(|closed| closed.set(closed.get() + 1));
}

#[test]
fn explicit_registration() {
    let mut container = ServiceContainer::new();
    container
        .add_singleton_with(describe::<Connection>().factory(|_| Ok(Connection)))
        .add_singleton_with(
            describe::<Pool>()
                .depends_on::<Connection>()
                .on_dispose(close)
                .factory(|args| {
                    Ok(Pool {
                        connection: args.next()?,
                    })
                }),
        );

    let pool = container.get_service::<Pool>().unwrap();
    assert!(Rc::ptr_eq(
        &pool.connection,
        &container.get_service::<Connection>().unwrap()
    ));

    container.collect_singleton::<Connection>();
    assert_eq!(closed(), 0);

    container.collect_singleton::<Pool>();
    container.collect_singleton::<Pool>();
    assert_eq!(closed(), 1);
}

#[test]
fn factory_sees_positions() {
    struct Pair {
        first: usize,
        second: usize,
        remaining: usize,
    }

    let mut container = ServiceContainer::new();
    container
        .add_singleton_with(describe::<Connection>().factory(|_| Ok(Connection)))
        .add_scoped_with(
            describe::<Pair>()
                .depends_on::<Connection>()
                .depends_on::<Connection>()
                .factory(|args| {
                    assert_eq!(args.service(), TypeToken::of::<Pair>());

                    let first = args.position();
                    args.next::<Connection>()?;
                    let second = args.position();
                    args.next::<Connection>()?;

                    Ok(Pair {
                        first,
                        second,
                        remaining: args.remaining(),
                    })
                }),
        );

    let pair = container.get_service::<Pair>().unwrap();
    assert_eq!((pair.first, pair.second, pair.remaining), (0, 1, 0));
}

#[test]
fn factory_reads_wrong_type() {
    let mut container = ServiceContainer::new();
    container
        .add_singleton_with(describe::<Connection>().factory(|_| Ok(Connection)))
        .add_singleton_with(
            describe::<Pool>()
                .depends_on::<Connection>()
                .factory(|args| {
                    args.next::<Pool>()?;
                    unreachable!()
                }),
        );

    match container.get_service::<Pool>() {
        Err(Error::TypeMismatch {
            service,
            position,
            found,
            ..
        }) => {
            assert_eq!(service, TypeToken::of::<Pool>());
            assert_eq!(position, 0);
            assert_eq!(found, TypeToken::of::<Connection>());
        }
        _ => panic!("expected `TypeMismatch`"),
    }

    assert!(!container.contains_singleton::<Pool>());
}

#[test]
fn factory_reads_past_the_end() {
    let mut container = ServiceContainer::new();
    container.add_scoped_with(describe::<Pool>().factory(|args| {
        Ok(Pool {
            connection: args.next()?,
        })
    }));

    assert!(matches!(
        container.get_service::<Pool>(),
        Err(Error::MissingArgument { position: 0, .. })
    ));
}

struct Clock {
    ticks: Cell<u32>,
}

impl Injectable for Clock {
    fn dependencies() -> Vec<TypeToken> {
        Vec::new()
    }

    fn construct(_: &mut Arguments) -> needle::Result<Self> {
        Ok(Clock {
            ticks: Cell::new(0),
        })
    }
}

struct Timer {
    clock: Rc<Clock>,
}

impl Injectable for Timer {
    fn dependencies() -> Vec<TypeToken> {
        vec![TypeToken::of::<Clock>()]
    }

    fn construct(args: &mut Arguments) -> needle::Result<Self> {
        let clock: Rc<Clock> = args.next()?;
        clock.ticks.set(clock.ticks.get() + 1);

        Ok(Timer { clock })
    }
}

#[test]
fn manual_injectable() {
    let descriptor = Descriptor::of::<Timer>();
    assert_eq!(descriptor.token(), TypeToken::of::<Timer>());
    assert_eq!(descriptor.dependencies(), &[TypeToken::of::<Clock>()]);

    let mut container = ServiceContainer::new();
    container.add_singleton::<Clock>().add_scoped::<Timer>();

    let a = container.get_service::<Timer>().unwrap();
    let b = container.get_service::<Timer>().unwrap();

    assert!(Rc::ptr_eq(&a.clock, &b.clock));
    assert_eq!(a.clock.ticks.get(), 2);

    // without a disposal capability, collecting only drops the cache
    container.collect_singleton::<Clock>();
    let c = container.get_service::<Timer>().unwrap();
    assert!(!Rc::ptr_eq(&a.clock, &c.clock));
    assert_eq!(c.clock.ticks.get(), 1);
}

#[test]
fn debug_shows_dispose_hook() {
    let plain = format!(
        "{:?}",
        describe::<Connection>().factory(|_| Ok(Connection))
    );
    assert!(plain.contains("dispose_hook: false"));

    let hooked = format!(
        "{:?}",
        describe::<Pool>()
            .depends_on::<Connection>()
            .on_dispose(close)
            .factory(|args| Ok(Pool {
                connection: args.next()?
            }))
    );
    assert!(hooked.contains("dispose_hook: true"));
    assert!(hooked.contains("Connection"));

    // the hook of an injectable type defers to `as_dispose` at collection time
    assert!(format!("{:?}", Descriptor::of::<Clock>()).contains("dispose_hook: true"));
}
