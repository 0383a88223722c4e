mod components;

use std::rc::Rc;

use needle::{Error, Lifetime, ServiceContainer, TypeToken};

use crate::components::{
    created, disposed, ScopedServiceWithOneSingleton, ScopedServiceWithTwoSingleton,
    SingletonService,
};

#[test]
fn register_then_resolve() {
    let mut container = ServiceContainer::new();
    container
        .add_singleton::<SingletonService>()
        .add_scoped::<ScopedServiceWithOneSingleton>();

    let instance = container
        .get_service::<ScopedServiceWithOneSingleton>()
        .unwrap();

    assert_eq!(instance.test_service.say_hello(), "hello");
}

#[test]
fn only_one_singleton_instance() {
    let mut container = ServiceContainer::new();
    container
        .add_singleton::<SingletonService>()
        .add_scoped::<ScopedServiceWithTwoSingleton>();

    let instance = container
        .get_service::<ScopedServiceWithTwoSingleton>()
        .unwrap();

    assert_eq!(
        instance.singleton_service_a.id,
        instance.singleton_service_b.id
    );
    assert!(Rc::ptr_eq(
        &instance.singleton_service_a,
        &instance.singleton_service_b
    ));
    assert_eq!(created(), 1);
}

#[test]
fn singleton_shared_across_dependents() {
    let mut container = ServiceContainer::new();
    container
        .add_singleton::<SingletonService>()
        .add_scoped::<ScopedServiceWithOneSingleton>()
        .add_scoped::<ScopedServiceWithTwoSingleton>();

    let one = container
        .get_service::<ScopedServiceWithOneSingleton>()
        .unwrap();
    let two = container
        .get_service::<ScopedServiceWithTwoSingleton>()
        .unwrap();

    assert!(Rc::ptr_eq(&one.test_service, &two.singleton_service_a));
    assert_eq!(one.test_service.id, two.singleton_service_b.id);
}

#[test]
fn dispose_runs_once() {
    let mut container = ServiceContainer::new();
    container
        .add_singleton::<SingletonService>()
        .add_scoped::<ScopedServiceWithOneSingleton>();

    container.collect_singleton::<SingletonService>();
    assert_eq!(disposed(), 0);

    container
        .get_service::<ScopedServiceWithOneSingleton>()
        .unwrap();
    container.collect_singleton::<SingletonService>();
    container.collect_singleton::<SingletonService>();

    assert_eq!(disposed(), 1);
}

#[test]
fn singleton_identical_until_collected() {
    let mut container = ServiceContainer::new();
    container.add_singleton::<SingletonService>();

    let a = container.get_service::<SingletonService>().unwrap();
    let b = container.get_service::<SingletonService>().unwrap();
    assert!(Rc::ptr_eq(&a, &b));
    assert!(container.contains_singleton::<SingletonService>());

    container.collect_singleton::<SingletonService>();
    assert!(!container.contains_singleton::<SingletonService>());

    let c = container.get_service::<SingletonService>().unwrap();
    assert!(!Rc::ptr_eq(&a, &c));
    assert_ne!(a.id, c.id);
    assert!(container.contains_singleton::<SingletonService>());

    container.collect_singleton::<SingletonService>();
    assert_eq!(disposed(), 2);
}

#[test]
fn scoped_always_new() {
    let mut container = ServiceContainer::new();
    container.add_scoped::<SingletonService>();

    let a = container.get_service::<SingletonService>().unwrap();
    let b = container.get_service::<SingletonService>().unwrap();

    assert!(!Rc::ptr_eq(&a, &b));
    assert_ne!(a.id, b.id);
    assert!(!container.contains_singleton::<SingletonService>());
}

#[test]
fn collect_scoped_is_noop() {
    let mut container = ServiceContainer::new();
    container.add_scoped::<SingletonService>();

    container.get_service::<SingletonService>().unwrap();
    container.collect_singleton::<SingletonService>();

    assert_eq!(disposed(), 0);
}

#[test]
fn collect_unregistered_is_noop() {
    let container = ServiceContainer::new();
    container.collect_singleton::<SingletonService>();

    assert_eq!(disposed(), 0);
}

#[test]
fn unregistered_service() {
    let mut container = ServiceContainer::new();
    container.add_singleton::<SingletonService>();

    match container.get_service::<ScopedServiceWithOneSingleton>() {
        Err(Error::ServiceNotRegistered { token }) => {
            assert_eq!(token, TypeToken::of::<ScopedServiceWithOneSingleton>());
        }
        _ => panic!("expected `ServiceNotRegistered`"),
    }

    assert_eq!(created(), 0);
}

#[test]
fn first_registration_wins() {
    let mut container = ServiceContainer::new();
    container
        .add_scoped::<SingletonService>()
        .add_singleton::<SingletonService>()
        .add_scoped::<SingletonService>();

    assert_eq!(container.len(), 1);
    assert_eq!(
        container.lifetime_of::<SingletonService>(),
        Some(Lifetime::Scoped)
    );

    let a = container.get_service::<SingletonService>().unwrap();
    let b = container.get_service::<SingletonService>().unwrap();
    assert!(!Rc::ptr_eq(&a, &b));
}

#[test]
fn registration_introspection() {
    let mut container = ServiceContainer::new();
    assert!(container.is_empty());
    assert!(!container.is_service_registered::<SingletonService>());

    container
        .add_singleton::<SingletonService>()
        .add_scoped::<ScopedServiceWithOneSingleton>();

    assert!(container.is_service_registered::<SingletonService>());
    assert!(container.is_service_registered_by_token(&TypeToken::of::<
        ScopedServiceWithOneSingleton,
    >()));
    assert!(!container.is_service_registered::<ScopedServiceWithTwoSingleton>());

    let mut tokens = container.registered_tokens().collect::<Vec<_>>();
    tokens.sort();

    let mut expected = vec![
        TypeToken::of::<SingletonService>(),
        TypeToken::of::<ScopedServiceWithOneSingleton>(),
    ];
    expected.sort();

    assert_eq!(tokens, expected);

    assert_eq!(
        container
            .descriptor_of::<ScopedServiceWithOneSingleton>()
            .unwrap()
            .dependencies(),
        &[TypeToken::of::<SingletonService>()]
    );
}

#[test]
fn resolve_by_token() {
    let mut container = ServiceContainer::new();
    container.add_singleton::<SingletonService>();

    let token = TypeToken::of::<SingletonService>();
    let erased = container.get_service_by_token(&token).unwrap();
    let typed = container.get_service::<SingletonService>().unwrap();

    assert!(Rc::ptr_eq(&erased.downcast::<SingletonService>().unwrap(), &typed));

    container.collect_singleton_by_token(&token);
    assert_eq!(disposed(), 1);
}

#[test]
fn containers_are_independent() {
    let mut first = ServiceContainer::new();
    first.add_singleton::<SingletonService>();

    let mut second = ServiceContainer::new();
    second.add_singleton::<SingletonService>();

    let a = first.get_service::<SingletonService>().unwrap();
    let b = second.get_service::<SingletonService>().unwrap();

    assert!(!Rc::ptr_eq(&a, &b));

    first.collect_singleton::<SingletonService>();
    assert!(second.contains_singleton::<SingletonService>());
}
