#[doc(hidden)]
pub use inventory::submit;

use crate::ServiceContainer;

#[doc(hidden)]
pub struct ServiceRegister {
    pub register: fn(&mut ServiceContainer),
}

inventory::collect!(ServiceRegister);

/// Returns an iterator over all auto-registration functions.
///
/// [`ServiceContainer::auto_register`] runs every one of them against a new container.
/// If you want to pick the options yourself, use [`ContainerOptions::auto_register`](crate::ContainerOptions::auto_register),
/// or run them against a container of your own.
///
/// # Example
///
/// ```rust
/// use needle::{auto_registered_services, Service, ServiceContainer};
///
/// #[Service(scoped)]
/// struct A;
///
/// # fn main() {
/// let mut container = ServiceContainer::new();
/// auto_registered_services().for_each(|register| register(&mut container));
///
/// assert!(container.is_service_registered::<A>());
/// # }
/// ```
pub fn auto_registered_services() -> impl Iterator<Item = fn(&mut ServiceContainer)> {
    inventory::iter::<ServiceRegister>
        .into_iter()
        .map(|register| register.register)
}

/// Register a service that will be collected by [`auto_registered_services`].
///
/// If you have:
///   - Enabled the `auto-register` feature (which is enabled by default).
///   - Define the service using the `#[Service(singleton)]` or `#[Service(scoped)]` macro.
///   - `#[Service]` does not use `auto_register = false`.
///
/// Then you don't need to use this macro to register the service.
///
/// But if you implement [`Injectable`](crate::Injectable) by hand, or describe a type
/// with [`describe`](crate::describe), and you want to use auto-registration,
/// then you need to use this macro.
///
/// # Example
///
/// ```rust
/// use needle::{describe, register_service, Arguments, Injectable, ServiceContainer, TypeToken};
///
/// struct Clock;
///
/// impl Injectable for Clock {
///     fn dependencies() -> Vec<TypeToken> {
///         Vec::new()
///     }
///
///     fn construct(_: &mut Arguments) -> needle::Result<Self> {
///         Ok(Clock)
///     }
/// }
///
/// struct Greeting(&'static str);
///
/// register_service!(Singleton, Clock);
/// register_service!(Scoped, descriptor = describe::<Greeting>().factory(|_| Ok(Greeting("Hello"))));
///
/// fn main() {
///     let container = ServiceContainer::auto_register();
///     assert!(container.get_service::<Clock>().is_ok());
///     assert_eq!(container.get_service::<Greeting>().unwrap().0, "Hello");
/// }
/// ```
#[macro_export]
macro_rules! register_service {
    ($lifetime:ident, descriptor = $descriptor:expr) => {
        const _: () = {
            fn register(container: &mut $crate::ServiceContainer) {
                container.add_service($descriptor, $crate::Lifetime::$lifetime);
            }

            $crate::submit! {
                $crate::ServiceRegister {
                    register
                }
            }
        };
    };
    ($lifetime:ident, $ty:ty) => {
        $crate::register_service!($lifetime, descriptor = $crate::Descriptor::of::<$ty>());
    };
}
