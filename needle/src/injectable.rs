use crate::{Arguments, Result, TypeToken};

/// A trait for types the container knows how to build on its own.
///
/// Define this trait so that the purpose is not to be implemented manually,
/// but to use the `#[Service]` attribute macro to generate the implementation.
/// Implementing it by hand is fine too, it is the same contract the macro fulfils.
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
///
/// use needle::{Arguments, Injectable, ServiceContainer, TypeToken};
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
/// struct Scheduler {
///     clock: Rc<Clock>,
/// }
///
/// impl Injectable for Scheduler {
///     fn dependencies() -> Vec<TypeToken> {
///         vec![TypeToken::of::<Clock>()]
///     }
///
///     fn construct(args: &mut Arguments) -> needle::Result<Self> {
///         Ok(Scheduler { clock: args.next()? })
///     }
/// }
///
/// # fn main() -> needle::Result<()> {
/// let mut container = ServiceContainer::new();
/// container.add_singleton::<Clock>().add_scoped::<Scheduler>();
///
/// let a = container.get_service::<Scheduler>()?;
/// let b = container.get_service::<Scheduler>()?;
/// assert!(!Rc::ptr_eq(&a, &b));
/// assert!(Rc::ptr_eq(&a.clock, &b.clock));
/// # Ok(())
/// # }
/// ```
pub trait Injectable: Sized + 'static {
    /// The types the constructor needs, in the order [`Injectable::construct`] reads them.
    fn dependencies() -> Vec<TypeToken>;

    /// Builds an instance from the resolved dependencies.
    fn construct(args: &mut Arguments) -> Result<Self>;

    /// Returns the disposal capability of the instance, if it has one.
    fn as_dispose(&self) -> Option<&dyn Dispose> {
        None
    }
}

/// Releases the resources held by a singleton when it is collected.
///
/// The hook runs once per cached instance, from
/// [`ServiceContainer::collect_singleton`](crate::ServiceContainer::collect_singleton).
pub trait Dispose {
    /// Releases the resources of the instance.
    fn dispose(&self);
}
