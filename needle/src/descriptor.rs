use std::{any::Any, fmt, marker::PhantomData, rc::Rc};

use crate::{Arguments, Dispose, Injectable, Result, TypeToken};

/// A resolved service with its type erased.
pub type Instance = Rc<dyn Any>;

type Factory = Box<dyn Fn(&mut Arguments) -> Result<Instance>>;

type Disposer = Box<dyn Fn(&dyn Any)>;

/// Describes how to build one type: the dependencies its constructor needs,
/// the constructor itself, and how to release an instance.
///
/// A descriptor built by [`Descriptor::of`] always carries a dispose hook, which
/// asks the instance for its [`Injectable::as_dispose`] capability when it is
/// collected. A descriptor built by [`describe`] only carries one if
/// [`DescriptorBuilder::on_dispose`] or [`DescriptorBuilder::disposable`] was called.
///
/// A descriptor is immutable once built. Create one with [`describe`] or
/// [`Descriptor::of`], then hand it to
/// [`ServiceContainer::add_scoped_with`](crate::ServiceContainer::add_scoped_with) or
/// [`ServiceContainer::add_singleton_with`](crate::ServiceContainer::add_singleton_with).
pub struct Descriptor {
    token: TypeToken,
    dependencies: Vec<TypeToken>,
    factory: Factory,
    disposer: Option<Disposer>,
}

impl Descriptor {
    /// Returns the descriptor of an [`Injectable`] type.
    pub fn of<T: Injectable>() -> Descriptor {
        Descriptor {
            token: TypeToken::of::<T>(),
            dependencies: T::dependencies(),
            factory: Box::new(|args: &mut Arguments| {
                T::construct(args).map(|instance| Rc::new(instance) as Instance)
            }),
            disposer: Some(Box::new(|instance: &dyn Any| {
                if let Some(dispose) = instance.downcast_ref::<T>().and_then(T::as_dispose) {
                    dispose.dispose();
                }
            })),
        }
    }

    /// Returns the type this descriptor builds.
    pub fn token(&self) -> TypeToken {
        self.token
    }

    /// Returns the dependencies of the constructor, in the order it reads them.
    pub fn dependencies(&self) -> &[TypeToken] {
        &self.dependencies
    }

    pub(crate) fn construct(&self, args: &mut Arguments) -> Result<Instance> {
        (self.factory)(args)
    }

    pub(crate) fn dispose(&self, instance: &Instance) {
        if let Some(disposer) = &self.disposer {
            disposer(&**instance);
        }
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("token", &self.token)
            .field("dependencies", &self.dependencies)
            .field("dispose_hook", &self.disposer.is_some())
            .finish()
    }
}

/// Builder returned by [`describe`].
pub struct DescriptorBuilder<T> {
    dependencies: Vec<TypeToken>,
    disposer: Option<fn(&T)>,
    _marker: PhantomData<fn() -> T>,
}

/// Starts describing how to build a `T`.
///
/// # Example
///
/// ```rust
/// use std::cell::Cell;
///
/// use needle::{describe, Dispose, ServiceContainer};
///
/// struct Pool {
///     open: Cell<bool>,
/// }
///
/// impl Dispose for Pool {
///     fn dispose(&self) {
///         self.open.set(false);
///     }
/// }
///
/// # fn main() -> needle::Result<()> {
/// let mut container = ServiceContainer::new();
/// container.add_singleton_with(
///     describe::<Pool>()
///         .disposable()
///         .factory(|_| Ok(Pool { open: Cell::new(true) })),
/// );
///
/// let pool = container.get_service::<Pool>()?;
/// container.collect_singleton::<Pool>();
/// assert!(!pool.open.get());
/// # Ok(())
/// # }
/// ```
pub fn describe<T: 'static>() -> DescriptorBuilder<T> {
    DescriptorBuilder {
        dependencies: Vec::new(),
        disposer: None,
        _marker: PhantomData,
    }
}

impl<T: 'static> DescriptorBuilder<T> {
    /// Appends `D` to the dependency list.
    pub fn depends_on<D: 'static>(mut self) -> Self {
        self.dependencies.push(TypeToken::of::<D>());
        self
    }

    /// Sets the function run when a cached instance is collected.
    pub fn on_dispose(mut self, disposer: fn(&T)) -> Self {
        self.disposer = Some(disposer);
        self
    }

    /// Uses the [`Dispose`] implementation of `T` when a cached instance is collected.
    pub fn disposable(self) -> Self
    where
        T: Dispose,
    {
        self.on_dispose(<T as Dispose>::dispose)
    }

    /// Finishes the descriptor with the constructor of `T`.
    pub fn factory<F>(self, factory: F) -> Descriptor
    where
        F: Fn(&mut Arguments) -> Result<T> + 'static,
    {
        let DescriptorBuilder {
            dependencies,
            disposer,
            ..
        } = self;

        Descriptor {
            token: TypeToken::of::<T>(),
            dependencies,
            factory: Box::new(move |args: &mut Arguments| {
                factory(args).map(|instance| Rc::new(instance) as Instance)
            }),
            disposer: disposer.map(|disposer| {
                Box::new(move |instance: &dyn Any| {
                    if let Some(instance) = instance.downcast_ref::<T>() {
                        disposer(instance);
                    }
                }) as Disposer
            }),
        }
    }
}
