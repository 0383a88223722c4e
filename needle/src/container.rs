use std::{any, collections::HashMap, rc::Rc};

use crate::{
    resolver::{Locator, ServiceResolver},
    Descriptor, Error, Injectable, Instance, Lifetime, MissingDependency, Result, TypeToken,
};

/// A container is the registry of every service and the owner of every
/// cached singleton.
///
/// It is the main entry point for the dependency injection: register types with
/// a [`Lifetime`], then resolve them. Resolving a type resolves its dependencies
/// first, through the same container.
///
/// When creating a `ServiceContainer`, you can use options to change the
/// default resolution behavior, see [`ContainerOptions`] for details.
///
/// The container is single threaded, it is neither `Send` nor `Sync`.
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
///
/// use needle::{Service, ServiceContainer};
///
/// #[Service]
/// struct Repository;
///
/// #[Service]
/// struct Handler {
///     repository: Rc<Repository>,
/// }
///
/// # fn main() -> needle::Result<()> {
/// let mut container = ServiceContainer::new();
/// container.add_singleton::<Repository>().add_scoped::<Handler>();
///
/// let a = container.get_service::<Handler>()?;
/// let b = container.get_service::<Handler>()?;
///
/// assert!(!Rc::ptr_eq(&a, &b));
/// assert!(Rc::ptr_eq(&a.repository, &b.repository));
/// # Ok(())
/// # }
/// ```
pub struct ServiceContainer {
    missing_dependency: MissingDependency,
    reject_primitives: bool,

    resolvers: HashMap<TypeToken, ServiceResolver>,
}

impl Default for ServiceContainer {
    fn default() -> Self {
        Self {
            missing_dependency: Default::default(),
            reject_primitives: true,
            resolvers: Default::default(),
        }
    }
}

impl ServiceContainer {
    /// Creates an empty container with the default options.
    pub fn new() -> ServiceContainer {
        ServiceContainer::default()
    }

    /// Returns a new ContainerOptions object.
    ///
    /// This function return a new ContainerOptions object that you can use to create a container
    /// with specific options if `create()` or `auto_register()` are not appropriate.
    ///
    /// It is equivalent to `ContainerOptions::default()`, but allows you to write more readable code.
    /// Instead of `ContainerOptions::default().missing_dependency(MissingDependency::Skip).create()`,
    /// you can write `ServiceContainer::options().missing_dependency(MissingDependency::Skip).create()`.
    /// This also avoids the need to import `ContainerOptions`.
    ///
    /// See the [`ContainerOptions`] for more details.
    pub fn options() -> ContainerOptions {
        ContainerOptions::default()
    }

    /// Creates a new container and registers every auto-registered service.
    ///
    /// See [`auto_registered_services`](crate::auto_registered_services) for more details.
    ///
    /// # Example
    ///
    /// ```rust
    /// use needle::{Service, ServiceContainer};
    ///
    /// #[Service(singleton)]
    /// struct A;
    ///
    /// # fn main() {
    /// let container = ServiceContainer::auto_register();
    /// assert!(container.get_service::<A>().is_ok());
    /// # }
    /// ```
    #[cfg_attr(docsrs, doc(cfg(feature = "auto-register")))]
    #[cfg(feature = "auto-register")]
    pub fn auto_register() -> ServiceContainer {
        ContainerOptions::default().auto_register()
    }

    /// Returns what happens to dependencies without a registration.
    pub fn missing_dependency(&self) -> MissingDependency {
        self.missing_dependency
    }

    /// Returns whether primitive dependencies are rejected.
    pub fn reject_primitives(&self) -> bool {
        self.reject_primitives
    }

    /// Registers `T` with the [`Lifetime::Scoped`] lifetime.
    ///
    /// If `T` is already registered, this is a no-op, the first registration wins.
    pub fn add_scoped<T: Injectable>(&mut self) -> &mut Self {
        self.add_service(Descriptor::of::<T>(), Lifetime::Scoped)
    }

    /// Registers `T` with the [`Lifetime::Singleton`] lifetime.
    ///
    /// If `T` is already registered, this is a no-op, the first registration wins.
    pub fn add_singleton<T: Injectable>(&mut self) -> &mut Self {
        self.add_service(Descriptor::of::<T>(), Lifetime::Singleton)
    }

    /// Registers an explicit [`Descriptor`] with the [`Lifetime::Scoped`] lifetime.
    ///
    /// If the described type is already registered, this is a no-op.
    pub fn add_scoped_with(&mut self, descriptor: Descriptor) -> &mut Self {
        self.add_service(descriptor, Lifetime::Scoped)
    }

    /// Registers an explicit [`Descriptor`] with the [`Lifetime::Singleton`] lifetime.
    ///
    /// If the described type is already registered, this is a no-op.
    pub fn add_singleton_with(&mut self, descriptor: Descriptor) -> &mut Self {
        self.add_service(descriptor, Lifetime::Singleton)
    }

    /// Registers an explicit [`Descriptor`] with the given lifetime.
    ///
    /// If the described type is already registered, this is a no-op: neither
    /// the lifetime nor the descriptor of an existing registration changes.
    pub fn add_service(&mut self, descriptor: Descriptor, lifetime: Lifetime) -> &mut Self {
        let token = descriptor.token();

        if self.resolvers.contains_key(&token) {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                "(!) already registered, keep the first: {:?} as {:?}",
                descriptor,
                lifetime
            );

            return self;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("(+) insert new: {:?} as {:?}", descriptor, lifetime);

        self.resolvers
            .insert(token, ServiceResolver::new(descriptor, lifetime));

        self
    }

    /// Returns an instance of `T`, building its dependencies first.
    ///
    /// A singleton is built once and shared until it is collected,
    /// a scoped service is built on every call.
    ///
    /// # Errors
    ///
    /// - [`Error::ServiceNotRegistered`] if `T` has no registration.
    /// - any error raised while resolving the dependencies of `T`, see [`Error`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::rc::Rc;
    ///
    /// use needle::{Error, Service, ServiceContainer};
    ///
    /// #[Service]
    /// struct A;
    ///
    /// #[Service]
    /// struct B;
    ///
    /// # fn main() {
    /// let mut container = ServiceContainer::new();
    /// container.add_singleton::<A>();
    ///
    /// let a = container.get_service::<A>().unwrap();
    /// assert!(Rc::ptr_eq(&a, &container.get_service::<A>().unwrap()));
    ///
    /// assert!(matches!(
    ///     container.get_service::<B>(),
    ///     Err(Error::ServiceNotRegistered { .. })
    /// ));
    /// # }
    /// ```
    pub fn get_service<T: 'static>(&self) -> Result<Rc<T>> {
        let instance = self.get_service_by_token(&TypeToken::of::<T>())?;

        match instance.downcast::<T>() {
            Ok(instance) => Ok(instance),
            Err(_) => unreachable!(
                "registry entry of `{}` built another type",
                any::type_name::<T>()
            ),
        }
    }

    /// Type-erased version of [`ServiceContainer::get_service`].
    ///
    /// # Errors
    ///
    /// See [`ServiceContainer::get_service`].
    pub fn get_service_by_token(&self, token: &TypeToken) -> Result<Instance> {
        match self.resolvers.get(token) {
            Some(resolver) => resolver.resolve(self),
            None => Err(Error::ServiceNotRegistered { token: *token }),
        }
    }

    /// Collects the cached singleton of `T`, running its disposal hook.
    ///
    /// This is a no-op if `T` is not registered, is scoped, or has no cached
    /// instance. The next resolution of `T` builds a fresh instance.
    ///
    /// Instances already handed out stay alive as long as they are referenced,
    /// the container only drops its own reference.
    pub fn collect_singleton<T: 'static>(&self) {
        self.collect_singleton_by_token(&TypeToken::of::<T>())
    }

    /// Type-erased version of [`ServiceContainer::collect_singleton`].
    pub fn collect_singleton_by_token(&self, token: &TypeToken) {
        if let Some(resolver) = self.resolvers.get(token) {
            resolver.dispose();
        }
    }

    /// Returns whether `T` is registered.
    pub fn is_service_registered<T: 'static>(&self) -> bool {
        self.is_service_registered_by_token(&TypeToken::of::<T>())
    }

    /// Type-erased version of [`ServiceContainer::is_service_registered`].
    pub fn is_service_registered_by_token(&self, token: &TypeToken) -> bool {
        self.resolvers.contains_key(token)
    }

    /// Returns the lifetime `T` is registered with.
    pub fn lifetime_of<T: 'static>(&self) -> Option<Lifetime> {
        self.resolvers
            .get(&TypeToken::of::<T>())
            .map(ServiceResolver::lifetime)
    }

    /// Returns the descriptor `T` is registered with.
    pub fn descriptor_of<T: 'static>(&self) -> Option<&Descriptor> {
        self.resolvers
            .get(&TypeToken::of::<T>())
            .map(ServiceResolver::descriptor)
    }

    /// Returns whether a singleton instance of `T` is currently cached.
    pub fn contains_singleton<T: 'static>(&self) -> bool {
        self.resolvers
            .get(&TypeToken::of::<T>())
            .is_some_and(ServiceResolver::is_cached)
    }

    /// Returns an iterator over every registered type.
    pub fn registered_tokens(&self) -> impl Iterator<Item = TypeToken> + '_ {
        self.resolvers.keys().copied()
    }

    /// Returns the number of registered types.
    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    /// Returns whether no type is registered.
    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl Locator for ServiceContainer {
    fn locate(&self, token: &TypeToken) -> Option<Result<Instance>> {
        self.resolvers
            .get(token)
            .map(|resolver| resolver.resolve(self))
    }

    fn missing_dependency(&self) -> MissingDependency {
        self.missing_dependency
    }

    fn reject_primitives(&self) -> bool {
        self.reject_primitives
    }
}

/// Options and flags which can be used to configure how a container is created.
///
/// This builder expose the ability to configure how a [`ServiceContainer`] is created.
/// The [`ServiceContainer::new`] and [`ServiceContainer::auto_register`] methods are aliases
/// for commonly used options using this builder.
///
/// Generally speaking, when using `ContainerOptions`, you'll first call [`ContainerOptions::default`],
/// then chain calls to methods to set each option, then call [`ContainerOptions::create`],
/// or call [`ContainerOptions::auto_register`]. This will give you a [`ServiceContainer`].
///
/// # Example
///
/// ```rust
/// use needle::{ContainerOptions, MissingDependency, ServiceContainer};
///
/// # fn main() {
/// let container: ServiceContainer = ContainerOptions::default()
///     .missing_dependency(MissingDependency::Skip)
///     .reject_primitives(false)
///     .create();
///
/// assert_eq!(container.missing_dependency(), MissingDependency::Skip);
/// assert!(!container.reject_primitives());
/// # }
/// ```
pub struct ContainerOptions {
    missing_dependency: MissingDependency,
    reject_primitives: bool,
}

impl Default for ContainerOptions {
    fn default() -> Self {
        Self {
            missing_dependency: Default::default(),
            reject_primitives: true,
        }
    }
}

impl ContainerOptions {
    /// Sets what happens to dependencies without a registration.
    ///
    /// Default is [`MissingDependency::Fail`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::rc::Rc;
    ///
    /// use needle::{MissingDependency, Service, ServiceContainer};
    ///
    /// #[Service]
    /// struct Cache;
    ///
    /// #[Service]
    /// struct Reader {
    ///     cache: Option<Rc<Cache>>,
    /// }
    ///
    /// # fn main() {
    /// let mut container = ServiceContainer::options()
    ///     .missing_dependency(MissingDependency::Skip)
    ///     .create();
    /// container.add_scoped::<Reader>();
    ///
    /// assert!(container.get_service::<Reader>().unwrap().cache.is_none());
    /// # }
    /// ```
    pub fn missing_dependency(mut self, missing_dependency: MissingDependency) -> Self {
        self.missing_dependency = missing_dependency;
        self
    }

    /// Sets whether a dependency on a primitive or text type fails the resolution.
    ///
    /// Default is true.
    pub fn reject_primitives(mut self, reject_primitives: bool) -> Self {
        self.reject_primitives = reject_primitives;
        self
    }

    /// Creates an empty container with the configured options.
    pub fn create(self) -> ServiceContainer {
        let ContainerOptions {
            missing_dependency,
            reject_primitives,
        } = self;

        ServiceContainer {
            missing_dependency,
            reject_primitives,
            resolvers: Default::default(),
        }
    }

    /// Creates a container with the configured options and registers every
    /// auto-registered service.
    ///
    /// See [`auto_registered_services`](crate::auto_registered_services) for more details.
    #[cfg_attr(docsrs, doc(cfg(feature = "auto-register")))]
    #[cfg(feature = "auto-register")]
    pub fn auto_register(self) -> ServiceContainer {
        let mut container = self.create();

        crate::auto_registered_services().for_each(|register| register(&mut container));

        container
    }
}
