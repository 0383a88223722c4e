use std::cell::RefCell;

use crate::{
    Arguments, Descriptor, Error, Instance, Lifetime, MissingDependency, Result, TypeToken,
};

/// Read-only lookup handle a resolver uses to reach the container that owns it.
pub(crate) trait Locator {
    /// Resolves `token`, or returns `None` if it has no registration.
    fn locate(&self, token: &TypeToken) -> Option<Result<Instance>>;

    fn missing_dependency(&self) -> MissingDependency;

    fn reject_primitives(&self) -> bool;
}

/// Builds the instances of one registration and owns its cached singleton.
///
/// A resolver is either empty or caching an instance, only a singleton
/// resolver ever caches.
pub(crate) struct ServiceResolver {
    descriptor: Descriptor,
    lifetime: Lifetime,
    cached: RefCell<Option<Instance>>,
}

impl ServiceResolver {
    pub(crate) fn new(descriptor: Descriptor, lifetime: Lifetime) -> Self {
        Self {
            descriptor,
            lifetime,
            cached: RefCell::new(None),
        }
    }

    pub(crate) fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    pub(crate) fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    pub(crate) fn is_cached(&self) -> bool {
        self.cached.borrow().is_some()
    }

    pub(crate) fn resolve(&self, locator: &dyn Locator) -> Result<Instance> {
        if let Some(instance) = self.cached.borrow().as_ref() {
            return Ok(instance.clone());
        }

        let service = self.descriptor.token();
        let dependencies = self.descriptor.dependencies();

        let mut values = Vec::with_capacity(dependencies.len());

        for &dependency in dependencies {
            values.push((dependency, resolve_dependency(locator, service, dependency)?));
        }

        #[cfg(feature = "tracing")]
        tracing::trace!("(~) construct: {} as {:?}", service, self.lifetime);

        let instance = self
            .descriptor
            .construct(&mut Arguments::new(service, values))?;

        if let Lifetime::Singleton = self.lifetime {
            #[cfg(feature = "tracing")]
            tracing::debug!("(*) cache singleton: {}", service);

            *self.cached.borrow_mut() = Some(instance.clone());
        }

        Ok(instance)
    }

    pub(crate) fn dispose(&self) {
        let Some(instance) = self.cached.borrow_mut().take() else {
            return;
        };

        #[cfg(feature = "tracing")]
        tracing::debug!("(x) collect singleton: {}", self.descriptor.token());

        self.descriptor.dispose(&instance);
    }
}

fn resolve_dependency(
    locator: &dyn Locator,
    service: TypeToken,
    dependency: TypeToken,
) -> Result<Option<Instance>> {
    if locator.reject_primitives() && dependency.is_primitive() {
        return Err(Error::UnsafeInjectionTarget {
            service,
            dependency,
        });
    }

    match locator.locate(&dependency) {
        Some(instance) => instance.map(Some),
        None => match locator.missing_dependency() {
            MissingDependency::Fail => Err(Error::UnresolvedDependency {
                service,
                dependency,
            }),
            MissingDependency::Skip => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    "(-) skip unregistered dependency `{}` of `{}`",
                    dependency,
                    service
                );

                Ok(None)
            }
        },
    }
}
