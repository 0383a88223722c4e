use std::{any, rc::Rc, vec::IntoIter};

use crate::{Error, Instance, Result, TypeToken};

/// The resolved dependencies of one service, in declaration order.
///
/// A constructor reads them front to back, one call per declared dependency.
/// Dependencies skipped by [`MissingDependency::Skip`](crate::MissingDependency::Skip)
/// keep their position and read as absent.
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
///
/// use needle::{describe, ServiceContainer};
///
/// struct Config;
///
/// struct Server {
///     config: Rc<Config>,
/// }
///
/// # fn main() -> needle::Result<()> {
/// let mut container = ServiceContainer::new();
/// container
///     .add_singleton_with(describe::<Config>().factory(|_| Ok(Config)))
///     .add_scoped_with(
///         describe::<Server>()
///             .depends_on::<Config>()
///             .factory(|args| Ok(Server { config: args.next()? })),
///     );
///
/// let server = container.get_service::<Server>()?;
/// assert!(Rc::ptr_eq(&server.config, &container.get_service::<Config>()?));
/// # Ok(())
/// # }
/// ```
pub struct Arguments {
    service: TypeToken,
    position: usize,
    values: IntoIter<(TypeToken, Option<Instance>)>,
}

impl Arguments {
    pub(crate) fn new(service: TypeToken, values: Vec<(TypeToken, Option<Instance>)>) -> Self {
        Self {
            service,
            position: 0,
            values: values.into_iter(),
        }
    }

    /// Returns the type being constructed.
    pub fn service(&self) -> TypeToken {
        self.service
    }

    /// Returns the position of the next argument.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns how many arguments are left.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }

    /// Returns the next argument, which must be present.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingArgument`] if every declared dependency was already read.
    /// - [`Error::UnresolvedDependency`] if the dependency was skipped.
    /// - [`Error::TypeMismatch`] if the dependency is not a `T`.
    pub fn next<T: 'static>(&mut self) -> Result<Rc<T>> {
        let (dependency, instance) = self.advance::<T>()?;

        instance.ok_or(Error::UnresolvedDependency {
            service: self.service,
            dependency,
        })
    }

    /// Returns the next argument, or `None` if it was skipped.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingArgument`] if every declared dependency was already read.
    /// - [`Error::TypeMismatch`] if the dependency is not a `T`.
    pub fn next_optional<T: 'static>(&mut self) -> Result<Option<Rc<T>>> {
        self.advance::<T>().map(|(_, instance)| instance)
    }

    fn advance<T: 'static>(&mut self) -> Result<(TypeToken, Option<Rc<T>>)> {
        let position = self.position;

        let Some((dependency, instance)) = self.values.next() else {
            return Err(Error::MissingArgument {
                service: self.service,
                position,
            });
        };

        self.position += 1;

        let instance = match instance {
            Some(instance) => Some(instance.downcast::<T>().map_err(|_| Error::TypeMismatch {
                service: self.service,
                position,
                expected: any::type_name::<T>(),
                found: dependency,
            })?),
            None => None,
        };

        Ok((dependency, instance))
    }
}
