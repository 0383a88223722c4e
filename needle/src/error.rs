use crate::TypeToken;

/// Errors raised while resolving services.
///
/// Every error is surfaced to the caller of the outermost
/// [`ServiceContainer::get_service`](crate::ServiceContainer::get_service) call,
/// nothing is retried and no partially constructed instance is cached.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested type has no registration.
    #[error("no service registered for: {token}")]
    ServiceNotRegistered {
        /// The requested type.
        token: TypeToken,
    },

    /// A dependency list names a primitive or text type.
    #[error("`{service}` depends on `{dependency}`, which is a primitive type and cannot be injected")]
    UnsafeInjectionTarget {
        /// The type whose dependency list contains the primitive.
        service: TypeToken,
        /// The primitive dependency.
        dependency: TypeToken,
    },

    /// A dependency of `service` has no registration.
    #[error("`{service}` depends on `{dependency}`, but no service is registered for it")]
    UnresolvedDependency {
        /// The type being constructed.
        service: TypeToken,
        /// The missing dependency.
        dependency: TypeToken,
    },

    /// A constructor read an argument with a different type than the one declared.
    #[error("argument #{position} of `{service}` is `{found}`, but `{expected}` was requested")]
    TypeMismatch {
        /// The type being constructed.
        service: TypeToken,
        /// Zero based position of the argument.
        position: usize,
        /// The requested type name.
        expected: &'static str,
        /// The declared dependency at that position.
        found: TypeToken,
    },

    /// A constructor read more arguments than it declared dependencies.
    #[error("argument #{position} of `{service}` was requested, but only {position} dependencies are declared")]
    MissingArgument {
        /// The type being constructed.
        service: TypeToken,
        /// Zero based position of the argument.
        position: usize,
    },
}

/// A specialized [`Result`](std::result::Result) type for service resolution.
pub type Result<T, E = Error> = std::result::Result<T, E>;
