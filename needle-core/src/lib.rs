/// Represents the lifetime of a registered service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Lifetime {
    /// scoped lifetime.
    ///
    /// 1. the constructor runs on every resolution.
    /// 2. the container never keeps the instance, so disposing it is a no-op.
    Scoped,
    /// singleton lifetime.
    ///
    /// 1. the constructor runs at most once per container, until the instance is collected.
    /// 2. every resolution returns the same shared instance.
    /// 3. collecting the instance runs its disposal hook, if it has one.
    Singleton,
}

/// Represents what the container does with a dependency that has no registration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MissingDependency {
    /// fail the whole resolution with an unresolved dependency error.
    #[default]
    Fail,
    /// leave the argument absent and let the constructor decide.
    ///
    /// Optional arguments receive `None`, required arguments still fail.
    Skip,
}
