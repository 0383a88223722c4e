//! Needle is a small dependency injection container for Rust.
//!
//! Register types with a [`Lifetime`], then ask the [`ServiceContainer`] for them:
//! every dependency a type declares is resolved first, through the same container.
//!
//! - [`Lifetime::Singleton`] services are built once and shared until
//!   [`ServiceContainer::collect_singleton`] runs their [`Dispose`] hook.
//! - [`Lifetime::Scoped`] services are built on every resolution.
//!
//! A type declares its dependencies by implementing [`Injectable`], usually through
//! the `#[Service]` attribute macro, or with an explicit [`Descriptor`] built by [`describe`].
//!
//! # Example
//!
//! ```rust
//! use std::{cell::Cell, rc::Rc};
//!
//! use needle::{Dispose, Service, ServiceContainer};
//!
//! #[Service(dispose)]
//! struct Database {
//!     #[di(default = Cell::new(true))]
//!     open: Cell<bool>,
//! }
//!
//! impl Dispose for Database {
//!     fn dispose(&self) {
//!         self.open.set(false);
//!     }
//! }
//!
//! #[Service]
//! struct UserRepository {
//!     database: Rc<Database>,
//! }
//!
//! # fn main() -> needle::Result<()> {
//! let mut container = ServiceContainer::new();
//! container
//!     .add_singleton::<Database>()
//!     .add_scoped::<UserRepository>();
//!
//! let repository = container.get_service::<UserRepository>()?;
//! assert!(repository.database.open.get());
//!
//! container.collect_singleton::<Database>();
//! assert!(!repository.database.open.get());
//! # Ok(())
//! # }
//! ```
//!
//! # Feature flags
//!
//! - `needle-macro` (default): the `#[Service]` attribute macro.
//! - `auto-register` (default): [`ServiceContainer::auto_register`], backed by `inventory`.
//! - `tracing` (default): log registration, caching and disposal with `tracing`.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod arguments;
#[cfg_attr(docsrs, doc(cfg(feature = "auto-register")))]
#[cfg(feature = "auto-register")]
mod auto_register;
mod container;
mod descriptor;
mod error;
mod injectable;
mod resolver;
mod token;

pub use arguments::*;
#[cfg_attr(docsrs, doc(cfg(feature = "auto-register")))]
#[cfg(feature = "auto-register")]
pub use auto_register::*;
pub use container::*;
pub use descriptor::*;
pub use error::*;
pub use injectable::*;
pub use needle_core::*;
pub use token::*;

/// Marks a struct as a service the container can build.
///
/// The macro implements [`Injectable`] for the struct, reading the
/// dependencies from its fields, in declaration order:
///
/// - `Rc<T>`: a required dependency on `T`.
/// - `Option<Rc<T>>`: an optional dependency on `T`, `None` when it is skipped,
///   see [`MissingDependency::Skip`].
/// - `#[di(default)]` or `#[di(default = expr)]`: not a dependency, the field is
///   initialized with `Default::default()` or `expr`.
///
/// Arguments:
///
/// - `singleton` or `scoped`: registers the struct with that lifetime into
///   [`ServiceContainer::auto_register`], when the `auto-register` feature is enabled.
/// - `auto_register = false`: keeps the lifetime but skips the auto-registration.
/// - `dispose`: the struct implements [`Dispose`], run it when the singleton is collected.
///
/// Use `#[di(needle_path = path::to::needle)]` on the struct when `needle` is re-exported
/// under another path.
///
/// Generic structs are supported, but cannot be auto-registered, each
/// instantiation has to be registered by hand:
///
/// ```rust,compile_fail
/// use std::rc::Rc;
///
/// use needle::Service;
///
/// #[Service(singleton)]
/// struct Wrapper<T: 'static> {
///     inner: Rc<T>,
/// }
/// ```
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
///
/// use needle::{Injectable, Service, TypeToken};
///
/// #[Service]
/// struct Config;
///
/// #[Service]
/// struct Cache;
///
/// #[Service(scoped)]
/// struct Server {
///     config: Rc<Config>,
///     cache: Option<Rc<Cache>>,
///     #[di(default = 8080)]
///     port: u16,
/// }
///
/// # fn main() {
/// assert_eq!(
///     Server::dependencies(),
///     vec![TypeToken::of::<Config>(), TypeToken::of::<Cache>()]
/// );
/// # }
/// ```
#[cfg_attr(docsrs, doc(cfg(feature = "needle-macro")))]
#[cfg(feature = "needle-macro")]
pub use needle_macro::Service;
