//! Stable entity names for runtime values and types.
//!
//! A [`Naming`] service turns any [`Subject`] or [`TypeDesc`] into a human-readable
//! name such as `billing.invoice`, suitable for logs, metrics, and audit trails.
//! Resolution walks a chain of strategies:
//!
//! 1. values that name themselves ([`Named`]),
//! 2. explicit registrations ([`Registry`]),
//! 3. a reflective `module.Type` fallback over the nearest named type
//!    ([`normalize`]).
//!
//! ```ignore
//! use nomen::{Describe, Naming};
//!
//! #[derive(Describe)]
//! #[entity(crate = "nomen::descriptor")]
//! struct Invoice;
//!
//! let naming = Naming::new();
//! naming.register::<Invoice>("billing.invoice")?;
//! assert_eq!(naming.resolve_type_of::<Vec<Invoice>>(), "billing.invoice");
//! ```
//!
//! The service's state is an immutable [`Snapshot`] published atomically: reads are
//! lock-free, writes are serialized and either publish a complete snapshot or
//! nothing at all.

pub mod builder;
pub mod config;
pub mod error;
pub mod naming;
pub mod normalize;
pub mod registry;
pub mod resolver;
pub mod strategy;

pub use builder::{Builder, DefaultBuilder, Extension};
pub use config::Config;
pub use error::{NamingError, NormalizeError, RegistryError};
pub use naming::{HardReset, Naming, Snapshot};
pub use nomen_descriptor::{
	Describe, Describer, Identifier, Kind, Named, NamedFn, Subject, TypeDesc, TypeInfo, TypeNamer,
};
/// Descriptor crate, for `#[entity(crate = "nomen::descriptor")]`.
pub use nomen_descriptor as descriptor;
pub use normalize::normalize;
pub use registry::{Entry, Registry, TypeRegistry};
pub use resolver::{Chain, Resolver};
pub use strategy::{NameCache, NamedStrategy, ReflectStrategy, RegistryStrategy, Strategy};
