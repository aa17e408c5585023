//! Pluggable resolution steps.
//!
//! A [`Resolver`](crate::resolver::Resolver) chains strategies in order; the default
//! chain is [`NamedStrategy`] -> [`RegistryStrategy`] -> [`ReflectStrategy`].

use nomen_descriptor::{Subject, TypeDesc};

use crate::config::Config;

mod named;
mod reflect;
mod registry;

pub use named::NamedStrategy;
pub use reflect::{NameCache, ReflectStrategy};
pub use registry::RegistryStrategy;

/// One resolution technique.
///
/// `Some(name)` means the strategy handled the input and the chain stops there, even
/// when `name` is empty. `None` falls through to the next strategy. Implementations
/// must not panic or block.
pub trait Strategy: Send + Sync {
	fn try_resolve(&self, value: &dyn Subject, cfg: &Config) -> Option<String>;

	fn try_resolve_type(&self, ty: Option<TypeDesc>, cfg: &Config) -> Option<String>;
}
