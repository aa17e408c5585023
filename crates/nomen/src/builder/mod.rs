//! Construction of registry and resolver layers.
//!
//! A [`Builder`] is consulted by every snapshot write that has an unpinned layer to
//! rebuild. It runs under the service's write lock, so it must be quick and must not
//! block on I/O.

use std::any::Any;
use std::sync::Arc;

use crate::config::Config;
use crate::registry::{Registry, TypeRegistry};
use crate::resolver::{Chain, Resolver};
use crate::strategy::{NameCache, NamedStrategy, ReflectStrategy, RegistryStrategy, Strategy};

/// Opaque payload forwarded to builders; see [`Naming::extension_as`].
///
/// [`Naming::extension_as`]: crate::Naming::extension_as
pub type Extension = Arc<dyn Any + Send + Sync>;

/// Produces registry and resolver layers from configuration.
///
/// Returning `None` marks the builder as broken: the write that asked for the layer
/// fails and nothing is published.
pub trait Builder: Send + Sync {
	/// New registry for `cfg`, optionally seeded from `previous`.
	fn build_registry(
		&self,
		cfg: &Config,
		previous: Option<&Arc<dyn Registry>>,
		ext: Option<&Extension>,
	) -> Option<Arc<dyn Registry>>;

	/// New resolver for `cfg` bound to `registry`.
	fn build_resolver(
		&self,
		cfg: &Config,
		registry: &Arc<dyn Registry>,
		previous: Option<&Arc<dyn Resolver>>,
		ext: Option<&Extension>,
	) -> Option<Arc<dyn Resolver>>;
}

/// Stock builder: a [`TypeRegistry`] plus the named -> registry -> reflect chain.
///
/// Every resolver it builds shares one reflective name cache, so memoized names
/// survive reconfiguration for as long as the builder lives.
#[derive(Debug, Clone, Default)]
pub struct DefaultBuilder {
	cache: Arc<NameCache>,
}

impl DefaultBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn cache(&self) -> &Arc<NameCache> {
		&self.cache
	}

	/// Fresh registry carrying over every entry of `previous` it can.
	///
	/// Entries the new registry rejects are logged and skipped.
	pub fn registry(&self, cfg: &Config, previous: Option<&dyn Registry>) -> Arc<dyn Registry> {
		let registry = TypeRegistry::new(*cfg);
		if let Some(previous) = previous {
			migrate(previous, &registry);
		}
		Arc::new(registry)
	}

	/// Default chain bound to `registry`.
	pub fn resolver(&self, registry: &Arc<dyn Registry>) -> Arc<dyn Resolver> {
		let strategies: [Arc<dyn Strategy>; 3] = [
			Arc::new(NamedStrategy),
			Arc::new(RegistryStrategy::new(registry.clone())),
			Arc::new(ReflectStrategy::with_cache(self.cache.clone())),
		];
		Arc::new(Chain::new(strategies.into_iter().map(Some)))
	}
}

impl Builder for DefaultBuilder {
	fn build_registry(
		&self,
		cfg: &Config,
		previous: Option<&Arc<dyn Registry>>,
		_ext: Option<&Extension>,
	) -> Option<Arc<dyn Registry>> {
		Some(self.registry(cfg, previous.map(|r| r.as_ref())))
	}

	fn build_resolver(
		&self,
		_cfg: &Config,
		registry: &Arc<dyn Registry>,
		_previous: Option<&Arc<dyn Resolver>>,
		_ext: Option<&Extension>,
	) -> Option<Arc<dyn Resolver>> {
		Some(self.resolver(registry))
	}
}

fn migrate(from: &dyn Registry, into: &TypeRegistry) {
	let entries = from.entries();
	if entries.is_empty() {
		return;
	}

	let mut skipped = 0usize;
	for entry in &entries {
		if let Err(error) = into.register(Some(entry.ty), &entry.name) {
			skipped += 1;
			tracing::warn!(
				ty = %entry.ty,
				name = %entry.name,
				%error,
				"Skipping registry entry during migration"
			);
		}
	}
	tracing::debug!(
		migrated = entries.len() - skipped,
		skipped,
		"Migrated registry entries"
	);
}
