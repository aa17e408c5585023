//! Atomically published naming state.
//!
//! # Role
//!
//! [`Naming`] owns the current [`Snapshot`] of configuration, extension payload,
//! registry, resolver, builder, and pin flags. Readers load it without locking;
//! writers serialize on a single mutex, derive a new snapshot from the current one,
//! and swap it in.
//!
//! # Invariants
//!
//! - The published snapshot always has a registry and a resolver.
//! - An unpinned resolver was built against the registry and config of the
//!   snapshot that carries it.
//! - A failed write publishes nothing; the previous snapshot stays current.
//! - Pins survive every write except [`Naming::hard_reset`], which recomputes them.

use std::any::Any;
use std::sync::Arc;

use arc_swap::ArcSwap;
use nomen_descriptor::{Describe, Subject, TypeDesc};
use parking_lot::Mutex;

use crate::builder::{Builder, DefaultBuilder, Extension};
use crate::config::Config;
use crate::error::{NamingError, RegistryError};
use crate::registry::Registry;
use crate::resolver::Resolver;

/// Immutable view of the naming state at one point in time.
#[derive(Clone)]
pub struct Snapshot {
	config: Config,
	extension: Option<Extension>,
	registry: Arc<dyn Registry>,
	resolver: Arc<dyn Resolver>,
	builder: Arc<dyn Builder>,
	registry_pinned: bool,
	resolver_pinned: bool,
}

impl Snapshot {
	pub fn config(&self) -> &Config {
		&self.config
	}

	pub fn extension(&self) -> Option<&Extension> {
		self.extension.as_ref()
	}

	pub fn registry(&self) -> &Arc<dyn Registry> {
		&self.registry
	}

	pub fn resolver(&self) -> &Arc<dyn Resolver> {
		&self.resolver
	}

	pub fn builder(&self) -> &Arc<dyn Builder> {
		&self.builder
	}

	pub fn is_registry_pinned(&self) -> bool {
		self.registry_pinned
	}

	pub fn is_resolver_pinned(&self) -> bool {
		self.resolver_pinned
	}

	/// Rebuilds every unpinned layer with `builder`, feeding it the current layers
	/// as the previous ones.
	fn rebuild(
		&self,
		config: Config,
		extension: Option<Extension>,
		builder: Arc<dyn Builder>,
	) -> Result<Self, NamingError> {
		let registry = if self.registry_pinned {
			self.registry.clone()
		} else {
			builder
				.build_registry(&config, Some(&self.registry), extension.as_ref())
				.ok_or(NamingError::NilRegistry)?
		};
		let resolver = if self.resolver_pinned {
			self.resolver.clone()
		} else {
			builder
				.build_resolver(&config, &registry, Some(&self.resolver), extension.as_ref())
				.ok_or(NamingError::NilResolver)?
		};
		Ok(Self {
			config,
			extension,
			registry,
			resolver,
			builder,
			registry_pinned: self.registry_pinned,
			resolver_pinned: self.resolver_pinned,
		})
	}
}

impl std::fmt::Debug for Snapshot {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Snapshot")
			.field("config", &self.config)
			.field("has_extension", &self.extension.is_some())
			.field("entries", &self.registry.count())
			.field("registry_pinned", &self.registry_pinned)
			.field("resolver_pinned", &self.resolver_pinned)
			.finish_non_exhaustive()
	}
}

/// Arguments of [`Naming::hard_reset`].
///
/// Omitted config and builder keep their current values. Omitted registry and
/// resolver are rebuilt; supplied ones are pinned. The extension is always
/// replaced, so omitting it clears the current payload.
#[derive(Clone, Default)]
pub struct HardReset {
	config: Option<Config>,
	extension: Option<Extension>,
	registry: Option<Arc<dyn Registry>>,
	resolver: Option<Arc<dyn Resolver>>,
	builder: Option<Arc<dyn Builder>>,
}

impl HardReset {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn config(mut self, config: Config) -> Self {
		self.config = Some(config);
		self
	}

	pub fn extension<T: Any + Send + Sync>(mut self, value: T) -> Self {
		self.extension = Some(Arc::new(value));
		self
	}

	pub fn registry(mut self, registry: Arc<dyn Registry>) -> Self {
		self.registry = Some(registry);
		self
	}

	pub fn resolver(mut self, resolver: Arc<dyn Resolver>) -> Self {
		self.resolver = Some(resolver);
		self
	}

	pub fn builder(mut self, builder: Arc<dyn Builder>) -> Self {
		self.builder = Some(builder);
		self
	}
}

impl std::fmt::Debug for HardReset {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("HardReset")
			.field("config", &self.config)
			.field("extension", &self.extension.is_some())
			.field("registry", &self.registry.is_some())
			.field("resolver", &self.resolver.is_some())
			.field("builder", &self.builder.is_some())
			.finish()
	}
}

/// Naming service.
///
/// Cheap to share behind an [`Arc`]; every method takes `&self`.
pub struct Naming {
	state: ArcSwap<Snapshot>,
	/// Serializes writers. Readers never touch it.
	write: Mutex<()>,
}

impl Naming {
	/// Service with the default configuration and [`DefaultBuilder`].
	pub fn new() -> Self {
		Self::with_config(Config::default())
	}

	pub fn with_config(config: Config) -> Self {
		let builder = DefaultBuilder::new();
		let registry = builder.registry(&config, None);
		let resolver = builder.resolver(&registry);
		Self::from_snapshot(Snapshot {
			config,
			extension: None,
			registry,
			resolver,
			builder: Arc::new(builder),
			registry_pinned: false,
			resolver_pinned: false,
		})
	}

	/// Service whose initial layers come from `builder`.
	pub fn with_builder(config: Config, builder: Arc<dyn Builder>) -> Result<Self, NamingError> {
		let registry = builder
			.build_registry(&config, None, None)
			.ok_or(NamingError::NilRegistry);
		let layers = registry.and_then(|registry| {
			let resolver = builder
				.build_resolver(&config, &registry, None, None)
				.ok_or(NamingError::NilResolver)?;
			Ok((registry, resolver))
		});
		let (registry, resolver) = layers.inspect_err(|error| {
			tracing::error!(op = "init", %error, "Builder produced no layer");
		})?;
		Ok(Self::from_snapshot(Snapshot {
			config,
			extension: None,
			registry,
			resolver,
			builder,
			registry_pinned: false,
			resolver_pinned: false,
		}))
	}

	fn from_snapshot(snapshot: Snapshot) -> Self {
		Self {
			state: ArcSwap::from_pointee(snapshot),
			write: Mutex::new(()),
		}
	}

	/// Current snapshot. Holding it keeps every layer it references alive.
	pub fn snapshot(&self) -> Arc<Snapshot> {
		self.state.load_full()
	}

	pub fn config(&self) -> Config {
		self.state.load().config
	}

	pub fn registry(&self) -> Arc<dyn Registry> {
		self.state.load().registry.clone()
	}

	pub fn resolver(&self) -> Arc<dyn Resolver> {
		self.state.load().resolver.clone()
	}

	pub fn builder(&self) -> Arc<dyn Builder> {
		self.state.load().builder.clone()
	}

	pub fn is_registry_pinned(&self) -> bool {
		self.state.load().registry_pinned
	}

	pub fn is_resolver_pinned(&self) -> bool {
		self.state.load().resolver_pinned
	}

	/// Extension payload, if one is set and is a `T`.
	pub fn extension_as<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
		let ext = self.state.load().extension.clone()?;
		ext.downcast::<T>().ok()
	}

	/// Entity name of `value`, or `""` when nothing can name it.
	pub fn resolve(&self, value: &dyn Subject) -> String {
		let snap = self.state.load();
		snap.resolver.resolve(value, &snap.config)
	}

	/// Entity name of a type without an instance.
	pub fn resolve_type(&self, ty: Option<TypeDesc>) -> String {
		let snap = self.state.load();
		snap.resolver.resolve_type(ty, &snap.config)
	}

	pub fn resolve_type_of<T: Describe + ?Sized>(&self) -> String {
		self.resolve_type(Some(TypeDesc::of::<T>()))
	}

	/// Registers `name` in the current registry.
	///
	/// No snapshot is published, but the write lock is held so the registration
	/// is ordered against rebuilds: it either lands before a migration copies the
	/// registry or in the registry that replaced it.
	pub fn register_type(&self, ty: Option<TypeDesc>, name: &str) -> Result<(), RegistryError> {
		let _guard = self.write.lock();
		self.state.load().registry.register(ty, name)
	}

	pub fn register<T: Describe + ?Sized>(&self, name: &str) -> Result<(), RegistryError> {
		self.register_type(Some(TypeDesc::of::<T>()), name)
	}

	/// Replaces the configuration, rebuilding unpinned layers.
	pub fn reconfigure(&self, config: Config) -> Result<(), NamingError> {
		self.try_publish("reconfigure", |cur| {
			cur.rebuild(config, cur.extension.clone(), cur.builder.clone())
		})
	}

	/// Replaces the extension payload, rebuilding unpinned layers with it.
	pub fn replace_extension<T: Any + Send + Sync>(&self, value: T) -> Result<(), NamingError> {
		let ext: Extension = Arc::new(value);
		self.try_publish("replace_extension", |cur| {
			cur.rebuild(cur.config, Some(ext), cur.builder.clone())
		})
	}

	/// Installs `builder` and rebuilds unpinned layers with it.
	pub fn replace_builder(&self, builder: Arc<dyn Builder>) -> Result<(), NamingError> {
		self.try_publish("replace_builder", |cur| {
			cur.rebuild(cur.config, cur.extension.clone(), builder)
		})
	}

	/// Installs and pins `registry`. An unpinned resolver is rebuilt against it.
	pub fn inject_registry(&self, registry: Arc<dyn Registry>) -> Result<(), NamingError> {
		self.try_publish("inject_registry", |cur| {
			let resolver = if cur.resolver_pinned {
				cur.resolver.clone()
			} else {
				cur.builder
					.build_resolver(&cur.config, &registry, Some(&cur.resolver), cur.extension.as_ref())
					.ok_or(NamingError::NilResolver)?
			};
			Ok(Snapshot {
				registry,
				resolver,
				registry_pinned: true,
				..cur.clone()
			})
		})
	}

	/// Installs and pins `resolver`, leaving the registry alone.
	pub fn inject_resolver(&self, resolver: Arc<dyn Resolver>) {
		self.publish("inject_resolver", |cur| Snapshot {
			resolver,
			resolver_pinned: true,
			..cur.clone()
		});
	}

	/// Keeps the current registry across future rebuilds.
	pub fn pin_registry(&self) {
		self.publish("pin_registry", |cur| Snapshot {
			registry_pinned: true,
			..cur.clone()
		});
	}

	pub fn pin_resolver(&self) {
		self.publish("pin_resolver", |cur| Snapshot {
			resolver_pinned: true,
			..cur.clone()
		});
	}

	/// Lets the next rebuild replace the registry. Nothing is rebuilt now.
	pub fn unpin_registry(&self) {
		self.publish("unpin_registry", |cur| Snapshot {
			registry_pinned: false,
			..cur.clone()
		});
	}

	/// Lets the next rebuild replace the resolver. Nothing is rebuilt now.
	pub fn unpin_resolver(&self) {
		self.publish("unpin_resolver", |cur| Snapshot {
			resolver_pinned: false,
			..cur.clone()
		});
	}

	/// Replaces the whole state in one step; see [`HardReset`].
	pub fn hard_reset(&self, reset: HardReset) -> Result<(), NamingError> {
		self.try_publish("hard_reset", |cur| {
			let HardReset {
				config,
				extension,
				registry,
				resolver,
				builder,
			} = reset;
			let config = config.unwrap_or(cur.config);
			let builder = builder.unwrap_or_else(|| cur.builder.clone());
			let registry_pinned = registry.is_some();
			let resolver_pinned = resolver.is_some();

			let registry = match registry {
				Some(registry) => registry,
				None => builder
					.build_registry(&config, Some(&cur.registry), extension.as_ref())
					.ok_or(NamingError::NilRegistry)?,
			};
			let resolver = match resolver {
				Some(resolver) => resolver,
				None => builder
					.build_resolver(&config, &registry, Some(&cur.resolver), extension.as_ref())
					.ok_or(NamingError::NilResolver)?,
			};
			Ok(Snapshot {
				config,
				extension,
				registry,
				resolver,
				builder,
				registry_pinned,
				resolver_pinned,
			})
		})
	}

	fn publish(&self, op: &'static str, derive: impl FnOnce(&Snapshot) -> Snapshot) {
		let _guard = self.write.lock();
		let next = derive(&self.state.load());
		self.store(op, next);
	}

	fn try_publish(
		&self,
		op: &'static str,
		derive: impl FnOnce(&Snapshot) -> Result<Snapshot, NamingError>,
	) -> Result<(), NamingError> {
		let _guard = self.write.lock();
		let next = derive(&self.state.load()).inspect_err(|error| {
			tracing::error!(op, %error, "Builder produced no layer; snapshot not published");
		})?;
		self.store(op, next);
		Ok(())
	}

	fn store(&self, op: &'static str, next: Snapshot) {
		tracing::debug!(
			op,
			registry_pinned = next.registry_pinned,
			resolver_pinned = next.resolver_pinned,
			entries = next.registry.count(),
			"Published naming snapshot"
		);
		self.state.store(Arc::new(next));
	}
}

impl Default for Naming {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for Naming {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("Naming").field(&*self.state.load()).finish()
	}
}
