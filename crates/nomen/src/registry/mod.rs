//! Explicit type-to-name bindings.
//!
//! # Invariants
//!
//! * At most one name per normalized type; re-registering the same pair is a no-op.
//! * The entry counter always equals the number of stored bindings.
//! * [`Registry::lookup`] never reports normalization failures; an unnormalizable
//!   type is simply not found.

use nomen_descriptor::TypeDesc;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::config::Config;
use crate::error::RegistryError;
use crate::normalize::normalize;

/// Reflection-free lookup for known types.
///
/// Implementations must be safe under unbounded concurrent use.
pub trait Registry: Send + Sync {
	/// Binds the nearest named type of `ty` to `name`.
	fn register(&self, ty: Option<TypeDesc>, name: &str) -> Result<(), RegistryError>;

	/// Name bound to the nearest named type of `ty`.
	fn lookup(&self, ty: Option<TypeDesc>) -> Option<String>;

	/// Point-in-time copy of all bindings, in unspecified order.
	fn entries(&self) -> Vec<Entry>;

	fn count(&self) -> usize;

	/// Removes every binding.
	fn reset(&self);
}

/// A single (normalized type, name) binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
	pub ty: TypeDesc,
	pub name: String,
}

/// Default [`Registry`] backed by a read-mostly hash map.
pub struct TypeRegistry {
	/// Normalization knobs; `include_builtins` is irrelevant here.
	config: Config,
	inner: RwLock<Bindings>,
}

#[derive(Default)]
struct Bindings {
	names: FxHashMap<TypeDesc, String>,
	count: usize,
}

impl Bindings {
	/// Outcome of binding `ty` to `name` against the current contents.
	fn check(&self, ty: TypeDesc, name: &str) -> Option<Result<(), RegistryError>> {
		let existing = self.names.get(&ty)?;
		if existing == name {
			return Some(Ok(()));
		}
		Some(Err(RegistryError::Conflict {
			ty,
			existing: existing.clone(),
			incoming: name.to_owned(),
		}))
	}
}

impl TypeRegistry {
	pub fn new(config: Config) -> Self {
		Self {
			config,
			inner: RwLock::new(Bindings::default()),
		}
	}

	pub fn config(&self) -> &Config {
		&self.config
	}
}

impl Default for TypeRegistry {
	fn default() -> Self {
		Self::new(Config::default())
	}
}

impl Registry for TypeRegistry {
	fn register(&self, ty: Option<TypeDesc>, name: &str) -> Result<(), RegistryError> {
		let ty = ty.ok_or(RegistryError::NilType)?;
		if name.is_empty() {
			return Err(RegistryError::EmptyName(ty));
		}
		let base = normalize(Some(ty), &self.config)?;

		// Fast path: idempotent or conflicting re-registration needs no write lock.
		if let Some(outcome) = self.inner.read().check(base, name) {
			return outcome;
		}

		let mut inner = self.inner.write();
		// Another writer may have won between the two locks.
		if let Some(outcome) = inner.check(base, name) {
			return outcome;
		}
		inner.names.insert(base, name.to_owned());
		inner.count += 1;
		Ok(())
	}

	fn lookup(&self, ty: Option<TypeDesc>) -> Option<String> {
		let base = normalize(ty, &self.config).ok()?;
		self.inner.read().names.get(&base).cloned()
	}

	fn entries(&self) -> Vec<Entry> {
		let inner = self.inner.read();
		inner
			.names
			.iter()
			.map(|(ty, name)| Entry {
				ty: *ty,
				name: name.clone(),
			})
			.collect()
	}

	fn count(&self) -> usize {
		self.inner.read().count
	}

	fn reset(&self) {
		let mut inner = self.inner.write();
		inner.names.clear();
		inner.count = 0;
	}
}

impl std::fmt::Debug for TypeRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TypeRegistry")
			.field("config", &self.config)
			.field("count", &self.count())
			.finish()
	}
}
