use std::any::TypeId;
use std::sync::Arc;

use dashmap::DashMap;
use nomen_descriptor::{Subject, TypeDesc};
use rustc_hash::FxBuildHasher;

use super::Strategy;
use crate::config::Config;
use crate::normalize::normalize;

/// Universal fallback computing `package.Type` from the descriptor.
///
/// Unwraps containers through the normalizer, strips generic arguments, and hides
/// builtin or package-less names when `include_builtins` is off. Always handles any
/// input that has a descriptor, answering `""` when no name can be derived.
#[derive(Debug, Clone, Default)]
pub struct ReflectStrategy {
	cache: Arc<NameCache>,
}

impl ReflectStrategy {
	pub fn new() -> Self {
		Self::default()
	}

	/// Strategy sharing an existing memo table, so names survive rebuilds.
	pub fn with_cache(cache: Arc<NameCache>) -> Self {
		Self { cache }
	}

	pub fn cache(&self) -> &Arc<NameCache> {
		&self.cache
	}
}

impl Strategy for ReflectStrategy {
	fn try_resolve(&self, value: &dyn Subject, cfg: &Config) -> Option<String> {
		self.try_resolve_type(value.type_desc(), cfg)
	}

	fn try_resolve_type(&self, ty: Option<TypeDesc>, cfg: &Config) -> Option<String> {
		Some(self.cache.name_of(ty?, cfg))
	}
}

/// Memoized reflective names.
///
/// Keys include every knob that affects the result. Entries are never evicted: the
/// inputs behind a key are immutable, so a cached name can never go stale.
#[derive(Debug, Default)]
pub struct NameCache {
	names: DashMap<CacheKey, Arc<str>, FxBuildHasher>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
	ty: TypeId,
	include_builtins: bool,
	max_unwrap: usize,
	map_prefer_elem: bool,
}

impl NameCache {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.names.len()
	}

	pub fn is_empty(&self) -> bool {
		self.names.is_empty()
	}

	fn name_of(&self, ty: TypeDesc, cfg: &Config) -> String {
		let key = CacheKey {
			ty: ty.type_id(),
			include_builtins: cfg.include_builtins,
			max_unwrap: cfg.effective_max_unwrap(),
			map_prefer_elem: cfg.map_prefer_elem,
		};
		if let Some(name) = self.names.get(&key) {
			return name.value().to_string();
		}
		let name: Arc<str> = Arc::from(reflect_name(ty, cfg));
		self.names.entry(key).or_insert(name).value().to_string()
	}
}

fn reflect_name(ty: TypeDesc, cfg: &Config) -> String {
	let Ok(base) = normalize(Some(ty), cfg) else {
		return String::new();
	};
	let name = strip_type_params(base.name());
	let package = base.package();
	if !package.is_empty() {
		let short = package.rsplit_once("::").map_or(package, |(_, last)| last);
		format!("{short}.{name}")
	} else if cfg.include_builtins {
		name.to_owned()
	} else {
		String::new()
	}
}

/// `Page<i32, String>` -> `Page`.
fn strip_type_params(name: &str) -> &str {
	name.find('<').map_or(name, |idx| &name[..idx])
}
