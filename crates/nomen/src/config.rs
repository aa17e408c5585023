use serde::{Deserialize, Serialize};

/// Default for [`Config::include_builtins`].
pub const DEFAULT_INCLUDE_BUILTINS: bool = true;
/// Default for [`Config::max_unwrap`]; enough for any practical nesting.
pub const DEFAULT_MAX_UNWRAP: usize = 8;
/// Default for [`Config::map_prefer_elem`].
pub const DEFAULT_MAP_PREFER_ELEM: bool = true;

/// Read-only resolution knobs.
///
/// Passed by value and never mutated once handed to a registry, resolver, or
/// builder. Missing fields deserialize to their defaults, so the struct can be
/// embedded in a host application's own configuration file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
	/// Whether builtin and package-less names (`i32`, `String`) are returned.
	/// When false such types resolve to `""`.
	pub include_builtins: bool,
	/// Container unwrapping budget. `0` means [`DEFAULT_MAX_UNWRAP`].
	pub max_unwrap: usize,
	/// Which side of `Map<K, V>` is searched first for a named type:
	/// `V` when true, `K` otherwise.
	pub map_prefer_elem: bool,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			include_builtins: DEFAULT_INCLUDE_BUILTINS,
			max_unwrap: DEFAULT_MAX_UNWRAP,
			map_prefer_elem: DEFAULT_MAP_PREFER_ELEM,
		}
	}
}

impl Config {
	pub fn with_include_builtins(mut self, include: bool) -> Self {
		self.include_builtins = include;
		self
	}

	/// Sets the unwrapping budget; `0` restores the default.
	pub fn with_max_unwrap(mut self, max: usize) -> Self {
		self.max_unwrap = max;
		self
	}

	pub fn with_map_prefer_elem(mut self, prefer: bool) -> Self {
		self.map_prefer_elem = prefer;
		self
	}

	/// Unwrapping budget actually applied by the normalizer.
	pub fn effective_max_unwrap(&self) -> usize {
		if self.max_unwrap == 0 {
			DEFAULT_MAX_UNWRAP
		} else {
			self.max_unwrap
		}
	}
}
