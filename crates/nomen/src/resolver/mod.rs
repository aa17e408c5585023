//! Strategy chains.

use std::sync::Arc;

use nomen_descriptor::{Subject, TypeDesc};

use crate::config::Config;
use crate::strategy::Strategy;

/// Final arbiter of entity names.
///
/// Never fails: an input no strategy can name resolves to `""`.
pub trait Resolver: Send + Sync {
	fn resolve(&self, value: &dyn Subject, cfg: &Config) -> String;

	fn resolve_type(&self, ty: Option<TypeDesc>, cfg: &Config) -> String;
}

/// Ordered, immutable list of strategies; the first to handle an input wins.
#[derive(Clone, Default)]
pub struct Chain {
	strategies: Arc<[Arc<dyn Strategy>]>,
}

impl Chain {
	/// Builds a chain, dropping absent strategies.
	pub fn new<I>(strategies: I) -> Self
	where
		I: IntoIterator<Item = Option<Arc<dyn Strategy>>>,
	{
		Self {
			strategies: strategies.into_iter().flatten().collect(),
		}
	}

	pub fn len(&self) -> usize {
		self.strategies.len()
	}

	pub fn is_empty(&self) -> bool {
		self.strategies.is_empty()
	}
}

impl Resolver for Chain {
	fn resolve(&self, value: &dyn Subject, cfg: &Config) -> String {
		self.strategies
			.iter()
			.find_map(|s| s.try_resolve(value, cfg))
			.unwrap_or_default()
	}

	fn resolve_type(&self, ty: Option<TypeDesc>, cfg: &Config) -> String {
		self.strategies
			.iter()
			.find_map(|s| s.try_resolve_type(ty, cfg))
			.unwrap_or_default()
	}
}

impl std::fmt::Debug for Chain {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Chain").field("len", &self.len()).finish()
	}
}
