use std::sync::Arc;

use nomen_descriptor::{Subject, TypeDesc};

use super::Strategy;
use crate::config::Config;
use crate::registry::Registry;

/// Consults explicit registrations.
#[derive(Clone)]
pub struct RegistryStrategy {
	registry: Option<Arc<dyn Registry>>,
}

impl RegistryStrategy {
	pub fn new(registry: Arc<dyn Registry>) -> Self {
		Self {
			registry: Some(registry),
		}
	}

	/// Strategy with no registry attached; declines everything.
	pub fn detached() -> Self {
		Self { registry: None }
	}
}

impl Strategy for RegistryStrategy {
	fn try_resolve(&self, value: &dyn Subject, cfg: &Config) -> Option<String> {
		self.try_resolve_type(value.type_desc(), cfg)
	}

	fn try_resolve_type(&self, ty: Option<TypeDesc>, _cfg: &Config) -> Option<String> {
		self.registry.as_ref()?.lookup(Some(ty?))
	}
}

impl std::fmt::Debug for RegistryStrategy {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RegistryStrategy")
			.field("attached", &self.registry.is_some())
			.finish()
	}
}
