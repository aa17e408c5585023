use nomen_descriptor::{Subject, TypeDesc};

use super::Strategy;
use crate::config::Config;

/// Fast path for values that name themselves.
#[derive(Debug, Default, Clone, Copy)]
pub struct NamedStrategy;

impl Strategy for NamedStrategy {
	fn try_resolve(&self, value: &dyn Subject, _cfg: &Config) -> Option<String> {
		value.named().map(|named| named.entity_name().to_owned())
	}

	/// Self-naming needs an instance, so bare types always fall through.
	fn try_resolve_type(&self, _ty: Option<TypeDesc>, _cfg: &Config) -> Option<String> {
		None
	}
}
