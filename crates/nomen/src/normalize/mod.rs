//! Nearest-named-type search.
//!
//! Unwrapping policy:
//!
//! * pointer / slice / array / channel: continue with the element type.
//! * `Map<K, V>`: return the preferred side (`V` when `map_prefer_elem`, else `K`)
//!   if it is named, else the other side if it is named, else continue with `V`.
//! * anything else: return it when named, fail with [`NormalizeError::NotNamed`]
//!   otherwise.
//!
//! The walk is bounded by [`Config::effective_max_unwrap`]. The function is pure and
//! keeps no state, so it can be called from any thread without coordination.

use nomen_descriptor::{Kind, TypeDesc};

use crate::config::Config;
use crate::error::NormalizeError;

/// Returns the nearest named type reachable from `ty`.
pub fn normalize(ty: Option<TypeDesc>, cfg: &Config) -> Result<TypeDesc, NormalizeError> {
	let mut ty = ty.ok_or(NormalizeError::NilType)?;

	for _ in 0..cfg.effective_max_unwrap() {
		match ty.kind() {
			Kind::Pointer(elem) | Kind::Slice(elem) | Kind::Channel(elem) => ty = elem,
			Kind::Array { elem, .. } => ty = elem,
			Kind::Map { key, elem } => {
				let (first, second) = if cfg.map_prefer_elem {
					(elem, key)
				} else {
					(key, elem)
				};
				if first.is_named() {
					return Ok(first);
				}
				if second.is_named() {
					return Ok(second);
				}
				ty = elem;
			}
			Kind::Other if ty.is_named() => return Ok(ty),
			Kind::Other => return Err(NormalizeError::NotNamed(ty)),
		}
	}

	// Budget exhausted: only a named type is acceptable here.
	if ty.is_named() {
		Ok(ty)
	} else {
		Err(NormalizeError::NotNamed(ty))
	}
}

#[cfg(test)]
mod tests;
