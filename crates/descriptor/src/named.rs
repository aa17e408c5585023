//! Capabilities a type can offer on top of its descriptor.
//!
//! # Contract
//!
//! Names returned by [`Named::entity_name`] describe the *kind* of entity, not an
//! instance:
//!
//! * they must be non-empty and deterministic for a given type,
//! * they must not depend on mutable instance state,
//! * producing them must be cheap and must not block or perform I/O.
//!
//! Lowercase, dot-separated names (`billing.invoice`) are the convention.

use crate::describe::Describe;
use crate::info::TypeInfo;

/// Canonical, type-level name supplied by the value itself.
///
/// When a value exposes this capability the resolver uses it and consults nothing
/// else.
pub trait Named {
	fn entity_name(&self) -> &str;
}

/// Human-oriented metadata about an entity type, for docs and tooling.
pub trait Describer: Named {
	/// One-line description, e.g. "User account in the system".
	fn entity_description(&self) -> &str;

	/// Coarse grouping such as "identity" or "billing".
	fn entity_category(&self) -> &str;

	/// Schema version of the entity, e.g. "v1".
	fn entity_version(&self) -> &str;
}

/// Per-instance identifier, unlike [`Named`] which is per-type.
pub trait Identifier {
	fn entity_id(&self) -> String;
}

/// Naming policy for values of `T`, kept apart from `T` itself.
///
/// Lets one policy name many types, or several policies name the same type.
/// Closures taking `&T` implement it directly.
pub trait TypeNamer<T: ?Sized> {
	fn entity_name(&self, value: &T) -> String;
}

impl<T, F> TypeNamer<T> for F
where
	T: ?Sized,
	F: Fn(&T) -> String,
{
	fn entity_name(&self, value: &T) -> String {
		self(value)
	}
}

/// Adapts a plain function to [`Named`].
///
/// ```ignore
/// let named = NamedFn::new(|| "domain.user");
/// assert_eq!(naming.resolve(&named), "domain.user");
/// ```
#[derive(Clone, Copy)]
pub struct NamedFn<F>(F);

impl<F> NamedFn<F>
where
	F: Fn() -> &'static str,
{
	pub const fn new(f: F) -> Self {
		Self(f)
	}
}

impl<F> Named for NamedFn<F>
where
	F: Fn() -> &'static str,
{
	fn entity_name(&self) -> &str {
		(self.0)()
	}
}

impl<F> Describe for NamedFn<F>
where
	F: Fn() -> &'static str + 'static,
{
	const TYPE: &'static TypeInfo = &TypeInfo::anonymous::<NamedFn<F>>();

	fn as_named(&self) -> Option<&dyn Named> {
		Some(self)
	}
}

impl<F> std::fmt::Debug for NamedFn<F>
where
	F: Fn() -> &'static str,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("NamedFn").field(&(self.0)()).finish()
	}
}
