use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::describe::Describe;

/// Static description of a single type.
///
/// Built by the `const` constructors below and stored behind a `&'static` in
/// [`Describe::TYPE`]. Containers reference their element (and key) descriptors, so
/// a `TypeInfo` graph mirrors the shape of the Rust type it describes.
#[derive(Clone, Copy)]
pub struct TypeInfo {
	type_id: fn() -> TypeId,
	type_name: fn() -> &'static str,
	naming: Naming,
	kind: Kind,
}

/// How a type's declared name and package are obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Naming {
	/// No declared name: tuples, closures, references, std containers.
	Anonymous,
	/// Language builtin with a fixed name and no package.
	Builtin(&'static str),
	/// User type; name and package come from the full type path.
	Declared,
	/// Hand-supplied name and package.
	Explicit {
		package: &'static str,
		name: &'static str,
	},
}

/// Structural kind of a described type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
	/// Single-element indirection: references, `Box`, `Rc`, `Arc`, `Option`.
	Pointer(TypeDesc),
	/// Variable-length sequence: `[T]`, `Vec`, `VecDeque`, sets.
	Slice(TypeDesc),
	/// Fixed-length sequence `[T; N]`.
	Array { elem: TypeDesc, len: usize },
	/// Channel endpoint carrying `T`.
	Channel(TypeDesc),
	/// Associative container.
	Map { key: TypeDesc, elem: TypeDesc },
	/// Anything else; may or may not be named.
	Other,
}

impl TypeInfo {
	/// User-declared type, named after its path (`crate::module::Name<Args>`).
	pub const fn declared<T: ?Sized + 'static>() -> Self {
		Self::with(TypeId::of::<T>, std::any::type_name::<T>, Naming::Declared, Kind::Other)
	}

	/// User type with an explicitly supplied package and name.
	pub const fn named<T: ?Sized + 'static>(package: &'static str, name: &'static str) -> Self {
		Self::with(
			TypeId::of::<T>,
			std::any::type_name::<T>,
			Naming::Explicit { package, name },
			Kind::Other,
		)
	}

	/// Builtin with no package, e.g. `i32` or `String`.
	pub const fn builtin<T: ?Sized + 'static>(name: &'static str) -> Self {
		Self::with(TypeId::of::<T>, std::any::type_name::<T>, Naming::Builtin(name), Kind::Other)
	}

	/// Type without a declared name.
	pub const fn anonymous<T: ?Sized + 'static>() -> Self {
		Self::with(TypeId::of::<T>, std::any::type_name::<T>, Naming::Anonymous, Kind::Other)
	}

	pub const fn pointer<T: ?Sized + 'static, E: Describe + ?Sized>() -> Self {
		Self::with(
			TypeId::of::<T>,
			std::any::type_name::<T>,
			Naming::Anonymous,
			Kind::Pointer(TypeDesc::new(E::TYPE)),
		)
	}

	pub const fn slice<T: ?Sized + 'static, E: Describe + ?Sized>() -> Self {
		Self::with(
			TypeId::of::<T>,
			std::any::type_name::<T>,
			Naming::Anonymous,
			Kind::Slice(TypeDesc::new(E::TYPE)),
		)
	}

	pub const fn array<T: ?Sized + 'static, E: Describe>(len: usize) -> Self {
		Self::with(
			TypeId::of::<T>,
			std::any::type_name::<T>,
			Naming::Anonymous,
			Kind::Array {
				elem: TypeDesc::new(E::TYPE),
				len,
			},
		)
	}

	pub const fn channel<T: ?Sized + 'static, E: Describe + ?Sized>() -> Self {
		Self::with(
			TypeId::of::<T>,
			std::any::type_name::<T>,
			Naming::Anonymous,
			Kind::Channel(TypeDesc::new(E::TYPE)),
		)
	}

	pub const fn map<T: ?Sized + 'static, K: Describe + ?Sized, V: Describe + ?Sized>() -> Self {
		Self::with(
			TypeId::of::<T>,
			std::any::type_name::<T>,
			Naming::Anonymous,
			Kind::Map {
				key: TypeDesc::new(K::TYPE),
				elem: TypeDesc::new(V::TYPE),
			},
		)
	}

	const fn with(
		type_id: fn() -> TypeId,
		type_name: fn() -> &'static str,
		naming: Naming,
		kind: Kind,
	) -> Self {
		Self {
			type_id,
			type_name,
			naming,
			kind,
		}
	}
}

/// Copyable handle to a [`TypeInfo`].
///
/// Equality and hashing go through [`TypeId`]: the same Rust type always yields
/// equal descriptors even when its `TypeInfo` was materialized more than once.
#[derive(Clone, Copy)]
pub struct TypeDesc(&'static TypeInfo);

impl TypeDesc {
	pub const fn new(info: &'static TypeInfo) -> Self {
		Self(info)
	}

	/// Descriptor of `T`.
	pub const fn of<T: Describe + ?Sized>() -> Self {
		Self(T::TYPE)
	}

	pub fn type_id(self) -> TypeId {
		(self.0.type_id)()
	}

	/// Full Rust type path, as reported by [`std::any::type_name`].
	pub fn type_name(self) -> &'static str {
		(self.0.type_name)()
	}

	pub fn kind(self) -> Kind {
		self.0.kind
	}

	/// Declared name including generic arguments (`Page<i32>`), or `""` when anonymous.
	pub fn name(self) -> &'static str {
		match self.0.naming {
			Naming::Anonymous => "",
			Naming::Builtin(name) | Naming::Explicit { name, .. } => name,
			Naming::Declared => split_path(self.type_name()).1,
		}
	}

	/// Module path of the declaration, or `""` for builtins and anonymous types.
	pub fn package(self) -> &'static str {
		match self.0.naming {
			Naming::Anonymous | Naming::Builtin(_) => "",
			Naming::Explicit { package, .. } => package,
			Naming::Declared => split_path(self.type_name()).0,
		}
	}

	pub fn is_named(self) -> bool {
		!self.name().is_empty()
	}

	pub fn is_builtin(self) -> bool {
		matches!(self.0.naming, Naming::Builtin(_))
	}

	/// Element descriptor of a container; `None` for [`Kind::Other`].
	pub fn elem(self) -> Option<TypeDesc> {
		match self.0.kind {
			Kind::Pointer(elem) | Kind::Slice(elem) | Kind::Channel(elem) => Some(elem),
			Kind::Array { elem, .. } | Kind::Map { elem, .. } => Some(elem),
			Kind::Other => None,
		}
	}

	/// Key descriptor of a map.
	pub fn key(self) -> Option<TypeDesc> {
		match self.0.kind {
			Kind::Map { key, .. } => Some(key),
			_ => None,
		}
	}
}

/// Splits `a::b::Name<x::Y>` into `("a::b", "Name<x::Y>")`.
///
/// Only the part before the first `<` is searched for the path separator, so paths
/// inside generic arguments stay attached to the name.
fn split_path(full: &'static str) -> (&'static str, &'static str) {
	let head = full.find('<').unwrap_or(full.len());
	match full[..head].rfind("::") {
		Some(idx) => (&full[..idx], &full[idx + 2..]),
		None => ("", full),
	}
}

impl PartialEq for TypeDesc {
	fn eq(&self, other: &Self) -> bool {
		self.type_id() == other.type_id()
	}
}

impl Eq for TypeDesc {}

impl Hash for TypeDesc {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.type_id().hash(state);
	}
}

impl fmt::Debug for TypeDesc {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.type_name())
	}
}

impl fmt::Display for TypeDesc {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.type_name())
	}
}

impl fmt::Debug for TypeInfo {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TypeInfo")
			.field("type_name", &(self.type_name)())
			.field("naming", &self.naming)
			.field("kind", &self.kind)
			.finish()
	}
}
