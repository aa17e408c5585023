use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, SyncSender};

use crate::info::{TypeDesc, TypeInfo};
use crate::named::Named;

/// Opt-in type introspection.
///
/// Implemented for std types here and for user types by `#[derive(Describe)]`:
///
/// ```ignore
/// #[derive(Describe)]
/// struct Invoice { id: u64 }
///
/// #[derive(Describe)]
/// #[entity(name = "billing.customer")]
/// struct Customer;
/// ```
pub trait Describe: 'static {
	const TYPE: &'static TypeInfo;

	/// Self-naming capability of this value, if the type provides one.
	fn as_named(&self) -> Option<&dyn Named> {
		None
	}
}

/// Object-safe view of a value handed to a resolver.
pub trait Subject {
	/// Descriptor of the value's type; `None` when the type is not described.
	fn type_desc(&self) -> Option<TypeDesc>;

	fn named(&self) -> Option<&dyn Named>;
}

impl<T: Describe + ?Sized> Subject for T {
	fn type_desc(&self) -> Option<TypeDesc> {
		Some(TypeDesc::of::<T>())
	}

	fn named(&self) -> Option<&dyn Named> {
		<T as Describe>::as_named(self)
	}
}

macro_rules! builtin {
	($($ty:ty => $name:literal),* $(,)?) => {
		$(
			impl Describe for $ty {
				const TYPE: &'static TypeInfo = &TypeInfo::builtin::<$ty>($name);
			}
		)*
	};
}

builtin! {
	bool => "bool",
	char => "char",
	i8 => "i8",
	i16 => "i16",
	i32 => "i32",
	i64 => "i64",
	i128 => "i128",
	isize => "isize",
	u8 => "u8",
	u16 => "u16",
	u32 => "u32",
	u64 => "u64",
	u128 => "u128",
	usize => "usize",
	f32 => "f32",
	f64 => "f64",
	str => "str",
	String => "String",
}

// Pointers are transparent: they normalize to their target and forward its
// self-naming.
impl<T: Describe + ?Sized> Describe for &'static T {
	const TYPE: &'static TypeInfo = &TypeInfo::pointer::<&'static T, T>();

	fn as_named(&self) -> Option<&dyn Named> {
		(**self).as_named()
	}
}

impl<T: Describe + ?Sized> Describe for &'static mut T {
	const TYPE: &'static TypeInfo = &TypeInfo::pointer::<&'static mut T, T>();

	fn as_named(&self) -> Option<&dyn Named> {
		(**self).as_named()
	}
}

impl<T: Describe + ?Sized> Describe for Box<T> {
	const TYPE: &'static TypeInfo = &TypeInfo::pointer::<Box<T>, T>();

	fn as_named(&self) -> Option<&dyn Named> {
		(**self).as_named()
	}
}

impl<T: Describe + ?Sized> Describe for Rc<T> {
	const TYPE: &'static TypeInfo = &TypeInfo::pointer::<Rc<T>, T>();

	fn as_named(&self) -> Option<&dyn Named> {
		(**self).as_named()
	}
}

impl<T: Describe + ?Sized> Describe for Arc<T> {
	const TYPE: &'static TypeInfo = &TypeInfo::pointer::<Arc<T>, T>();

	fn as_named(&self) -> Option<&dyn Named> {
		(**self).as_named()
	}
}

impl<T: Describe> Describe for Option<T> {
	const TYPE: &'static TypeInfo = &TypeInfo::pointer::<Option<T>, T>();

	fn as_named(&self) -> Option<&dyn Named> {
		self.as_ref().and_then(Describe::as_named)
	}
}

impl<T: Describe> Describe for [T] {
	const TYPE: &'static TypeInfo = &TypeInfo::slice::<[T], T>();
}

impl<T: Describe> Describe for Vec<T> {
	const TYPE: &'static TypeInfo = &TypeInfo::slice::<Vec<T>, T>();
}

impl<T: Describe> Describe for VecDeque<T> {
	const TYPE: &'static TypeInfo = &TypeInfo::slice::<VecDeque<T>, T>();
}

impl<T: Describe> Describe for BTreeSet<T> {
	const TYPE: &'static TypeInfo = &TypeInfo::slice::<BTreeSet<T>, T>();
}

impl<T: Describe, S: 'static> Describe for HashSet<T, S> {
	const TYPE: &'static TypeInfo = &TypeInfo::slice::<HashSet<T, S>, T>();
}

impl<T: Describe, const N: usize> Describe for [T; N] {
	const TYPE: &'static TypeInfo = &TypeInfo::array::<[T; N], T>(N);
}

impl<K: Describe, V: Describe, S: 'static> Describe for HashMap<K, V, S> {
	const TYPE: &'static TypeInfo = &TypeInfo::map::<HashMap<K, V, S>, K, V>();
}

impl<K: Describe, V: Describe> Describe for BTreeMap<K, V> {
	const TYPE: &'static TypeInfo = &TypeInfo::map::<BTreeMap<K, V>, K, V>();
}

impl<T: Describe> Describe for Sender<T> {
	const TYPE: &'static TypeInfo = &TypeInfo::channel::<Sender<T>, T>();
}

impl<T: Describe> Describe for SyncSender<T> {
	const TYPE: &'static TypeInfo = &TypeInfo::channel::<SyncSender<T>, T>();
}

impl<T: Describe> Describe for Receiver<T> {
	const TYPE: &'static TypeInfo = &TypeInfo::channel::<Receiver<T>, T>();
}

macro_rules! anonymous_tuple {
	($(($($param:ident),*)),* $(,)?) => {
		$(
			impl<$($param: 'static),*> Describe for ($($param,)*) {
				const TYPE: &'static TypeInfo = &TypeInfo::anonymous::<($($param,)*)>();
			}
		)*
	};
}

anonymous_tuple! {
	(),
	(A),
	(A, B),
	(A, B, C),
	(A, B, C, D),
	(A, B, C, D, E),
	(A, B, C, D, E, F),
}
