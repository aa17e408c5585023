use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::mpsc::Sender;

use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::{
	Describe, Describer, Identifier, Kind, Named, NamedFn, Subject, TypeDesc, TypeInfo, TypeNamer,
};

#[derive(Describe)]
struct Invoice;

#[derive(Describe)]
#[entity(name = "billing.customer")]
struct Customer;

#[derive(Describe)]
struct Page<T> {
	_items: Vec<T>,
}

struct Manual;

impl Named for Manual {
	fn entity_name(&self) -> &str {
		"manual.entity"
	}
}

impl Describe for Manual {
	const TYPE: &'static TypeInfo = &TypeInfo::named::<Manual>("ledger", "Manual");

	fn as_named(&self) -> Option<&dyn Named> {
		Some(self)
	}
}

#[test]
fn derived_type_is_named_after_its_path() {
	let ty = TypeDesc::of::<Invoice>();
	assert_eq!(ty.name(), "Invoice");
	assert_eq!(ty.package(), module_path!());
	assert_eq!(ty.kind(), Kind::Other);
	assert!(ty.is_named());
	assert!(!ty.is_builtin());
}

#[test]
fn generic_instantiation_keeps_arguments_in_name() {
	let ty = TypeDesc::of::<Page<i32>>();
	assert_eq!(ty.name(), "Page<i32>");
	assert_eq!(ty.package(), module_path!());
	assert_ne!(ty, TypeDesc::of::<Page<u8>>());
}

#[rstest]
#[case(TypeDesc::of::<i32>(), "i32")]
#[case(TypeDesc::of::<String>(), "String")]
#[case(TypeDesc::of::<str>(), "str")]
#[case(TypeDesc::of::<bool>(), "bool")]
fn builtins_have_no_package(#[case] ty: TypeDesc, #[case] name: &str) {
	assert_eq!(ty.name(), name);
	assert_eq!(ty.package(), "");
	assert!(ty.is_builtin());
}

#[test]
fn explicit_naming_overrides_path() {
	let ty = TypeDesc::of::<Manual>();
	assert_eq!(ty.name(), "Manual");
	assert_eq!(ty.package(), "ledger");
}

#[test]
fn containers_expose_elements() {
	let boxed = TypeDesc::of::<Box<Invoice>>();
	assert_eq!(boxed.kind(), Kind::Pointer(TypeDesc::of::<Invoice>()));
	assert!(!boxed.is_named());

	let list = TypeDesc::of::<Vec<Invoice>>();
	assert_eq!(list.elem(), Some(TypeDesc::of::<Invoice>()));
	assert_eq!(list.key(), None);

	let array = TypeDesc::of::<[Invoice; 3]>();
	assert_eq!(
		array.kind(),
		Kind::Array {
			elem: TypeDesc::of::<Invoice>(),
			len: 3
		}
	);

	let map = TypeDesc::of::<HashMap<String, Invoice>>();
	assert_eq!(map.key(), Some(TypeDesc::of::<String>()));
	assert_eq!(map.elem(), Some(TypeDesc::of::<Invoice>()));

	let chan = TypeDesc::of::<Sender<Invoice>>();
	assert_eq!(chan.kind(), Kind::Channel(TypeDesc::of::<Invoice>()));

	let ordered = TypeDesc::of::<BTreeMap<u32, Arc<Invoice>>>();
	assert_eq!(ordered.elem(), Some(TypeDesc::of::<Arc<Invoice>>()));
}

#[test]
fn tuples_are_anonymous() {
	let ty = TypeDesc::of::<(i32, String)>();
	assert_eq!(ty.name(), "");
	assert_eq!(ty.package(), "");
	assert_eq!(ty.kind(), Kind::Other);
	assert!(!TypeDesc::of::<()>().is_named());
}

#[test]
fn subject_exposes_self_naming() {
	let customer = Customer;
	let subject: &dyn Subject = &customer;
	assert_eq!(subject.type_desc(), Some(TypeDesc::of::<Customer>()));
	assert_eq!(subject.named().map(|n| n.entity_name()), Some("billing.customer"));

	let invoice = Invoice;
	let subject: &dyn Subject = &invoice;
	assert!(subject.named().is_none());

	let manual = Manual;
	let subject: &dyn Subject = &manual;
	assert_eq!(subject.named().map(|n| n.entity_name()), Some("manual.entity"));
}

#[test]
fn pointers_forward_self_naming() {
	let boxed = Box::new(Customer);
	let subject: &dyn Subject = &boxed;
	assert_eq!(subject.named().map(|n| n.entity_name()), Some("billing.customer"));
	assert_eq!(subject.type_desc(), Some(TypeDesc::of::<Box<Customer>>()));

	let shared = Arc::new(Some(Manual));
	let subject: &dyn Subject = &shared;
	assert_eq!(subject.named().map(|n| n.entity_name()), Some("manual.entity"));

	let absent: Option<Customer> = None;
	let subject: &dyn Subject = &absent;
	assert!(subject.named().is_none());

	let unnamed = Box::new(Invoice);
	let subject: &dyn Subject = &unnamed;
	assert!(subject.named().is_none());
}

#[test]
fn named_fn_adapts_closures() {
	let named = NamedFn::new(|| "domain.user");
	assert_eq!(named.entity_name(), "domain.user");

	let subject: &dyn Subject = &named;
	assert_eq!(subject.named().map(|n| n.entity_name()), Some("domain.user"));
	assert!(subject.type_desc().is_some_and(|ty| !ty.is_named()));
}

#[test]
fn descriptor_identity_follows_type_id() {
	assert_eq!(TypeDesc::of::<Invoice>(), TypeDesc::new(Invoice::TYPE));
	assert_ne!(TypeDesc::of::<Invoice>(), TypeDesc::of::<Customer>());
	assert_eq!(
		TypeDesc::of::<Invoice>().type_id(),
		std::any::TypeId::of::<Invoice>()
	);
}

/// Names any value after its descriptor, ignoring instance state.
struct ByDescriptor;

impl<T: Describe> TypeNamer<T> for ByDescriptor {
	fn entity_name(&self, _value: &T) -> String {
		let ty = TypeDesc::of::<T>();
		format!("{}.{}", ty.package().rsplit("::").next().unwrap_or_default(), ty.name())
	}
}

#[test]
fn type_namer_policies_are_external() {
	assert_eq!(ByDescriptor.entity_name(&Invoice), "tests.Invoice");
	assert_eq!(ByDescriptor.entity_name(&Customer), "tests.Customer");

	let upper = |value: &str| value.to_uppercase();
	assert_eq!(TypeNamer::<str>::entity_name(&upper, "order"), "ORDER");
}

struct Account {
	id: u64,
}

impl Named for Account {
	fn entity_name(&self) -> &str {
		"iam.account"
	}
}

impl Describer for Account {
	fn entity_description(&self) -> &str {
		"User account"
	}

	fn entity_category(&self) -> &str {
		"identity"
	}

	fn entity_version(&self) -> &str {
		"v1"
	}
}

impl Identifier for Account {
	fn entity_id(&self) -> String {
		format!("account-{}", self.id)
	}
}

#[test]
fn metadata_capabilities_compose_with_naming() {
	let account = Account { id: 7 };
	let describer: &dyn Describer = &account;
	assert_eq!(describer.entity_name(), "iam.account");
	assert_eq!(describer.entity_category(), "identity");
	assert_eq!(describer.entity_version(), "v1");
	assert_eq!(describer.entity_description(), "User account");
	assert_eq!(account.entity_id(), "account-7");
}
