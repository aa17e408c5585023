use std::collections::{BTreeMap, HashMap};
use std::sync::mpsc::Receiver;

use nomen_descriptor::{Describe, TypeDesc};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use super::normalize;
use crate::config::Config;
use crate::error::NormalizeError;

#[derive(Describe)]
struct Account;

#[derive(Describe)]
struct Key;

#[derive(Describe)]
struct Val;

#[derive(Describe)]
struct Wrapper<T>(T);

type Depth4 = Box<Vec<Option<[Account; 1]>>>;
type Depth8 = Box<Box<Box<Box<Box<Box<Box<Box<Account>>>>>>>>;
type Depth9 = Box<Depth8>;

fn ty<T: Describe + ?Sized>() -> Option<TypeDesc> {
	Some(TypeDesc::of::<T>())
}

fn prefer_key() -> Config {
	Config::default().with_map_prefer_elem(false)
}

#[rstest]
#[case(ty::<Account>())]
#[case(ty::<Box<Account>>())]
#[case(ty::<&'static Account>())]
#[case(ty::<Vec<Account>>())]
#[case(ty::<[Account]>())]
#[case(ty::<[Account; 4]>())]
#[case(ty::<Receiver<Account>>())]
#[case(ty::<Option<Box<Vec<Account>>>>())]
fn containers_unwrap_to_element(#[case] input: Option<TypeDesc>) {
	assert_eq!(
		normalize(input, &Config::default()),
		Ok(TypeDesc::of::<Account>())
	);
}

#[test]
fn map_prefers_configured_side() {
	let map = ty::<HashMap<Key, Val>>();
	assert_eq!(normalize(map, &Config::default()), Ok(TypeDesc::of::<Val>()));
	assert_eq!(normalize(map, &prefer_key()), Ok(TypeDesc::of::<Key>()));

	let by_name = ty::<BTreeMap<String, Account>>();
	assert_eq!(normalize(by_name, &prefer_key()), Ok(TypeDesc::of::<String>()));
}

#[test]
fn map_falls_back_to_named_side() {
	let anon_elem = ty::<HashMap<Key, (i32, i32)>>();
	assert_eq!(normalize(anon_elem, &Config::default()), Ok(TypeDesc::of::<Key>()));

	let anon_key = ty::<HashMap<(i32, i32), Val>>();
	assert_eq!(normalize(anon_key, &prefer_key()), Ok(TypeDesc::of::<Val>()));
}

#[test]
fn map_with_no_named_side_continues_with_element() {
	let map = ty::<HashMap<(u8,), Vec<Account>>>();
	assert_eq!(normalize(map, &Config::default()), Ok(TypeDesc::of::<Account>()));
	assert_eq!(normalize(map, &prefer_key()), Ok(TypeDesc::of::<Account>()));

	// The key side is never unwrapped.
	let keyed = ty::<HashMap<Vec<Key>, (u8,)>>();
	assert!(matches!(
		normalize(keyed, &Config::default()),
		Err(NormalizeError::NotNamed(_))
	));
}

#[test]
fn generic_instantiation_is_its_own_named_type() {
	let got = normalize(ty::<Vec<Wrapper<i32>>>(), &Config::default());
	assert_eq!(got, Ok(TypeDesc::of::<Wrapper<i32>>()));
	assert_eq!(got.map(|t| t.name()), Ok("Wrapper<i32>"));
}

#[test]
fn unwrap_budget_is_enforced() {
	let cfg = Config::default();
	assert_eq!(normalize(ty::<Depth8>(), &cfg), Ok(TypeDesc::of::<Account>()));
	assert!(matches!(
		normalize(ty::<Depth9>(), &cfg),
		Err(NormalizeError::NotNamed(_))
	));

	let shallow = Config::default().with_max_unwrap(3);
	assert!(normalize(ty::<Depth4>(), &shallow).is_err());
	assert_eq!(
		normalize(ty::<Depth4>(), &shallow.with_max_unwrap(4)),
		Ok(TypeDesc::of::<Account>())
	);
}

#[test]
fn zero_budget_uses_default() {
	let cfg = Config::default().with_max_unwrap(0);
	assert_eq!(normalize(ty::<Depth8>(), &cfg), Ok(TypeDesc::of::<Account>()));
	assert!(normalize(ty::<Depth9>(), &cfg).is_err());
}

#[test]
fn errors() {
	let cfg = Config::default();
	assert_eq!(normalize(None, &cfg), Err(NormalizeError::NilType));
	assert_eq!(
		normalize(ty::<(i32, Account)>(), &cfg),
		Err(NormalizeError::NotNamed(TypeDesc::of::<(i32, Account)>()))
	);
	assert_eq!(
		normalize(ty::<Vec<()>>(), &cfg),
		Err(NormalizeError::NotNamed(TypeDesc::of::<()>()))
	);
}

#[test]
fn builtins_are_named() {
	let cfg = Config::default().with_include_builtins(false);
	assert_eq!(normalize(ty::<Vec<i64>>(), &cfg), Ok(TypeDesc::of::<i64>()));
	assert_eq!(normalize(ty::<&'static str>(), &cfg), Ok(TypeDesc::of::<str>()));
}

#[test]
fn concurrent_callers_agree() {
	let cfg = Config::default();
	std::thread::scope(|s| {
		for _ in 0..8 {
			s.spawn(|| {
				for _ in 0..1_000 {
					assert_eq!(
						normalize(ty::<Option<Vec<Account>>>(), &cfg),
						Ok(TypeDesc::of::<Account>())
					);
					assert_eq!(
						normalize(ty::<HashMap<Key, Val>>(), &cfg),
						Ok(TypeDesc::of::<Val>())
					);
				}
			});
		}
	});
}

proptest! {
	#[test]
	fn depth_four_needs_budget_of_four(max in 0usize..32) {
		let cfg = Config::default().with_max_unwrap(max);
		let got = normalize(ty::<Depth4>(), &cfg);
		if cfg.effective_max_unwrap() >= 4 {
			prop_assert_eq!(got, Ok(TypeDesc::of::<Account>()));
		} else {
			prop_assert!(got.is_err());
		}
	}
}
