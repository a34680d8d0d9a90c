use std::collections::BTreeSet;

use pretty_assertions::assert_eq;

use super::{Codec, Identity, Rot};
use crate::{EntryKind, Registry, Store, bootstrap, global, registrations};

#[test]
fn every_hook_is_collected_once() {
	let regs = registrations();
	let keys: Vec<&str> = regs.iter().filter(|r| r.interface.contains("Codec")).map(|r| r.key).collect();

	assert_eq!(keys.len(), 4);
	for key in ["identity", "rot13", "rot", "plain"] {
		assert!(keys.contains(&key), "hook '{key}' was not collected");
	}
}

#[test]
fn registrations_are_sorted_by_location() {
	let regs = registrations();
	for pair in regs.windows(2) {
		assert!(pair[0].location <= pair[1].location, "{:?} before {:?}", pair[0].location, pair[1].location);
	}
}

#[test]
fn bootstrap_installs_every_hook_into_its_store() {
	let registry = Registry::new();
	let installed = bootstrap(&registry);

	assert_eq!(installed, registrations().len());
	assert!(registry.is_bootstrapped());

	let plain = registry.store::<dyn Codec, ()>();
	let shifted = registry.store::<dyn Codec, (u8,)>();
	assert_eq!(
		plain.keys(),
		BTreeSet::from(["identity".to_owned(), "plain".to_owned(), "rot13".to_owned()])
	);
	assert_eq!(shifted.keys(), BTreeSet::from(["rot".to_owned()]));
	assert_eq!(shifted.create("rot", (3,)).map(|c| c.name()), Some("rot3".to_owned()));
}

#[test]
fn bootstrap_runs_once_per_registry() {
	let registry = Registry::new();
	let first = bootstrap(&registry);
	assert!(first > 0);
	assert_eq!(bootstrap(&registry), 0);
	assert_eq!(registry.store::<dyn Codec, ()>().len(), 3);
}

#[test]
fn racing_bootstraps_install_once() {
	let registry = Registry::new();
	let counts: Vec<usize> = std::thread::scope(|scope| {
		let handles: Vec<_> = (0..4).map(|_| scope.spawn(|| bootstrap(&registry))).collect();
		handles.into_iter().filter_map(|h| h.join().ok()).collect()
	});

	assert_eq!(counts.iter().sum::<usize>(), registrations().len());
	assert_eq!(counts.iter().filter(|&&n| n == 0).count(), 3);
	assert_eq!(registry.store::<dyn Codec, ()>().len(), 3);
}

#[test]
fn fresh_registry_matches_global() {
	let registry = Registry::new();
	bootstrap(&registry);

	assert_eq!(
		registry.store::<dyn Codec, ()>().keys_with_locations(),
		global().store::<dyn Codec, ()>().keys_with_locations()
	);
}

#[test]
fn typed_hooks_bind_their_key() {
	assert_eq!(Store::<dyn Codec, ()>::key_for::<Identity>(), "identity");
	assert_eq!(Store::<dyn Codec, ()>::key_for::<Rot>(), "rot13");
	assert_eq!(Store::<dyn Codec, (u8,)>::key_for::<Rot>(), "rot");

	let store = global().store::<dyn Codec, ()>();
	assert_eq!(store.bound_key::<Identity>(), Some("identity"));
	assert_eq!(store.bound_key::<Rot>(), Some("rot13"));
	assert_eq!(global().store::<dyn Codec, (u8,)>().bound_key::<Identity>(), None);
}

#[test]
fn extra_keys_are_primary_entries() {
	let store = global().store::<dyn Codec, ()>();
	let entry = store.entry("plain").expect("plain registered");

	assert_eq!(entry.kind(), EntryKind::Primary);
	assert_eq!(store.create("plain", ()).map(|c| c.name()), Some("identity".to_owned()));
}
