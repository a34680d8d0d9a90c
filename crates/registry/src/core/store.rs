//! Keyed factory store for one `(interface, signature)` pair.
//!
//! # Concurrency
//!
//! One mutex guards both the primary entries and the override stacks. It is
//! held for the map operation only: [`Store::create`] clones the factory out,
//! releases the lock, then runs the factory. Factories may therefore call back
//! into this or any other store.
//!
//! A `register` racing with an in-flight `create` for the same key does not
//! affect that `create`; it already holds the factory it is going to call.
//!
//! # Overrides
//!
//! Overrides live in a separate namespace and never touch primary entries.
//! Each key owns a stack of frames; an [`Injector`] removes exactly its own
//! frame on drop, so nested injectors restore the previous override.

use std::any::TypeId;
use std::collections::{BTreeSet, HashMap};
use std::marker::PhantomData;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use super::entry::{Entry, Factory};
use super::error::RegistryError;
use super::injector::Injector;
use super::meta::{EntryKind, Location};
use super::plugin::Registered;
use super::policy::DuplicatePolicy;

struct OverrideFrame<I: ?Sized, A> {
	id: u64,
	entry: Entry<I, A>,
}

struct StoreState<I: ?Sized, A> {
	entries: HashMap<String, Entry<I, A>>,
	overrides: HashMap<String, Vec<OverrideFrame<I, A>>>,
	bindings: HashMap<TypeId, &'static str>,
	next_frame: u64,
}

impl<I: ?Sized, A> StoreState<I, A> {
	fn lookup(&self, key: &str) -> Option<&Entry<I, A>> {
		self.overrides
			.get(key)
			.and_then(|stack| stack.last())
			.map(|frame| &frame.entry)
			.or_else(|| self.entries.get(key))
	}
}

/// Result of one insert attempt.
///
/// Every variant that carries an [`Entry`] holds a user factory that must be
/// dropped outside the store lock, since its captures may call back into the
/// store from `Drop`.
enum Inserted<I: ?Sized, A> {
	Fresh,
	Replaced(Entry<I, A>),
	Kept(Entry<I, A>),
	Rejected { entry: Entry<I, A>, err: RegistryError, fatal: bool },
}

impl<I: ?Sized, A> Inserted<I, A> {
	fn stored(&self) -> bool {
		matches!(self, Self::Fresh | Self::Replaced(_))
	}

	/// Drops any leftover entry and reports the outcome. Call with the lock released.
	fn settle(self) -> Result<bool, RegistryError> {
		match self {
			Self::Fresh | Self::Replaced(_) => Ok(true),
			Self::Kept(_) => Ok(false),
			Self::Rejected { entry, err, fatal } => {
				drop(entry);
				if fatal {
					panic!("{err}");
				}
				Err(err)
			}
		}
	}
}

/// Factories of `I` constructible from the argument tuple `A`.
///
/// Obtain one through [`crate::Registry::store`]; every distinct `(I, A)` pair
/// yields a logically separate store.
pub struct Store<I: ?Sized + 'static, A: 'static> {
	interface: &'static str,
	policy: DuplicatePolicy,
	state: Mutex<StoreState<I, A>>,
	_signature: PhantomData<fn(A) -> Box<I>>,
}

impl<I: ?Sized + 'static, A: 'static> Store<I, A> {
	pub(crate) fn new(policy: DuplicatePolicy) -> Self {
		Self {
			interface: std::any::type_name::<I>(),
			policy,
			state: Mutex::new(StoreState {
				entries: HashMap::new(),
				overrides: HashMap::new(),
				bindings: HashMap::new(),
				next_frame: 0,
			}),
			_signature: PhantomData,
		}
	}

	/// Type name of the interface, for diagnostics.
	pub fn interface_name(&self) -> &'static str {
		self.interface
	}

	pub fn policy(&self) -> DuplicatePolicy {
		self.policy
	}

	/// Inserts `factory` under `key`, applying the duplicate policy.
	///
	/// Under [`DuplicatePolicy::Reject`] a rejected registration is logged and
	/// dropped; use [`Store::try_register`] to observe the error.
	pub fn register<F>(&self, key: impl Into<String>, factory: F, location: Location, kind: EntryKind)
	where
		F: Fn(A) -> Box<I> + Send + Sync + 'static,
	{
		if let Err(err) = self.try_register(key, factory, location, kind) {
			warn!(interface = self.interface, %err, "registration rejected");
		}
	}

	/// Like [`Store::register`], but reports rejected duplicates.
	pub fn try_register<F>(
		&self,
		key: impl Into<String>,
		factory: F,
		location: Location,
		kind: EntryKind,
	) -> Result<(), RegistryError>
	where
		F: Fn(A) -> Box<I> + Send + Sync + 'static,
	{
		let factory: Factory<I, A> = Arc::new(factory);
		let entry = Entry::new(key.into(), factory, location, kind);
		let outcome = self.insert_locked(&mut self.state.lock(), entry);
		outcome.settle().map(drop)
	}

	/// Registers the factory for concrete type `T` and records the
	/// `T -> key` binding for [`Store::bound_key`].
	///
	/// The binding is only recorded if the entry was actually stored.
	pub fn register_type<T, F>(&self, key: &'static str, factory: F, location: Location)
	where
		T: 'static,
		F: Fn(A) -> Box<I> + Send + Sync + 'static,
	{
		let factory: Factory<I, A> = Arc::new(factory);
		let entry = Entry::new(key.to_owned(), factory, location, EntryKind::Primary);
		let outcome = {
			let mut state = self.state.lock();
			let outcome = self.insert_locked(&mut state, entry);
			if outcome.stored() {
				state.bindings.insert(TypeId::of::<T>(), key);
			}
			outcome
		};
		if let Err(err) = outcome.settle() {
			warn!(interface = self.interface, %err, "registration rejected");
		}
	}

	/// Applies the duplicate policy. Entries leaving the map are handed back
	/// in the outcome so that callers drop them after releasing the lock.
	fn insert_locked(&self, state: &mut StoreState<I, A>, entry: Entry<I, A>) -> Inserted<I, A> {
		if let Some(existing) = state.entries.get(&entry.key) {
			match self.policy {
				DuplicatePolicy::LastWins => {
					warn!(
						interface = self.interface,
						key = %entry.key,
						existing = %existing.location,
						incoming = %entry.location,
						"overwriting registered key"
					);
				}
				DuplicatePolicy::FirstWins => {
					debug!(
						interface = self.interface,
						key = %entry.key,
						kept = %existing.location,
						"keeping first registration"
					);
					return Inserted::Kept(entry);
				}
				DuplicatePolicy::Reject | DuplicatePolicy::Panic => {
					let err = RegistryError::Duplicate {
						interface: self.interface,
						key: entry.key.clone(),
						existing: existing.location,
						incoming: entry.location,
					};
					let fatal = self.policy == DuplicatePolicy::Panic;
					return Inserted::Rejected { entry, err, fatal };
				}
			}
		}

		debug!(
			interface = self.interface,
			key = %entry.key,
			location = %entry.location,
			kind = %entry.kind,
			"registered"
		);
		match state.entries.insert(entry.key.clone(), entry) {
			Some(displaced) => Inserted::Replaced(displaced),
			None => Inserted::Fresh,
		}
	}

	/// Returns true if `key` resolves to an override or a registered entry.
	pub fn can_create(&self, key: &str) -> bool {
		self.state.lock().lookup(key).is_some()
	}

	/// Constructs a new instance for `key`, consulting overrides first.
	///
	/// Returns `None` for unknown keys.
	pub fn create(&self, key: &str, args: A) -> Option<Box<I>> {
		let (factory, kind) = {
			let state = self.state.lock();
			let entry = state.lookup(key)?;
			(Arc::clone(&entry.factory), entry.kind)
		};
		trace!(interface = self.interface, key, %kind, "create");
		Some(factory(args))
	}

	/// Snapshot of every registered key, aliases included.
	pub fn keys(&self) -> BTreeSet<String> {
		self.state.lock().entries.keys().cloned().collect()
	}

	/// `<file>:<line>: <key>` for every registered entry; aliases end in `*`.
	pub fn keys_with_locations(&self) -> BTreeSet<String> {
		self.state.lock().entries.values().map(Entry::describe).collect()
	}

	/// Snapshot of the entry `key` currently resolves to.
	pub fn entry(&self, key: &str) -> Option<Entry<I, A>> {
		self.state.lock().lookup(key).cloned()
	}

	/// Key `T` was registered under for exactly this signature.
	///
	/// Only types that registered for `(I, A)` implement [`Registered<I, A>`],
	/// so asking for any other type fails to compile.
	pub fn key_for<T>() -> &'static str
	where
		T: Registered<I, A>,
	{
		T::KEY
	}

	/// Key recorded for `T` by [`Store::register_type`], if any.
	pub fn bound_key<T: 'static>(&self) -> Option<&'static str> {
		self.state.lock().bindings.get(&TypeId::of::<T>()).copied()
	}

	/// Adds `new` as a second key for the entry registered under `existing`.
	///
	/// The alias shares the factory and location of the original; the
	/// original key is left untouched. Overrides are not aliased.
	pub fn alias(&self, existing: &str, new: impl Into<String>) -> Result<(), RegistryError> {
		let outcome = {
			let mut state = self.state.lock();
			let alias = self.aliased_entry(&state, existing, new.into())?;
			self.insert_locked(&mut state, alias)
		};
		outcome.settle().map(drop)
	}

	/// Like [`Store::alias`], but leaves an existing `new` key alone.
	///
	/// The check and the insert happen under one lock, so concurrent callers
	/// agree on a single winner. Returns true if this call added the alias.
	pub fn alias_if_absent(&self, existing: &str, new: impl Into<String>) -> Result<bool, RegistryError> {
		let new = new.into();
		let outcome = {
			let mut state = self.state.lock();
			if state.entries.contains_key(&new) {
				trace!(interface = self.interface, key = %new, "alias already present");
				return Ok(false);
			}
			let alias = self.aliased_entry(&state, existing, new)?;
			self.insert_locked(&mut state, alias)
		};
		outcome.settle()
	}

	fn aliased_entry(&self, state: &StoreState<I, A>, existing: &str, new: String) -> Result<Entry<I, A>, RegistryError> {
		match state.entries.get(existing) {
			Some(source) => Ok(source.rekeyed(new, EntryKind::Alias)),
			None => Err(RegistryError::UnknownKey {
				interface: self.interface,
				key: existing.to_owned(),
			}),
		}
	}

	/// Installs a scoped override for `key`, active until the returned guard drops.
	#[track_caller]
	pub fn inject<F>(self: &Arc<Self>, key: impl Into<String>, factory: F) -> Injector<I, A>
	where
		F: Fn(A) -> Box<I> + Send + Sync + 'static,
	{
		Injector::new(self, key, factory)
	}

	pub(crate) fn push_override(&self, key: String, factory: Factory<I, A>, location: Location) -> u64 {
		let mut state = self.state.lock();
		let id = state.next_frame;
		state.next_frame += 1;
		trace!(interface = self.interface, key = %key, frame = id, %location, "override installed");
		let entry = Entry::new(key.clone(), factory, location, EntryKind::Override);
		state.overrides.entry(key).or_default().push(OverrideFrame { id, entry });
		id
	}

	pub(crate) fn remove_override(&self, key: &str, frame: u64) {
		// The frame owns a user factory; it is dropped only after unlocking.
		let removed = {
			let mut state = self.state.lock();
			let Some(stack) = state.overrides.get_mut(key) else {
				return;
			};
			let removed = stack.iter().rposition(|f| f.id == frame).map(|pos| stack.remove(pos));
			let remaining = stack.len();
			if remaining == 0 {
				state.overrides.remove(key);
			}
			trace!(interface = self.interface, key, frame, remaining, found = removed.is_some(), "override removed");
			removed
		};
		drop(removed);
	}

	/// Returns true while at least one injector is alive for `key`.
	pub fn is_overridden(&self, key: &str) -> bool {
		self.state.lock().overrides.contains_key(key)
	}

	/// Number of registered keys, aliases included.
	pub fn len(&self) -> usize {
		self.state.lock().entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl<I: ?Sized + 'static, A: 'static> std::fmt::Debug for Store<I, A> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let state = self.state.lock();
		f.debug_struct("Store")
			.field("interface", &self.interface)
			.field("policy", &self.policy)
			.field("entries", &state.entries.len())
			.field("overrides", &state.overrides.len())
			.finish()
	}
}
