//! Name-keyed factory registry for trait-object implementations.
//!
//! Implementations of a shared interface register themselves under a string
//! key; callers holding only the key and the interface type construct an owned
//! instance of whichever implementation registered it.
//!
//! # Mental Model
//!
//! 1. **Declaration:** [`register!`] attaches a hook to a concrete type for one
//!    `(interface, signature)` pair and implements [`Registered`] for it.
//! 2. **Bootstrap:** the first call to [`global`] runs [`bootstrap`], which
//!    installs every collected hook in a deterministic order. Owned registries
//!    built with [`Registry::new`] bootstrap explicitly.
//! 3. **Lookup:** [`Store::create`] and [`Store::can_create`] resolve a key,
//!    overrides first, then registered entries.
//! 4. **Overrides:** [`Injector`] shadows a key for its own lifetime; nested
//!    injectors on one key restore in stack order.
//!
//! # Signatures
//!
//! The argument tuple `A` of `Store<I, A>` is the constructor signature.
//! `Store<dyn Vehicle, ()>` and `Store<dyn Vehicle, (Option<Arc<dyn Engine>>,)>`
//! are unrelated stores; a type registers separately for each.
//!
//! # Duplicates
//!
//! Registering a key twice overwrites the first entry under the default
//! [`DuplicatePolicy::LastWins`]; see [`RegistryOptions`] for the alternatives.
//!
//! # Initialization
//!
//! Hooks run inside [`bootstrap`], never before `main`. Lookups through
//! [`global`] always observe a completed bootstrap. Calling into a registry
//! from another static initializer is not supported.

pub mod core;
pub mod db;
mod macros;

pub use crate::core::{
	DuplicatePolicy, Entry, EntryKind, Factory, Injector, Location, Registered, Registration,
	RegistryError, RegistryOptions, Store,
};
pub use crate::db::plugin::{bootstrap, registrations};
pub use crate::db::{Registry, global, store};

#[doc(hidden)]
pub mod __private {
	pub use inventory;
}

#[cfg(test)]
mod tests;
