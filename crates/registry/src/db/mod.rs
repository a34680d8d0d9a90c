//! Registry container and the process-wide instance.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

pub mod plugin;

use crate::core::{RegistryOptions, Store};

type AnyStore = Arc<dyn Any + Send + Sync>;

/// Owner of every store, one per `(interface, signature)` pair.
///
/// Stores are created lazily on first access and live as long as the
/// registry. Most programs use [`global`]; tests and embedders may build their
/// own and fill it with [`plugin::bootstrap`].
#[derive(Default)]
pub struct Registry {
	options: RegistryOptions,
	stores: RwLock<HashMap<TypeId, AnyStore>>,
	pub(crate) bootstrapped: AtomicBool,
}

impl Registry {
	/// Creates an empty registry with default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an empty registry with the given options.
	pub fn with_options(options: RegistryOptions) -> Self {
		Self {
			options,
			..Self::default()
		}
	}

	pub fn options(&self) -> RegistryOptions {
		self.options
	}

	/// Returns the store for interface `I` and argument tuple `A`, creating it on first use.
	pub fn store<I: ?Sized + 'static, A: 'static>(&self) -> Arc<Store<I, A>> {
		let id = TypeId::of::<Store<I, A>>();
		if let Some(store) = self.stores.read().get(&id) {
			return downcast(Arc::clone(store));
		}

		let mut stores = self.stores.write();
		let store = stores
			.entry(id)
			.or_insert_with(|| {
				tracing::debug!(interface = std::any::type_name::<I>(), signature = std::any::type_name::<A>(), "store created");
				Arc::new(Store::<I, A>::new(self.options.duplicate_policy)) as AnyStore
			})
			.clone();
		downcast(store)
	}

	/// Number of stores created so far.
	pub fn stores_len(&self) -> usize {
		self.stores.read().len()
	}

	/// True once [`plugin::bootstrap`] has run against this registry.
	pub fn is_bootstrapped(&self) -> bool {
		self.bootstrapped.load(Ordering::Acquire)
	}
}

fn downcast<I: ?Sized + 'static, A: 'static>(store: AnyStore) -> Arc<Store<I, A>> {
	match store.downcast::<Store<I, A>>() {
		Ok(store) => store,
		Err(_) => unreachable!("store map is keyed by the store's TypeId"),
	}
}

impl std::fmt::Debug for Registry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Registry")
			.field("options", &self.options)
			.field("stores", &self.stores_len())
			.field("bootstrapped", &self.is_bootstrapped())
			.finish()
	}
}

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// The process-wide registry.
///
/// The first call runs [`plugin::bootstrap`], so every `register!` hook is
/// installed before any lookup made through this registry. Do not call this
/// from inside an `inventory` constructor or another static initializer.
pub fn global() -> &'static Registry {
	GLOBAL.get_or_init(|| {
		let registry = Registry::new();
		plugin::bootstrap(&registry);
		registry
	})
}

/// Shorthand for `global().store::<I, A>()`.
pub fn store<I: ?Sized + 'static, A: 'static>() -> Arc<Store<I, A>> {
	global().store::<I, A>()
}
