use std::sync::Arc;

use super::entry::Factory;
use super::meta::Location;
use super::store::Store;

/// Scoped override of one key's factory.
///
/// While alive, `create`/`can_create` on the store resolve the key to this
/// injector's factory. Injectors for the same key stack: the most recently
/// installed one wins, and dropping it makes the previous one (or the primary
/// entry) visible again. Dropping out of order removes only the dropped
/// injector's own frame.
#[must_use = "the override is removed as soon as the injector is dropped"]
pub struct Injector<I: ?Sized + 'static, A: 'static> {
	store: Arc<Store<I, A>>,
	key: String,
	frame: u64,
	location: Location,
}

impl<I: ?Sized + 'static, A: 'static> Injector<I, A> {
	/// Installs `factory` as the active override for `key` in `store`.
	#[track_caller]
	pub fn new<F>(store: &Arc<Store<I, A>>, key: impl Into<String>, factory: F) -> Self
	where
		F: Fn(A) -> Box<I> + Send + Sync + 'static,
	{
		Self::at(store, key, factory, Location::caller())
	}

	/// Same as [`Injector::new`] with an explicit origin.
	pub fn at<F>(store: &Arc<Store<I, A>>, key: impl Into<String>, factory: F, location: Location) -> Self
	where
		F: Fn(A) -> Box<I> + Send + Sync + 'static,
	{
		let key = key.into();
		let factory: Factory<I, A> = Arc::new(factory);
		let frame = store.push_override(key.clone(), factory, location);
		Self {
			store: Arc::clone(store),
			key,
			frame,
			location,
		}
	}

	pub fn key(&self) -> &str {
		&self.key
	}

	pub fn location(&self) -> Location {
		self.location
	}
}

impl<I: ?Sized + 'static, A: 'static> Drop for Injector<I, A> {
	fn drop(&mut self) {
		self.store.remove_override(&self.key, self.frame);
	}
}

impl<I: ?Sized + 'static, A: 'static> std::fmt::Debug for Injector<I, A> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Injector")
			.field("interface", &self.store.interface_name())
			.field("key", &self.key)
			.field("frame", &self.frame)
			.field("location", &self.location)
			.finish()
	}
}
