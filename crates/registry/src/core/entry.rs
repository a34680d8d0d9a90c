use std::sync::Arc;

use super::meta::{EntryKind, Location};

/// Shared constructor for one `(interface, signature)` pair.
///
/// `A` is the argument tuple: `()` for no-arg constructors, `(T,)` for a
/// single argument and so on.
pub type Factory<I, A> = Arc<dyn Fn(A) -> Box<I> + Send + Sync>;

/// One registration record inside a [`crate::Store`].
pub struct Entry<I: ?Sized, A> {
	pub(crate) key: String,
	pub(crate) factory: Factory<I, A>,
	pub(crate) location: Location,
	pub(crate) kind: EntryKind,
}

impl<I: ?Sized, A> Entry<I, A> {
	pub(crate) fn new(key: String, factory: Factory<I, A>, location: Location, kind: EntryKind) -> Self {
		Self {
			key,
			factory,
			location,
			kind,
		}
	}

	/// Copies this entry under another key, keeping factory and location.
	pub(crate) fn rekeyed(&self, key: String, kind: EntryKind) -> Self {
		Self {
			key,
			factory: Arc::clone(&self.factory),
			location: self.location,
			kind,
		}
	}

	pub fn key(&self) -> &str {
		&self.key
	}

	pub fn location(&self) -> Location {
		self.location
	}

	pub fn kind(&self) -> EntryKind {
		self.kind
	}

	/// Introspection line: `<file>:<line>: <key>` plus the kind marker.
	pub fn describe(&self) -> String {
		format!("{}: {}{}", self.location, self.key, self.kind.marker())
	}
}

impl<I: ?Sized, A> Clone for Entry<I, A> {
	fn clone(&self) -> Self {
		self.rekeyed(self.key.clone(), self.kind)
	}
}

impl<I: ?Sized, A> std::fmt::Debug for Entry<I, A> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Entry")
			.field("key", &self.key)
			.field("location", &self.location)
			.field("kind", &self.kind)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	trait Named {
		fn name(&self) -> &'static str;
	}

	struct Plain;

	impl Named for Plain {
		fn name(&self) -> &'static str {
			"plain"
		}
	}

	fn entry(kind: EntryKind) -> Entry<dyn Named, ()> {
		let factory: Factory<dyn Named, ()> = Arc::new(|()| Box::new(Plain) as Box<dyn Named>);
		Entry::new("Plain".into(), factory, Location::new("named.rs", 7), kind)
	}

	#[test]
	fn describe_marks_aliases() {
		let primary = entry(EntryKind::Primary);
		let alias = primary.rekeyed("Simple".into(), EntryKind::Alias);

		assert_eq!(primary.describe(), "named.rs:7: Plain");
		assert_eq!(alias.describe(), "named.rs:7: Simple*");
	}

	#[test]
	fn rekeyed_shares_the_factory() {
		let primary = entry(EntryKind::Primary);
		let alias = primary.rekeyed("Simple".into(), EntryKind::Alias);

		assert!(Arc::ptr_eq(&primary.factory, &alias.factory));
		assert_eq!((alias.factory)(()).name(), "plain");
		assert_eq!(alias.location(), primary.location());
	}
}
