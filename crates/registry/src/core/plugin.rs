use super::meta::Location;
use crate::db::Registry;

/// Binds a concrete type to the key it registered under for `(I, A)`.
///
/// Implemented by [`crate::register!`]; never implement it by hand. A type
/// that did not register for a given signature does not implement the trait
/// for it, which turns a mismatched [`crate::Store::key_for`] into a compile
/// error.
pub trait Registered<I: ?Sized, A> {
	const KEY: &'static str;
}

/// Static registration hook collected via `inventory`.
///
/// Carries only compile-time constants; `install` runs during
/// [`crate::bootstrap`] and must not touch anything but the registry it is
/// handed.
#[derive(Debug)]
pub struct Registration {
	pub key: &'static str,
	/// Concrete type, as written at the registration site.
	pub type_name: &'static str,
	/// Interface type, as written at the registration site.
	pub interface: &'static str,
	pub location: Location,
	/// Inserts the entry into the right store of `registry`.
	pub install: fn(&Registry),
}

inventory::collect!(Registration);

impl Registration {
	pub const fn new(
		key: &'static str,
		type_name: &'static str,
		interface: &'static str,
		location: Location,
		install: fn(&Registry),
	) -> Self {
		Self {
			key,
			type_name,
			interface,
			location,
			install,
		}
	}
}
