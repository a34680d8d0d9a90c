//! Registration macros.
//!
//! `register!` attaches a static hook to a concrete type; `register_extra!`
//! adds a further key for a signature the type already registered; `alias!`
//! adds a secondary key in the global registry at run time.

/// Registers a concrete type as constructible under `key` for an interface.
///
/// The closure's parameters define the signature; the store is
/// `Store<Iface, (ArgTypes,)>`.
///
/// ```ignore
/// register!(dyn Engine, "V4", V4Engine, || V4Engine);
/// register!(dyn Vehicle, "Car", Car, |engine: Option<Arc<dyn Engine>>| Car::new(engine));
/// ```
///
/// Each type may use `register!` once per signature, since the expansion
/// implements [`crate::Registered`] for it. Use [`crate::register_extra!`]
/// for additional keys in the same signature.
#[macro_export]
macro_rules! register {
	($iface:ty, $key:expr, $ty:ty, || $body:expr $(,)?) => {
		impl $crate::Registered<$iface, ()> for $ty {
			const KEY: &'static str = $key;
		}

		$crate::__register_hook!(@typed $iface, $key, $ty, [] $body);
	};
	($iface:ty, $key:expr, $ty:ty, |$($arg:ident : $argty:ty),* $(,)?| $body:expr $(,)?) => {
		impl $crate::Registered<$iface, ($($argty,)*)> for $ty {
			const KEY: &'static str = $key;
		}

		$crate::__register_hook!(@typed $iface, $key, $ty, [$($arg : $argty),*] $body);
	};
}

/// Registers an additional key for a type without binding it to the type.
///
/// [`crate::Store::key_for`] keeps returning the key given to `register!`.
#[macro_export]
macro_rules! register_extra {
	($iface:ty, $key:expr, $ty:ty, || $body:expr $(,)?) => {
		$crate::__register_hook!(@untyped $iface, $key, $ty, [] $body);
	};
	($iface:ty, $key:expr, $ty:ty, |$($arg:ident : $argty:ty),* $(,)?| $body:expr $(,)?) => {
		$crate::__register_hook!(@untyped $iface, $key, $ty, [$($arg : $argty),*] $body);
	};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __register_hook {
	(@typed $iface:ty, $key:expr, $ty:ty, [$($arg:ident : $argty:ty),*] $body:expr) => {
		const _: () = {
			fn install(registry: &$crate::Registry) {
				registry.store::<$iface, ($($argty,)*)>().register_type::<$ty, _>(
					$key,
					|($($arg,)*): ($($argty,)*)| -> ::std::boxed::Box<$iface> { ::std::boxed::Box::new($body) },
					$crate::Location::new(file!(), line!()),
				);
			}

			$crate::__register_hook!(@submit $iface, $key, $ty, install);
		};
	};
	(@untyped $iface:ty, $key:expr, $ty:ty, [$($arg:ident : $argty:ty),*] $body:expr) => {
		const _: () = {
			fn install(registry: &$crate::Registry) {
				registry.store::<$iface, ($($argty,)*)>().register(
					$key,
					|($($arg,)*): ($($argty,)*)| -> ::std::boxed::Box<$iface> { ::std::boxed::Box::new($body) },
					$crate::Location::new(file!(), line!()),
					$crate::EntryKind::Primary,
				);
			}

			$crate::__register_hook!(@submit $iface, $key, $ty, install);
		};
	};
	(@submit $iface:ty, $key:expr, $ty:ty, $install:ident) => {
		$crate::__private::inventory::submit! {
			$crate::Registration::new(
				$key,
				stringify!($ty),
				stringify!($iface),
				$crate::Location::new(file!(), line!()),
				$install,
			)
		}
	};
}

/// Adds `new` as an alias of `existing` in the global registry.
///
/// Without a signature the `()` store is used. Evaluates to
/// `Result<(), RegistryError>`.
///
/// ```ignore
/// alias!(dyn Shape, "Rectangle" => "Rect")?;
/// alias!(dyn Shape, (String,), "Ellipsis" => "Oval")?;
/// ```
#[macro_export]
macro_rules! alias {
	($iface:ty, $existing:expr => $new:expr $(,)?) => {
		$crate::alias!($iface, (), $existing => $new)
	};
	($iface:ty, $sig:ty, $existing:expr => $new:expr $(,)?) => {
		$crate::store::<$iface, $sig>().alias($existing, $new)
	};
}
