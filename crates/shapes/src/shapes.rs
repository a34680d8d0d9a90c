//! Shapes registered with the factory registry.

use fabrik_registry::{RegistryError, register, store};

pub trait Shape {
	/// Renders the shape as one line of text.
	fn draw(&self) -> String;
}

pub struct Circle;

impl Shape for Circle {
	fn draw(&self) -> String {
		"Circle".into()
	}
}

register!(dyn Shape, "Circle", Circle, || Circle);

pub struct Rect;

impl Shape for Rect {
	fn draw(&self) -> String {
		"Rectangle".into()
	}
}

register!(dyn Shape, "Rectangle", Rect, || Rect);

pub struct Ellipsis {
	params: String,
}

impl Ellipsis {
	pub fn new(params: impl Into<String>) -> Self {
		Self { params: params.into() }
	}
}

impl Shape for Ellipsis {
	fn draw(&self) -> String {
		format!("Ellipsis:{}", self.params)
	}
}

register!(dyn Shape, "Ellipsis", Ellipsis, || Ellipsis::new(""));
register!(dyn Shape, "Ellipsis", Ellipsis, |params: String| Ellipsis::new(params));

/// Adds the short names used on the command line.
///
/// Safe to call more than once, also from several threads.
pub fn install_aliases() -> Result<(), RegistryError> {
	store::<dyn Shape, ()>().alias_if_absent("Rectangle", "Rect")?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use fabrik_registry::Store;

	use super::*;

	type Plain = Store<dyn Shape, ()>;
	type Parameterized = Store<dyn Shape, (String,)>;

	#[test]
	fn registered_names() {
		assert_eq!(Plain::key_for::<Circle>(), "Circle");
		assert_eq!(Plain::key_for::<Rect>(), "Rectangle");
		assert_eq!(Plain::key_for::<Ellipsis>(), "Ellipsis");
		assert_eq!(Parameterized::key_for::<Ellipsis>(), "Ellipsis");
	}

	#[test]
	fn ellipsis_in_both_signatures() {
		let plain = store::<dyn Shape, ()>().create("Ellipsis", ()).map(|s| s.draw());
		let sized = store::<dyn Shape, (String,)>()
			.create("Ellipsis", ("3x4".to_owned(),))
			.map(|s| s.draw());

		assert_eq!(plain.as_deref(), Some("Ellipsis:"));
		assert_eq!(sized.as_deref(), Some("Ellipsis:3x4"));
	}

	#[test]
	fn concurrent_alias_installs_agree() {
		std::thread::scope(|scope| {
			for _ in 0..4 {
				scope.spawn(|| install_aliases().unwrap());
			}
		});

		let shapes = store::<dyn Shape, ()>();
		assert_eq!(shapes.entry("Rect").map(|e| e.kind()), Some(fabrik_registry::EntryKind::Alias));
		assert_eq!(shapes.alias_if_absent("Rectangle", "Rect"), Ok(false));
	}

	#[test]
	fn rect_alias_is_idempotent() {
		install_aliases().unwrap();
		install_aliases().unwrap();

		let shapes = store::<dyn Shape, ()>();
		assert_eq!(shapes.create("Rect", ()).map(|s| s.draw()).as_deref(), Some("Rectangle"));
		assert!(shapes.keys_with_locations().iter().any(|line| line.ends_with(": Rect*")));
	}
}
