/// Source position a registration was made from.
///
/// Only used for diagnostics (`keys_with_locations`, log fields, panic
/// messages); it never takes part in lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
	pub file: &'static str,
	pub line: u32,
}

impl Location {
	/// Creates a location from `file!()` / `line!()` style parts.
	pub const fn new(file: &'static str, line: u32) -> Self {
		Self { file, line }
	}

	/// Location of the caller of a `#[track_caller]` function.
	#[track_caller]
	pub fn caller() -> Self {
		let caller = std::panic::Location::caller();
		Self {
			file: caller.file(),
			line: caller.line(),
		}
	}
}

impl core::fmt::Display for Location {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		write!(f, "{}:{}", self.file, self.line)
	}
}

/// How an entry came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
	/// Registered directly for a concrete type.
	Primary,
	/// Secondary key copied from an existing entry.
	Alias,
	/// Scoped replacement installed by an [`crate::Injector`].
	Override,
}

impl EntryKind {
	/// Suffix appended to the key in `keys_with_locations` output.
	pub const fn marker(self) -> &'static str {
		match self {
			Self::Alias => "*",
			Self::Primary | Self::Override => "",
		}
	}
}

impl core::fmt::Display for EntryKind {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		match self {
			Self::Primary => write!(f, "primary"),
			Self::Alias => write!(f, "alias"),
			Self::Override => write!(f, "override"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn location_renders_file_and_line() {
		assert_eq!(Location::new("src/engines.rs", 12).to_string(), "src/engines.rs:12");
	}

	#[test]
	fn caller_location_points_here() {
		let loc = Location::caller();
		assert_eq!(loc.file, file!());
		assert_eq!(loc.line, line!() - 2);
	}

	#[test]
	fn only_aliases_carry_a_marker() {
		assert_eq!(EntryKind::Alias.marker(), "*");
		assert_eq!(EntryKind::Primary.marker(), "");
		assert_eq!(EntryKind::Override.marker(), "");
	}
}
