use super::meta::Location;

/// Registry operation failures.
///
/// Missing keys on `create`/`can_create` are not errors; they yield `None`
/// and `false` respectively.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
	/// An alias named a key the store does not hold.
	#[error("no '{key}' registered for {interface}")]
	UnknownKey { interface: &'static str, key: String },

	/// A key was registered twice under [`crate::DuplicatePolicy::Reject`].
	#[error("duplicate key '{key}' for {interface}: registered at {existing}, again at {incoming}")]
	Duplicate {
		interface: &'static str,
		key: String,
		existing: Location,
		incoming: Location,
	},
}
