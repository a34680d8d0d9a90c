//! Duplicate-key handling for primary registrations.

/// What a store does when a key is registered a second time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
	/// Overwrite with the last definition seen (logged at `warn`).
	#[default]
	LastWins,
	/// Keep the first definition seen for a key.
	FirstWins,
	/// Keep the existing definition and report [`crate::RegistryError::Duplicate`].
	Reject,
	/// Panic with both registration locations.
	Panic,
}

/// Construction options for a [`crate::Registry`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegistryOptions {
	/// Applied by every store the registry creates.
	pub duplicate_policy: DuplicatePolicy,
}

impl RegistryOptions {
	pub const fn with_policy(duplicate_policy: DuplicatePolicy) -> Self {
		Self { duplicate_policy }
	}
}
