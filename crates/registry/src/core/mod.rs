//! Store, entries and registration primitives.

pub mod entry;
pub mod error;
pub mod injector;
pub mod meta;
pub mod plugin;
pub mod policy;
pub mod store;

pub use entry::{Entry, Factory};
pub use error::RegistryError;
pub use injector::Injector;
pub use meta::{EntryKind, Location};
pub use plugin::{Registered, Registration};
pub use policy::{DuplicatePolicy, RegistryOptions};
pub use store::Store;
