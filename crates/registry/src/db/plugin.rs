use std::sync::atomic::Ordering;

use super::Registry;
use crate::core::plugin::Registration;

/// Every hook collected via `inventory`, in bootstrap order.
///
/// Sorted by location, then key, so that installation (and therefore which
/// duplicate wins) does not depend on link order.
pub fn registrations() -> Vec<&'static Registration> {
	let mut regs: Vec<&'static Registration> = inventory::iter::<Registration>.into_iter().collect();
	regs.sort_by(|a, b| a.location.cmp(&b.location).then_with(|| a.key.cmp(b.key)));
	regs
}

/// Installs every collected hook into `registry`.
///
/// Runs at most once per registry; later calls return 0 without touching it.
/// Returns the number of hooks installed.
///
/// The registry is marked bootstrapped before the hooks run. A second call
/// racing with the first on an owned registry returns 0 while installation is
/// still in progress, so it must not be taken as "hooks are visible". Finish
/// bootstrapping an owned registry before sharing it. [`super::global`] is
/// unaffected, since `OnceLock` blocks readers until bootstrap returns.
pub fn bootstrap(registry: &Registry) -> usize {
	if registry.bootstrapped.swap(true, Ordering::AcqRel) {
		tracing::debug!("registry already bootstrapped");
		return 0;
	}

	let regs = registrations();
	for reg in &regs {
		tracing::trace!(
			key = reg.key,
			ty = reg.type_name,
			interface = reg.interface,
			location = %reg.location,
			"installing registration"
		);
		(reg.install)(registry);
	}

	tracing::debug!(count = regs.len(), stores = registry.stores_len(), "bootstrap complete");
	regs.len()
}
