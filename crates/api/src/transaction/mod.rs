// Path: crates/api/src/transaction/mod.rs
//! Atomic execution of a single operation against state.

use crate::state::{StateAccess, StateOverlay};
use canvass_types::error::StateError;

pub mod context;

/// Runs `f` against a fresh overlay of `state` and commits its writes only if it succeeds.
///
/// On `Err` every staged write is dropped, so the caller's state is left byte-for-byte
/// unchanged. Calls nest: running `execute_atomic` on an overlay stages into that overlay.
pub fn execute_atomic<T, E, F>(state: &mut dyn StateAccess, f: F) -> Result<T, E>
where
    E: From<StateError>,
    F: FnOnce(&mut dyn StateAccess) -> Result<T, E>,
{
    let mut overlay = StateOverlay::new(&*state);
    let out = f(&mut overlay)?;
    let (inserts, deletes) = overlay.into_ordered_batch();
    log::trace!(
        "[Atomic] committing {} inserts, {} deletes",
        inserts.len(),
        deletes.len()
    );
    state.batch_apply(&inserts, &deletes)?;
    Ok(out)
}
