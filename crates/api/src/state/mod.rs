// Path: crates/api/src/state/mod.rs
//! Core traits for state management.
//!
//! - `StateAccess`: the dyn-safe key-value interface every service writes through.
//! - `StateOverlay`: a copy-on-write layer used to stage an operation's writes.
//! - `InMemoryState`: an ordered in-memory backend for hosts and tests.
//!
//! The typed helpers below layer the canonical codec over raw bytes so that
//! services never touch an encoding directly.

use canvass_types::codec;
use canvass_types::error::StateError;
use parity_scale_codec::{Decode, Encode};

mod accessor;
mod memory;
mod overlay;

pub use accessor::*;
pub use memory::InMemoryState;
pub use overlay::*;

/// Reads and decodes a SCALE-encoded value. A missing key yields `None`.
pub fn read_value<T: Decode>(
    state: &dyn StateAccess,
    key: &[u8],
) -> Result<Option<T>, StateError> {
    match state.get(key)? {
        Some(bytes) => codec::from_bytes_canonical(&bytes)
            .map(Some)
            .map_err(StateError::Decode),
        None => Ok(None),
    }
}

/// Encodes and writes a value under `key`.
pub fn write_value<T: Encode>(
    state: &mut dyn StateAccess,
    key: &[u8],
    value: &T,
) -> Result<(), StateError> {
    let bytes = codec::to_bytes_canonical(value).map_err(StateError::InvalidValue)?;
    state.insert(key, &bytes)
}

/// Reads a little-endian `u64` counter. A missing key yields zero.
pub fn read_u64(state: &dyn StateAccess, key: &[u8]) -> Result<u64, StateError> {
    match state.get(key)? {
        Some(bytes) => {
            let arr: [u8; 8] = bytes
                .as_slice()
                .try_into()
                .map_err(|_| StateError::InvalidValue(format!("expected 8 bytes, got {}", bytes.len())))?;
            Ok(u64::from_le_bytes(arr))
        }
        None => Ok(0),
    }
}

/// Reads a little-endian `u128` amount. A missing key yields zero.
pub fn read_u128(state: &dyn StateAccess, key: &[u8]) -> Result<u128, StateError> {
    match state.get(key)? {
        Some(bytes) => {
            let arr: [u8; 16] = bytes
                .as_slice()
                .try_into()
                .map_err(|_| StateError::InvalidValue(format!("expected 16 bytes, got {}", bytes.len())))?;
            Ok(u128::from_le_bytes(arr))
        }
        None => Ok(0),
    }
}
