// Path: crates/types/src/codec.rs

//! The canonical, deterministic binary codec for platform state and service-call payloads.
//!
//! Thin wrappers around `parity-scale-codec` (SCALE). Every record written to state and
//! every parameter blob passed to `handle_service_call` goes through these two functions,
//! so all components agree on one binary representation.

use parity_scale_codec::{Decode, DecodeAll, Encode};

/// Encodes a value into its canonical SCALE byte representation.
pub fn to_bytes_canonical<T: Encode>(v: &T) -> Result<Vec<u8>, String> {
    Ok(v.encode())
}

/// Decodes a value from its canonical SCALE byte representation.
///
/// Trailing bytes are rejected, so a value has exactly one accepted encoding.
pub fn from_bytes_canonical<T: Decode>(b: &[u8]) -> Result<T, String> {
    T::decode_all(&mut &*b).map_err(|e| format!("canonical decode failed: {}", e))
}
