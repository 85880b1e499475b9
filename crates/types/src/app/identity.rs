// Path: crates/types/src/app/identity.rs

//! Defines the canonical `AccountId` used to key every per-identity record.
//!
//! Identities are pseudonymous: the platform never learns more about a participant
//! than the 32-byte identifier supplied by the host with each call.

use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// A unique, stable identifier for an account on the platform.
///
/// The host derives it (typically from a public key hash) and passes it to every
/// operation as the authenticated caller. It is represented as a 32-byte array.
#[derive(
    Encode,
    Decode,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Debug,
    Default,
    Hash,
)]
pub struct AccountId(pub [u8; 32]);

impl AccountId {
    /// Returns a short hex prefix of the identifier, suitable for log lines.
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl AsRef<[u8]> for AccountId {
    /// Allows treating the `AccountId` as a byte slice.
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for AccountId {
    /// Allows creating an `AccountId` directly from a 32-byte array.
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl core::fmt::Display for AccountId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}
