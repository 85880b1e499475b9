// Path: crates/api/src/transaction/context.rs
//! Defines the stable context for a single service call.

use crate::services::access::ServiceDirectory;
use crate::transfer::ValueTransfer;
use canvass_types::app::AccountId;

/// Provides stable, read-only context to services during execution.
#[derive(Clone)]
pub struct TxContext<'a> {
    /// The logical clock: the current block height. Survey expiry is measured in it.
    pub block_height: u64,
    /// The wall-clock timestamp of the current block, in seconds.
    /// Recency windows are measured in it.
    pub block_timestamp: u64,
    /// The `AccountId` of the authenticated caller.
    /// This is the authoritative source for permission checks within services.
    pub signer_account_id: AccountId,
    /// A read-only directory of available services.
    pub services: &'a ServiceDirectory,
    /// The host's outbound value channel.
    pub transfers: &'a dyn ValueTransfer,
}

impl<'a> TxContext<'a> {
    /// Returns a copy of this context with a different caller, as seen by a nested call.
    pub fn with_signer(&self, signer: AccountId) -> Self {
        Self {
            signer_account_id: signer,
            ..self.clone()
        }
    }
}
