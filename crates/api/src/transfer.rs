// Path: crates/api/src/transfer.rs

//! Defines the `ValueTransfer` trait for outbound value movements.
//!
//! Outbound transfers are the only point where control leaves a service mid-operation.
//! The recipient may call back into any service synchronously, using the `state` it is
//! handed. Services therefore finish every mutation of their own records before
//! calling `transfer`.

use crate::state::StateAccess;
use crate::transaction::context::TxContext;
use canvass_types::app::{AccountId, Balance};
use canvass_types::error::TransactionError;

/// The host's channel for moving value out of the platform to an account.
pub trait ValueTransfer: Send + Sync {
    /// Delivers `amount` to `to`.
    ///
    /// `state` is the live view of the calling operation; anything the recipient writes
    /// through it is kept only if this returns `Ok`. An `Err` means the recipient
    /// rejected the value.
    fn transfer(
        &self,
        state: &mut dyn StateAccess,
        ctx: &TxContext<'_>,
        to: &AccountId,
        amount: Balance,
    ) -> Result<(), TransactionError>;
}

/// A `ValueTransfer` for hosts that settle payouts outside the platform's state.
/// Every transfer is accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAllTransfers;

impl ValueTransfer for AcceptAllTransfers {
    fn transfer(
        &self,
        _state: &mut dyn StateAccess,
        _ctx: &TxContext<'_>,
        to: &AccountId,
        amount: Balance,
    ) -> Result<(), TransactionError> {
        log::debug!("[Transfer] released {} to {}", amount, to.short());
        Ok(())
    }
}
