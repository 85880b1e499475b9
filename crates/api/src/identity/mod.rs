// Path: crates/api/src/identity/mod.rs

//! Defines the `RegistrationView` trait for decoupled registration lookups.

use crate::services::BlockchainService;
use crate::state::StateAccess;
use canvass_types::app::AccountId;
use canvass_types::error::TransactionError;

/// A read-only view of which accounts have registered with the platform.
///
/// This trait is implemented by services like `NameRegistry` and used by the survey
/// service to gate survey creation without a direct dependency.
pub trait RegistrationView: BlockchainService {
    /// Returns true if `account` has registered.
    fn is_registered(
        &self,
        state: &dyn StateAccess,
        account: &AccountId,
    ) -> Result<bool, TransactionError>;
}
