// Path: crates/api/src/services/mod.rs
//! Traits for pluggable platform services.

use crate::identity::RegistrationView;
use crate::state::StateAccess;
use crate::transaction::context::TxContext;
use canvass_types::error::TransactionError;
use canvass_types::service_configs::Capabilities;
use std::any::Any;

pub mod access;

/// The base trait for any service hosted by the platform.
///
/// Services are stateless objects: everything they persist lives in the `StateAccess`
/// handed to each call, so a single instance can serve every caller.
pub trait BlockchainService: Any + Send + Sync {
    /// A unique, static, lowercase string identifier for the service.
    /// This is used for deterministic ordering and for dispatching calls.
    fn id(&self) -> &str;

    /// The version of the ABI the service exposes.
    fn abi_version(&self) -> u32;

    /// A string identifying the schema of the state this service reads/writes.
    fn state_schema(&self) -> &str;

    /// Returns a bitmask of the collaborator roles this service fills.
    fn capabilities(&self) -> Capabilities;

    /// Provides access to the concrete type for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Handles a generic, dispatched call. `params` and the returned bytes are
    /// SCALE-encoded; `method` carries an ABI version suffix such as `vote@v1`.
    ///
    /// # Default Implementation
    /// The default implementation returns an `Unsupported` error. Services must override
    /// this method to expose callable functions.
    fn handle_service_call(
        &self,
        state: &mut dyn StateAccess,
        method: &str,
        params: &[u8],
        ctx: &TxContext<'_>,
    ) -> Result<Vec<u8>, TransactionError> {
        let _ = (state, params, ctx);
        Err(TransactionError::Unsupported(format!(
            "Service '{}' does not implement the method '{}'",
            self.id(),
            method
        )))
    }

    /// Attempts to downcast this service to a `RegistrationView` trait object.
    fn as_registration_view(&self) -> Option<&dyn RegistrationView> {
        None
    }
}
