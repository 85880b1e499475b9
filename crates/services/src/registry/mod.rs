// Path: crates/services/src/registry/mod.rs
//! The name registry. An account must register a display name before it may create
//! surveys. Other services see it only through `RegistrationView`.

use canvass_api::identity::RegistrationView;
use canvass_api::services::BlockchainService;
use canvass_api::state::StateAccess;
use canvass_api::transaction::context::TxContext;
use canvass_api::transaction::execute_atomic;
use canvass_telemetry::{error_metrics, service_metrics};
use canvass_telemetry::time::Timer;
use canvass_types::app::AccountId;
use canvass_types::codec;
use canvass_types::error::{ErrorCode, RegistryError, StateError, TransactionError};
use canvass_types::keys::registry_name_key;
use canvass_types::service_configs::{Capabilities, RegistryParams};
use parity_scale_codec::{Decode, Encode};
use std::any::Any;

#[derive(Encode, Decode, Debug, Clone)]
pub struct RegisterParams {
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct NameRegistry {
    pub params: RegistryParams,
}

impl NameRegistry {
    pub fn new(params: RegistryParams) -> Self {
        Self { params }
    }

    /// Registers `name` for the caller. Names are not unique; accounts are.
    pub fn register(
        &self,
        state: &mut dyn StateAccess,
        ctx: &TxContext,
        name: &str,
    ) -> Result<(), TransactionError> {
        let account = ctx.signer_account_id;
        let result = execute_atomic(state, |s| -> Result<(), TransactionError> {
            let trimmed = name.trim();
            if trimmed.is_empty() || trimmed.len() > self.params.max_name_len {
                return Err(RegistryError::InvalidName(name.to_string()).into());
            }
            let key = registry_name_key(&account);
            if s.get(&key)?.is_some() {
                return Err(RegistryError::AlreadyRegistered.into());
            }
            s.insert(&key, trimmed.as_bytes())?;
            Ok(())
        });
        match &result {
            Ok(()) => log::info!("[Registry] {} registered as '{}'", account.short(), name.trim()),
            Err(e) => error_metrics().inc_error("registry", e.code()),
        }
        result
    }

    pub fn name_of(
        &self,
        state: &dyn StateAccess,
        account: &AccountId,
    ) -> Result<Option<String>, StateError> {
        state
            .get(&registry_name_key(account))?
            .map(|bytes| String::from_utf8(bytes).map_err(|e| StateError::Decode(e.to_string())))
            .transpose()
    }
}

impl RegistrationView for NameRegistry {
    fn is_registered(
        &self,
        state: &dyn StateAccess,
        account: &AccountId,
    ) -> Result<bool, TransactionError> {
        Ok(state.get(&registry_name_key(account))?.is_some())
    }
}

impl BlockchainService for NameRegistry {
    fn id(&self) -> &str {
        "registry"
    }

    fn abi_version(&self) -> u32 {
        1
    }

    fn state_schema(&self) -> &str {
        "v1"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::REGISTRATION_VIEW
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_registration_view(&self) -> Option<&dyn RegistrationView> {
        Some(self)
    }

    fn handle_service_call(
        &self,
        state: &mut dyn StateAccess,
        method: &str,
        params: &[u8],
        ctx: &TxContext<'_>,
    ) -> Result<Vec<u8>, TransactionError> {
        let _timer = Timer::new(service_metrics(), "registry", method);
        let result = match method {
            "register@v1" => {
                let p: RegisterParams =
                    codec::from_bytes_canonical(params).map_err(TransactionError::Deserialization)?;
                self.register(state, ctx, &p.name).map(|()| Vec::new())
            }
            _ => Err(TransactionError::Unsupported(format!(
                "Registry service does not support method '{}'",
                method
            ))),
        };
        if let Err(e) = &result {
            service_metrics().inc_dispatch_error("registry", method, e.code());
        }
        result
    }
}
