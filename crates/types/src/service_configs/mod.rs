// Path: crates/types/src/service_configs/mod.rs
//! Configuration structures for the survey and registry services.

use crate::app::Balance;
use crate::error::TransactionError;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// One whole unit of collateral, in base units.
pub const UNIT: Balance = 1_000_000_000_000_000_000;

/// Where the reward pool of a closing survey is drawn from.
#[derive(Serialize, Deserialize, Encode, Decode, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RewardPoolScope {
    /// The pool is the total collateral held by the platform at closure.
    #[default]
    Shared,
    /// The pool is the funding deposited into the survey's own escrow at creation.
    PerSurvey,
}

/// What happens to a claim when the outbound reward transfer is rejected.
#[derive(Serialize, Deserialize, Encode, Decode, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransferFailurePolicy {
    /// The zeroed claim is committed; the caller receives `TransferFailed`.
    #[default]
    Forfeit,
    /// The whole withdrawal rolls back and the claim stays withdrawable.
    Restore,
}

/// Configuration parameters for the Survey service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyParams {
    /// The minimum stake required to vote, and the floor an active participant may not unstake below.
    /// Written as a decimal string, since TOML integers are limited to 64 bits.
    #[serde(with = "balance_string")]
    pub min_stake: Balance,
    /// The maximum number of open surveys a single identity may be bound to.
    pub max_active_participations: u32,
    /// The lower bound (inclusive, seconds) of the recency-bonus window.
    pub recency_window_start_secs: u64,
    /// The upper bound (exclusive, seconds) of the recency-bonus window.
    pub recency_window_end_secs: u64,
    /// The recency bonus as a percentage of the base reward.
    pub bonus_percent: u8,
    /// The source of the reward pool.
    pub reward_pool_scope: RewardPoolScope,
    /// Behaviour on a rejected reward transfer.
    pub transfer_failure_policy: TransferFailurePolicy,
}

impl Default for SurveyParams {
    fn default() -> Self {
        Self {
            min_stake: UNIT,
            max_active_participations: 50,
            recency_window_start_secs: 86_400,  // one day
            recency_window_end_secs: 172_800,   // two days
            bonus_percent: 10,
            reward_pool_scope: RewardPoolScope::Shared,
            transfer_failure_policy: TransferFailurePolicy::Forfeit,
        }
    }
}

impl SurveyParams {
    /// Parses parameters from TOML. Missing fields take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, TransactionError> {
        let params: Self =
            toml::from_str(s).map_err(|e| TransactionError::Deserialization(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    /// Rejects parameter sets that cannot be enforced consistently.
    pub fn validate(&self) -> Result<(), TransactionError> {
        if self.min_stake == 0 {
            return Err(TransactionError::Deserialization(
                "min_stake must be greater than zero".into(),
            ));
        }
        if self.recency_window_start_secs >= self.recency_window_end_secs {
            return Err(TransactionError::Deserialization(
                "recency window must be non-empty".into(),
            ));
        }
        if self.bonus_percent > 100 {
            return Err(TransactionError::Deserialization(
                "bonus_percent must not exceed 100".into(),
            ));
        }
        Ok(())
    }
}

mod balance_string {
    use crate::app::Balance;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(v: &Balance, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&v.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Balance, D::Error> {
        let s = String::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Configuration parameters for the NameRegistry service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryParams {
    /// The maximum length of a registered name, in bytes.
    pub max_name_len: usize,
}

impl Default for RegistryParams {
    fn default() -> Self {
        Self { max_name_len: 64 }
    }
}

impl RegistryParams {
    /// Parses parameters from TOML. Missing fields take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, TransactionError> {
        toml::from_str(s).map_err(|e| TransactionError::Deserialization(e.to_string()))
    }
}

bitflags::bitflags! {
    /// A bitmask representing the collaborator roles a service fills.
    /// This is distinct from the service's callable methods, which are defined in its ABI.
    #[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
    #[serde(transparent)]
    pub struct Capabilities: u32 {
        /// Answers registration queries through `as_registration_view`.
        const REGISTRATION_VIEW = 0b0001;
        /// Issues outbound value transfers.
        const VALUE_TRANSFER = 0b0010;
    }
}

impl Encode for Capabilities {
    fn encode_to<T: parity_scale_codec::Output + ?Sized>(&self, dest: &mut T) {
        self.bits().encode_to(dest)
    }
}

impl Decode for Capabilities {
    fn decode<I: parity_scale_codec::Input>(
        input: &mut I,
    ) -> Result<Self, parity_scale_codec::Error> {
        let bits = u32::decode(input)?;
        Self::from_bits(bits).ok_or_else(|| "Invalid bits for Capabilities".into())
    }
}
