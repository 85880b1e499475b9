// Path: crates/types/src/error/mod.rs
//! Core error types for the Canvass survey platform.
//!
//! Every failure is synchronous and aborts the surrounding operation; the caller
//! (see `canvass_api::transaction::execute_atomic`) discards all staged writes.

use crate::app::SurveyId;
use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Errors related to the state backend or the codec layered over it.
#[derive(Error, Debug)]
pub enum StateError {
    /// The requested key was not found in the state.
    #[error("Key not found in state")]
    KeyNotFound,
    /// An error occurred in the state backend.
    #[error("State backend error: {0}")]
    Backend(String),
    /// An error occurred while writing to the state.
    #[error("State write error: {0}")]
    WriteError(String),
    /// The provided value was invalid.
    #[error("Invalid value: {0}")]
    InvalidValue(String),
    /// An error occurred during state deserialization.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl ErrorCode for StateError {
    fn code(&self) -> &'static str {
        match self {
            Self::KeyNotFound => "STATE_KEY_NOT_FOUND",
            Self::Backend(_) => "STATE_BACKEND_ERROR",
            Self::WriteError(_) => "STATE_WRITE_ERROR",
            Self::InvalidValue(_) => "STATE_INVALID_VALUE",
            Self::Decode(_) => "STATE_DECODE_ERROR",
        }
    }
}

/// Errors related to the name registry that gates survey creation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The caller already holds a registered name.
    #[error("Account is already registered")]
    AlreadyRegistered,
    /// The caller has never registered.
    #[error("Account is not registered")]
    NotRegistered,
    /// The supplied name is empty or too long.
    #[error("Invalid name: {0}")]
    InvalidName(String),
}

impl ErrorCode for RegistryError {
    fn code(&self) -> &'static str {
        match self {
            Self::AlreadyRegistered => "REGISTRY_ALREADY_REGISTERED",
            Self::NotRegistered => "REGISTRY_NOT_REGISTERED",
            Self::InvalidName(_) => "REGISTRY_INVALID_NAME",
        }
    }
}

/// Errors related to staking, surveys, voting and rewards.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurveyError {
    /// The survey does not exist.
    #[error("Survey not found: {0}")]
    SurveyNotFound(SurveyId),
    /// The survey parameters supplied at creation were rejected.
    #[error("Invalid survey: {0}")]
    InvalidSurvey(String),
    /// A zero amount was supplied where a positive one is required.
    #[error("Amount must be greater than zero")]
    InvalidAmount,
    /// The option index is out of range.
    #[error("Invalid option index {index} (survey has {count} options)")]
    InvalidOption {
        /// The rejected index.
        index: u32,
        /// The number of options the survey offers.
        count: u32,
    },
    /// The survey is closed or has reached its expiry.
    #[error("Survey {0} is closed")]
    SurveyClosed(SurveyId),
    /// The voter already has a ballot in this survey.
    #[error("Already voted in survey {0}")]
    AlreadyVoted(SurveyId),
    /// The voter's stake is below the minimum.
    #[error("Insufficient stake. Required: {required}, Have: {have}")]
    InsufficientStake {
        /// The minimum stake.
        required: u128,
        /// The voter's current stake.
        have: u128,
    },
    /// The voter is already bound to the maximum number of open surveys.
    #[error("Participation limit of {0} open surveys reached")]
    ParticipationLimitReached(u32),
    /// None of the close conditions hold for the caller.
    #[error("Survey {0} cannot be closed yet")]
    CannotCloseYet(SurveyId),
    /// The caller may not read the results of a private survey.
    #[error("Not authorized")]
    NotAuthorized,
    /// The unstake amount exceeds the locked stake.
    #[error("Insufficient balance. Requested: {requested}, Available: {available}")]
    InsufficientBalance {
        /// The amount requested.
        requested: u128,
        /// The amount available.
        available: u128,
    },
    /// The unstake would drop below the minimum while participations are active.
    #[error("Stake is locked by {0} active participations")]
    StakeLocked(u32),
    /// There is no pending reward for this survey.
    #[error("Nothing to withdraw for survey {0}")]
    NothingToWithdraw(SurveyId),
    /// The recipient rejected the outbound transfer.
    #[error("Outbound transfer failed: {0}")]
    TransferFailed(String),
}

impl ErrorCode for SurveyError {
    fn code(&self) -> &'static str {
        match self {
            Self::SurveyNotFound(_) => "SURVEY_NOT_FOUND",
            Self::InvalidSurvey(_) => "SURVEY_INVALID",
            Self::InvalidAmount => "SURVEY_INVALID_AMOUNT",
            Self::InvalidOption { .. } => "SURVEY_INVALID_OPTION",
            Self::SurveyClosed(_) => "SURVEY_CLOSED",
            Self::AlreadyVoted(_) => "SURVEY_ALREADY_VOTED",
            Self::InsufficientStake { .. } => "SURVEY_INSUFFICIENT_STAKE",
            Self::ParticipationLimitReached(_) => "SURVEY_PARTICIPATION_LIMIT_REACHED",
            Self::CannotCloseYet(_) => "SURVEY_CANNOT_CLOSE_YET",
            Self::NotAuthorized => "SURVEY_NOT_AUTHORIZED",
            Self::InsufficientBalance { .. } => "SURVEY_INSUFFICIENT_BALANCE",
            Self::StakeLocked(_) => "SURVEY_STAKE_LOCKED",
            Self::NothingToWithdraw(_) => "SURVEY_NOTHING_TO_WITHDRAW",
            Self::TransferFailed(_) => "SURVEY_TRANSFER_FAILED",
        }
    }
}

/// The error returned by every state-changing service call.
#[derive(Error, Debug)]
pub enum TransactionError {
    /// An error occurred during serialization.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// An error occurred during deserialization.
    #[error("Deserialization error: {0}")]
    Deserialization(String),
    /// An error originating from the survey service.
    #[error("Survey error: {0}")]
    Survey(#[from] SurveyError),
    /// An error originating from the name registry.
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
    /// An error originating from the state backend.
    #[error("State error: {0}")]
    State(#[from] StateError),
    /// An amount computation overflowed.
    #[error("Balance overflow")]
    BalanceOverflow,
    /// The requested method or collaborator is not available.
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

impl TransactionError {
    /// Returns the inner survey error, if this is one.
    pub fn as_survey(&self) -> Option<&SurveyError> {
        match self {
            Self::Survey(e) => Some(e),
            _ => None,
        }
    }
}

impl ErrorCode for TransactionError {
    fn code(&self) -> &'static str {
        match self {
            Self::Serialization(_) => "TX_SERIALIZATION_ERROR",
            Self::Deserialization(_) => "TX_DESERIALIZATION_ERROR",
            Self::Survey(e) => e.code(),
            Self::Registry(e) => e.code(),
            Self::State(e) => e.code(),
            Self::BalanceOverflow => "TX_BALANCE_OVERFLOW",
            Self::Unsupported(_) => "TX_UNSUPPORTED",
        }
    }
}

impl From<parity_scale_codec::Error> for TransactionError {
    fn from(e: parity_scale_codec::Error) -> Self {
        TransactionError::State(StateError::Decode(e.to_string()))
    }
}
