// Path: crates/types/src/keys/mod.rs
//! Defines constants and builders for well-known state keys.
//!
//! Every service reads and writes through these builders so that the key layout is
//! defined in exactly one place.

use crate::app::{AccountId, SurveyId};

/// The state key for the next available survey id (u64, little-endian).
pub const SURVEY_NEXT_ID_KEY: &[u8] = b"survey::next_id";
/// The state key prefix for survey records, keyed by id.
pub const SURVEY_RECORD_PREFIX: &[u8] = b"survey::record::";
/// The state key prefix for ballots, keyed by survey id and voter.
pub const SURVEY_BALLOT_PREFIX: &[u8] = b"survey::ballot::";
/// The state key prefix for identity-keyed participant records.
pub const SURVEY_PARTICIPANT_PREFIX: &[u8] = b"survey::participant::";
/// The state key prefix for claimable rewards, keyed by survey id and account.
pub const SURVEY_REWARD_PREFIX: &[u8] = b"survey::reward::";
/// The state key for the total collateral value held by the platform (u128, little-endian).
pub const SURVEY_CUSTODY_KEY: &[u8] = b"survey::custody";

/// The state key prefix for registered names, keyed by account.
pub const REGISTRY_NAME_PREFIX: &[u8] = b"registry::name::";

/// Builds the key of a survey record.
pub fn survey_key(id: SurveyId) -> Vec<u8> {
    [SURVEY_RECORD_PREFIX, &id.to_le_bytes()].concat()
}

/// Builds the key of a voter's ballot in a survey.
pub fn ballot_key(id: SurveyId, voter: &AccountId) -> Vec<u8> {
    [SURVEY_BALLOT_PREFIX, &id.to_le_bytes(), b"::", voter.as_ref()].concat()
}

/// Builds the key of an identity's participant record.
pub fn participant_key(account: &AccountId) -> Vec<u8> {
    [SURVEY_PARTICIPANT_PREFIX, account.as_ref()].concat()
}

/// Builds the key of an account's claimable reward for a survey.
pub fn reward_key(id: SurveyId, account: &AccountId) -> Vec<u8> {
    [SURVEY_REWARD_PREFIX, &id.to_le_bytes(), b"::", account.as_ref()].concat()
}

/// Builds the key of an account's registered name.
pub fn registry_name_key(account: &AccountId) -> Vec<u8> {
    [REGISTRY_NAME_PREFIX, account.as_ref()].concat()
}
