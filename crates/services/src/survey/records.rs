// Path: crates/services/src/survey/records.rs
//! Typed reads and writes of the survey service's state entries.

use canvass_api::state::{read_u128, read_u64, read_value, write_value, StateAccess};
use canvass_types::app::{AccountId, Balance, Ballot, ParticipantRecord, Survey, SurveyId};
use canvass_types::error::{StateError, SurveyError, TransactionError};
use canvass_types::keys::{
    ballot_key, participant_key, reward_key, survey_key, SURVEY_CUSTODY_KEY, SURVEY_NEXT_ID_KEY,
};
use canvass_types::prelude::OptionExt;

pub(crate) fn load_survey(
    state: &dyn StateAccess,
    id: SurveyId,
) -> Result<Survey, TransactionError> {
    Ok(read_value(state, &survey_key(id))?.required(SurveyError::SurveyNotFound(id))?)
}

pub(crate) fn save_survey(state: &mut dyn StateAccess, survey: &Survey) -> Result<(), StateError> {
    write_value(state, &survey_key(survey.id), survey)
}

/// Allocates the next sequential survey id, starting at zero.
pub(crate) fn allocate_survey_id(state: &mut dyn StateAccess) -> Result<SurveyId, TransactionError> {
    let id = read_u64(state, SURVEY_NEXT_ID_KEY)?;
    let next = id.checked_add(1).ok_or(TransactionError::BalanceOverflow)?;
    state.insert(SURVEY_NEXT_ID_KEY, &next.to_le_bytes())?;
    Ok(id)
}

/// The number of surveys ever created. Ids are `0..count`.
pub(crate) fn survey_count(state: &dyn StateAccess) -> Result<u64, StateError> {
    read_u64(state, SURVEY_NEXT_ID_KEY)
}

pub(crate) fn load_ballot(
    state: &dyn StateAccess,
    id: SurveyId,
    voter: &AccountId,
) -> Result<Option<Ballot>, StateError> {
    read_value(state, &ballot_key(id, voter))
}

pub(crate) fn save_ballot(
    state: &mut dyn StateAccess,
    id: SurveyId,
    voter: &AccountId,
    ballot: &Ballot,
) -> Result<(), StateError> {
    write_value(state, &ballot_key(id, voter), ballot)
}

/// An identity that has never interacted with the platform reads as the default record.
pub(crate) fn load_participant(
    state: &dyn StateAccess,
    account: &AccountId,
) -> Result<ParticipantRecord, StateError> {
    Ok(read_value(state, &participant_key(account))?.unwrap_or_default())
}

pub(crate) fn save_participant(
    state: &mut dyn StateAccess,
    account: &AccountId,
    record: &ParticipantRecord,
) -> Result<(), StateError> {
    write_value(state, &participant_key(account), record)
}

pub(crate) fn load_reward(
    state: &dyn StateAccess,
    id: SurveyId,
    account: &AccountId,
) -> Result<Balance, StateError> {
    read_u128(state, &reward_key(id, account))
}

/// Writes a claimable balance. A zero balance removes the entry.
pub(crate) fn save_reward(
    state: &mut dyn StateAccess,
    id: SurveyId,
    account: &AccountId,
    amount: Balance,
) -> Result<(), StateError> {
    let key = reward_key(id, account);
    if amount == 0 {
        state.delete(&key)
    } else {
        state.insert(&key, &amount.to_le_bytes())
    }
}

pub(crate) fn load_custody(state: &dyn StateAccess) -> Result<Balance, StateError> {
    read_u128(state, SURVEY_CUSTODY_KEY)
}

pub(crate) fn save_custody(state: &mut dyn StateAccess, amount: Balance) -> Result<(), StateError> {
    state.insert(SURVEY_CUSTODY_KEY, &amount.to_le_bytes())
}
