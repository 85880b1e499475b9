// Path: crates/services/src/survey/registry.rs
//! The survey registry: creation, ballots and tallies.

use super::records;
use super::{CreateSurveyParams, SurveyService};
use canvass_api::state::StateAccess;
use canvass_api::transaction::context::TxContext;
use canvass_types::app::{AccountId, Survey, SurveyEvent, SurveyId};
use canvass_types::error::{RegistryError, StateError, SurveyError, TransactionError};
use canvass_types::prelude::BalanceExt;
use canvass_types::service_configs::RewardPoolScope;
use canvass_types::{MAX_DESCRIPTION_BYTES, MAX_SURVEY_OPTIONS};

fn invalid(reason: &str) -> TransactionError {
    SurveyError::InvalidSurvey(reason.to_string()).into()
}

impl SurveyService {
    pub(super) fn do_create_survey(
        &self,
        state: &mut dyn StateAccess,
        ctx: &TxContext,
        params: CreateSurveyParams,
        events: &mut Vec<SurveyEvent>,
    ) -> Result<SurveyId, TransactionError> {
        let owner = ctx.signer_account_id;
        let registrations = ctx
            .services
            .registration_view()
            .ok_or_else(|| TransactionError::Unsupported("No registration service".into()))?;
        if !registrations.is_registered(state, &owner)? {
            return Err(RegistryError::NotRegistered.into());
        }

        if params.options.is_empty() {
            return Err(invalid("a survey needs at least one option"));
        }
        if params.options.len() > MAX_SURVEY_OPTIONS {
            return Err(invalid("too many options"));
        }
        if params.description.len() > MAX_DESCRIPTION_BYTES {
            return Err(invalid("description too long"));
        }
        if params.quota == 0 {
            return Err(invalid("quota must be greater than zero"));
        }
        let expiry_height = ctx
            .block_height
            .checked_add(params.duration_blocks)
            .ok_or_else(|| invalid("expiry overflows"))?;

        let escrow = match self.params.reward_pool_scope {
            RewardPoolScope::PerSurvey => params.funding,
            RewardPoolScope::Shared => 0,
        };
        if params.funding > 0 {
            let custody = records::load_custody(state)?.credit(params.funding)?;
            records::save_custody(state, custody)?;
        }

        let id = records::allocate_survey_id(state)?;
        let option_count = params.options.len() as u32;
        let survey = Survey {
            id,
            description: params.description,
            tally: vec![0; params.options.len()],
            options: params.options,
            owner,
            quota: params.quota,
            response_count: 0,
            created_at_height: ctx.block_height,
            expiry_height,
            is_open: true,
            results_public: params.results_public,
            participants: Vec::new(),
            escrow,
        };
        records::save_survey(state, &survey)?;

        log::info!(
            "[Survey] {} created survey {} ({} options, quota {}, expires at {})",
            owner.short(),
            id,
            option_count,
            survey.quota,
            expiry_height
        );
        events.push(SurveyEvent::SurveyCreated {
            survey_id: id,
            owner,
            option_count,
            quota: survey.quota,
            expiry_height,
        });
        Ok(id)
    }

    /// Applies an admitted vote to the in-memory record. Returns true once the quota is reached.
    pub(super) fn record_vote(
        &self,
        survey: &mut Survey,
        option: u32,
        voter: AccountId,
    ) -> Result<bool, TransactionError> {
        let (id, count) = (survey.id, survey.options.len() as u32);
        if !survey.has_option(option) {
            return Err(SurveyError::InvalidOption {
                index: option,
                count,
            }
            .into());
        }
        let slot = survey
            .tally
            .get_mut(option as usize)
            .ok_or_else(|| {
                StateError::InvalidValue(format!(
                    "survey {} tally is shorter than its options",
                    id
                ))
            })?;
        *slot = slot.checked_add(1).ok_or(TransactionError::BalanceOverflow)?;
        survey.response_count = survey
            .response_count
            .checked_add(1)
            .ok_or(TransactionError::BalanceOverflow)?;
        survey.participants.push(voter);
        Ok(survey.quota_reached())
    }
}
