// Path: crates/services/src/survey/lifecycle.rs
//! The single `Open -> Closed` transition and the reward distribution it triggers.

use super::records;
use super::rewards;
use super::SurveyService;
use canvass_api::state::StateAccess;
use canvass_api::transaction::context::TxContext;
use canvass_types::app::{CloseTrigger, Survey, SurveyEvent, SurveyId};
use canvass_types::error::{StateError, SurveyError, TransactionError};
use canvass_types::prelude::{BalanceExt, OptionExt};
use canvass_types::service_configs::RewardPoolScope;

impl SurveyService {
    pub(super) fn do_close_survey(
        &self,
        state: &mut dyn StateAccess,
        ctx: &TxContext,
        survey_id: SurveyId,
        events: &mut Vec<SurveyEvent>,
    ) -> Result<bool, TransactionError> {
        let survey = records::load_survey(state, survey_id)?;
        if !survey.is_open {
            log::debug!("[Survey] Survey {} is already closed", survey_id);
            return Ok(false);
        }
        let trigger = if survey.quota_reached() {
            CloseTrigger::QuotaReached
        } else if survey.is_expired(ctx.block_height) {
            CloseTrigger::Expired
        } else if survey.owner == ctx.signer_account_id {
            CloseTrigger::Owner
        } else {
            return Err(SurveyError::CannotCloseYet(survey_id).into());
        };
        self.finalize(state, survey, trigger, events)?;
        Ok(true)
    }

    /// Closes `survey`, releases every participant and credits the reward split.
    /// Must run at most once per survey; callers check `is_open` first.
    pub(super) fn finalize(
        &self,
        state: &mut dyn StateAccess,
        mut survey: Survey,
        trigger: CloseTrigger,
        events: &mut Vec<SurveyEvent>,
    ) -> Result<(), TransactionError> {
        survey.is_open = false;

        let mut participants = Vec::with_capacity(survey.participants.len());
        for account in &survey.participants {
            let mut record = records::load_participant(state, account)?;
            record.release_participation();
            records::save_participant(state, account, &record)?;

            let ballot = records::load_ballot(state, survey.id, account)?
                .required(StateError::KeyNotFound)?;
            participants.push((*account, ballot.recency_bonus));
        }

        let pool = match self.params.reward_pool_scope {
            RewardPoolScope::Shared => records::load_custody(state)?,
            RewardPoolScope::PerSurvey => survey.escrow,
        };
        let split = rewards::split(pool, &participants, self.params.bonus_percent)?;

        for (account, amount) in &split.credits {
            if *amount == 0 {
                continue;
            }
            let claim = records::load_reward(state, survey.id, account)?.credit(*amount)?;
            records::save_reward(state, survey.id, account, claim)?;
        }
        if self.params.reward_pool_scope == RewardPoolScope::PerSurvey {
            survey.escrow = survey.escrow.debit(split.total)?;
        }
        records::save_survey(state, &survey)?;

        log::info!(
            "[Survey] Closed survey {} ({}): {} participants, pool {}, distributed {} (base {}, bonus {})",
            survey.id,
            trigger.as_str(),
            participants.len(),
            pool,
            split.total,
            split.base,
            split.bonus_per_eligible
        );
        events.push(SurveyEvent::SurveyClosed {
            survey_id: survey.id,
            trigger,
            distributed: split.total,
        });
        events.extend(
            split
                .credits
                .into_iter()
                .filter(|(_, amount)| *amount > 0)
                .map(|(account, amount)| SurveyEvent::RewardCredited {
                    survey_id: survey.id,
                    account,
                    amount,
                }),
        );
        Ok(())
    }
}
