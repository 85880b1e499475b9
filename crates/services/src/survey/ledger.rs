// Path: crates/services/src/survey/ledger.rs
//! The reward ledger: per-survey claimable balances and their withdrawal.

use super::records;
use super::SurveyService;
use canvass_api::state::StateAccess;
use canvass_api::transaction::context::TxContext;
use canvass_types::app::{Balance, SurveyEvent, SurveyId};
use canvass_types::error::{SurveyError, TransactionError};
use canvass_types::prelude::BalanceExt;
use canvass_types::service_configs::TransferFailurePolicy;

/// How a withdrawal ended once its writes are committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WithdrawOutcome {
    /// The recipient accepted the value.
    Delivered(Balance),
    /// The recipient rejected the value and the claim was forfeited.
    Forfeited { amount: Balance, reason: String },
}

impl SurveyService {
    pub(super) fn do_withdraw(
        &self,
        state: &mut dyn StateAccess,
        ctx: &TxContext,
        survey_id: SurveyId,
        events: &mut Vec<SurveyEvent>,
    ) -> Result<WithdrawOutcome, TransactionError> {
        let account = ctx.signer_account_id;
        let amount = records::load_reward(state, survey_id, &account)?;
        if amount == 0 {
            return Err(SurveyError::NothingToWithdraw(survey_id).into());
        }

        // Zero the claim before paying so a re-entrant call finds nothing.
        records::save_reward(state, survey_id, &account, 0)?;
        let custody = records::load_custody(state)?;
        if custody < amount {
            return Err(SurveyError::TransferFailed(format!(
                "custody holds {} but {} is owed",
                custody, amount
            ))
            .into());
        }
        records::save_custody(state, custody - amount)?;

        match self.send_value(state, ctx, &account, amount, "reward") {
            Ok(()) => {
                log::info!(
                    "[Survey] {} withdrew {} from survey {}",
                    account.short(),
                    amount,
                    survey_id
                );
                events.push(SurveyEvent::RewardWithdrawn {
                    survey_id,
                    account,
                    amount,
                    delivered: true,
                });
                Ok(WithdrawOutcome::Delivered(amount))
            }
            Err(SurveyError::TransferFailed(reason))
                if self.params.transfer_failure_policy == TransferFailurePolicy::Forfeit =>
            {
                // The value stays with the platform; the claim does not come back.
                let custody = records::load_custody(state)?.credit(amount)?;
                records::save_custody(state, custody)?;
                events.push(SurveyEvent::RewardWithdrawn {
                    survey_id,
                    account,
                    amount,
                    delivered: false,
                });
                Ok(WithdrawOutcome::Forfeited { amount, reason })
            }
            Err(e) => Err(e.into()),
        }
    }
}
