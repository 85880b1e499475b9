// Path: crates/services/src/survey/stake.rs
//! The stake ledger: locking and returning participant collateral.

use super::records;
use super::SurveyService;
use canvass_api::state::StateAccess;
use canvass_api::transaction::context::TxContext;
use canvass_api::transaction::execute_atomic;
use canvass_types::app::{AccountId, Balance, SurveyEvent};
use canvass_types::error::{SurveyError, TransactionError};
use canvass_types::prelude::BalanceExt;

impl SurveyService {
    pub(super) fn do_stake(
        &self,
        state: &mut dyn StateAccess,
        ctx: &TxContext,
        amount: Balance,
        events: &mut Vec<SurveyEvent>,
    ) -> Result<Balance, TransactionError> {
        if amount == 0 {
            return Err(SurveyError::InvalidAmount.into());
        }
        let account = ctx.signer_account_id;
        let mut record = records::load_participant(state, &account)?;
        record.stake = record.stake.credit(amount)?;
        records::save_participant(state, &account, &record)?;

        let custody = records::load_custody(state)?.credit(amount)?;
        records::save_custody(state, custody)?;

        log::info!(
            "[Survey] {} staked {} (total {})",
            account.short(),
            amount,
            record.stake
        );
        events.push(SurveyEvent::Staked {
            account,
            amount,
            new_stake: record.stake,
        });
        Ok(record.stake)
    }

    pub(super) fn do_unstake(
        &self,
        state: &mut dyn StateAccess,
        ctx: &TxContext,
        amount: Balance,
        events: &mut Vec<SurveyEvent>,
    ) -> Result<Balance, TransactionError> {
        if amount == 0 {
            return Err(SurveyError::InvalidAmount.into());
        }
        let account = ctx.signer_account_id;
        let mut record = records::load_participant(state, &account)?;
        if amount > record.stake {
            return Err(SurveyError::InsufficientBalance {
                requested: amount,
                available: record.stake,
            }
            .into());
        }
        let remaining = record.stake - amount;
        if record.is_participating() && remaining < self.params.min_stake {
            return Err(SurveyError::StakeLocked(record.active_participations).into());
        }

        // Under the shared pool, withdrawn rewards come out of custody too.
        let custody = records::load_custody(state)?;
        if custody < amount {
            return Err(SurveyError::TransferFailed(format!(
                "custody holds {} but {} was requested",
                custody, amount
            ))
            .into());
        }

        // Effects first: a re-entrant call from the recipient sees the reduced stake.
        record.stake = remaining;
        records::save_participant(state, &account, &record)?;
        records::save_custody(state, custody - amount)?;

        self.send_value(state, ctx, &account, amount, "unstake")?;

        log::info!(
            "[Survey] {} unstaked {} (remaining {})",
            account.short(),
            amount,
            remaining
        );
        events.push(SurveyEvent::Unstaked {
            account,
            amount,
            new_stake: remaining,
        });
        Ok(remaining)
    }

    /// Issues an outbound transfer inside its own child overlay. Whatever the recipient
    /// wrote is kept only if it accepts the value.
    pub(super) fn send_value(
        &self,
        state: &mut dyn StateAccess,
        ctx: &TxContext,
        to: &AccountId,
        amount: Balance,
        kind: &'static str,
    ) -> Result<(), SurveyError> {
        execute_atomic(state, |child| ctx.transfers.transfer(child, ctx, to, amount)).map_err(
            |e: TransactionError| {
                log::warn!(
                    "[Survey] {} transfer of {} to {} rejected: {}",
                    kind,
                    amount,
                    to.short(),
                    e
                );
                canvass_telemetry::survey_metrics().inc_transfers_rejected(kind);
                SurveyError::TransferFailed(e.to_string())
            },
        )
    }
}
