// Path: crates/services/src/survey/mod.rs
//! The staked survey service.
//!
//! Participants lock collateral, vote at most once per survey, and share the reward pool
//! of every survey they voted in once it closes. The service is split by concern:
//!
//! - `stake`: the stake ledger (lock and return collateral).
//! - `registry`: survey creation, ballots and tallies.
//! - `gate`: admission checks and the recency-bonus window.
//! - `lifecycle`: the single `Open -> Closed` transition.
//! - `rewards`: the pure reward split.
//! - `ledger`: per-survey claimable balances and withdrawal.
//!
//! Every state-changing entry point runs inside `execute_atomic`: a failed call leaves
//! state untouched and emits no events.

use canvass_api::services::BlockchainService;
use canvass_api::state::StateAccess;
use canvass_api::transaction::context::TxContext;
use canvass_api::transaction::execute_atomic;
use canvass_telemetry::time::Timer;
use canvass_telemetry::{error_metrics, service_metrics, survey_metrics};
use canvass_types::app::{AccountId, Balance, Receipt, Survey, SurveyEvent, SurveyId};
use canvass_types::codec;
use canvass_types::error::{ErrorCode, SurveyError, TransactionError};
use canvass_types::service_configs::{Capabilities, SurveyParams, UNIT};
use parity_scale_codec::{Decode, Encode};
use std::any::Any;

mod gate;
mod ledger;
mod lifecycle;
mod records;
mod registry;
pub mod rewards;
mod stake;

pub use gate::{recency_check, RecencyWindow};
pub use ledger::WithdrawOutcome;

// --- Service Method Parameter Structs (The Service's Public ABI) ---

#[derive(Encode, Decode, Debug, Clone)]
pub struct StakeParams {
    pub amount: Balance,
}

#[derive(Encode, Decode, Debug, Clone)]
pub struct UnstakeParams {
    pub amount: Balance,
}

#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct CreateSurveyParams {
    pub description: String,
    pub options: Vec<String>,
    /// Lifetime in blocks, added to the creation height to form the expiry.
    pub duration_blocks: u64,
    pub quota: u32,
    pub results_public: bool,
    /// Reward funding deposited with the survey. Goes into the survey's escrow under the
    /// per-survey pool scope, and into the shared pool otherwise.
    pub funding: Balance,
}

#[derive(Encode, Decode, Debug, Clone)]
pub struct VoteParams {
    pub survey_id: SurveyId,
    pub option: u32,
}

#[derive(Encode, Decode, Debug, Clone)]
pub struct SurveyIdParams {
    pub survey_id: SurveyId,
}

#[derive(Encode, Decode, Debug, Clone)]
pub struct AccountParams {
    pub account: AccountId,
}

#[derive(Encode, Decode, Debug, Clone)]
pub struct ClaimParams {
    pub survey_id: SurveyId,
    pub account: AccountId,
}

// --- Survey Service ---

#[derive(Default, Debug)]
pub struct SurveyService {
    params: SurveyParams,
}

impl SurveyService {
    pub fn new(params: SurveyParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &SurveyParams {
        &self.params
    }

    /// Runs one state-changing operation atomically and wraps its result in a `Receipt`.
    /// Events and metrics are only published once the writes have been committed.
    fn run<T>(
        &self,
        op: &'static str,
        state: &mut dyn StateAccess,
        f: impl FnOnce(&mut dyn StateAccess, &mut Vec<SurveyEvent>) -> Result<T, TransactionError>,
    ) -> Result<Receipt<T>, TransactionError> {
        let mut events = Vec::new();
        match execute_atomic(state, |s| f(s, &mut events)) {
            Ok(value) => {
                for event in &events {
                    log::debug!("[Survey] {} emitted {:?}", op, event);
                    record_event_metrics(event);
                }
                if let Ok(custody) = records::load_custody(state) {
                    survey_metrics().set_custody_units(custody as f64 / UNIT as f64);
                }
                Ok(Receipt::with_events(value, events))
            }
            Err(e) => {
                log::debug!("[Survey] {} rejected: {}", op, e);
                error_metrics().inc_error("survey", e.code());
                Err(e)
            }
        }
    }

    // --- Typed entry points ---

    /// Locks `amount` of collateral for the caller. Returns the new stake.
    pub fn stake(
        &self,
        state: &mut dyn StateAccess,
        ctx: &TxContext,
        amount: Balance,
    ) -> Result<Receipt<Balance>, TransactionError> {
        self.run("stake", state, |s, ev| self.do_stake(s, ctx, amount, ev))
    }

    /// Returns `amount` of collateral to the caller. Returns the remaining stake.
    pub fn unstake(
        &self,
        state: &mut dyn StateAccess,
        ctx: &TxContext,
        amount: Balance,
    ) -> Result<Receipt<Balance>, TransactionError> {
        self.run("unstake", state, |s, ev| self.do_unstake(s, ctx, amount, ev))
    }

    /// Creates a survey owned by the caller. Returns its id.
    pub fn create_survey(
        &self,
        state: &mut dyn StateAccess,
        ctx: &TxContext,
        params: CreateSurveyParams,
    ) -> Result<Receipt<SurveyId>, TransactionError> {
        self.run("create_survey", state, |s, ev| {
            self.do_create_survey(s, ctx, params, ev)
        })
    }

    /// Casts the caller's vote. Returns true if the vote closed the survey.
    pub fn vote(
        &self,
        state: &mut dyn StateAccess,
        ctx: &TxContext,
        survey_id: SurveyId,
        option: u32,
    ) -> Result<Receipt<bool>, TransactionError> {
        self.run("vote", state, |s, ev| {
            self.do_vote(s, ctx, survey_id, option, ev)
        })
    }

    /// Closes a survey if any close condition holds for the caller.
    /// Returns false if the survey was already closed.
    pub fn close_survey(
        &self,
        state: &mut dyn StateAccess,
        ctx: &TxContext,
        survey_id: SurveyId,
    ) -> Result<Receipt<bool>, TransactionError> {
        self.run("close_survey", state, |s, ev| {
            self.do_close_survey(s, ctx, survey_id, ev)
        })
    }

    /// Pays out the caller's reward for a survey. Returns the amount delivered.
    ///
    /// If the recipient rejects the transfer under the forfeit policy, the zeroed claim
    /// is committed and `TransferFailed` is still returned.
    pub fn withdraw_reward(
        &self,
        state: &mut dyn StateAccess,
        ctx: &TxContext,
        survey_id: SurveyId,
    ) -> Result<Receipt<Balance>, TransactionError> {
        let receipt = self.run("withdraw_reward", state, |s, ev| {
            self.do_withdraw(s, ctx, survey_id, ev)
        })?;
        match receipt.value {
            WithdrawOutcome::Delivered(amount) => Ok(Receipt::with_events(amount, receipt.events)),
            WithdrawOutcome::Forfeited { amount, reason } => {
                log::warn!(
                    "[Survey] Reward of {} on survey {} forfeited by {}: {}",
                    amount,
                    survey_id,
                    ctx.signer_account_id.short(),
                    reason
                );
                Err(SurveyError::TransferFailed(reason).into())
            }
        }
    }

    // --- Read views ---

    /// Returns the dense tally. Private results are readable only by the owner.
    pub fn view_results(
        &self,
        state: &dyn StateAccess,
        caller: &AccountId,
        survey_id: SurveyId,
    ) -> Result<Vec<u64>, TransactionError> {
        let survey = records::load_survey(state, survey_id)?;
        if !survey.results_public && survey.owner != *caller {
            return Err(SurveyError::NotAuthorized.into());
        }
        Ok(survey.tally)
    }

    /// Returns every survey id ever created, in creation order.
    pub fn view_survey_ids(&self, state: &dyn StateAccess) -> Result<Vec<SurveyId>, TransactionError> {
        Ok((0..records::survey_count(state)?).collect())
    }

    /// Returns the full survey record.
    pub fn survey(&self, state: &dyn StateAccess, survey_id: SurveyId) -> Result<Survey, TransactionError> {
        records::load_survey(state, survey_id)
    }

    pub fn stake_of(&self, state: &dyn StateAccess, account: &AccountId) -> Result<Balance, TransactionError> {
        Ok(records::load_participant(state, account)?.stake)
    }

    pub fn active_participations(
        &self,
        state: &dyn StateAccess,
        account: &AccountId,
    ) -> Result<u32, TransactionError> {
        Ok(records::load_participant(state, account)?.active_participations)
    }

    pub fn claimable(
        &self,
        state: &dyn StateAccess,
        survey_id: SurveyId,
        account: &AccountId,
    ) -> Result<Balance, TransactionError> {
        Ok(records::load_reward(state, survey_id, account)?)
    }

    /// The total collateral value held by the platform.
    pub fn custody(&self, state: &dyn StateAccess) -> Result<Balance, TransactionError> {
        Ok(records::load_custody(state)?)
    }

    fn dispatch(
        &self,
        state: &mut dyn StateAccess,
        method: &str,
        params: &[u8],
        ctx: &TxContext<'_>,
    ) -> Result<Vec<u8>, TransactionError> {
        match method {
            "stake@v1" => {
                let p: StakeParams = decode_params(params)?;
                encode_return(&self.stake(state, ctx, p.amount)?)
            }
            "unstake@v1" => {
                let p: UnstakeParams = decode_params(params)?;
                encode_return(&self.unstake(state, ctx, p.amount)?)
            }
            "create_survey@v1" => {
                let p: CreateSurveyParams = decode_params(params)?;
                encode_return(&self.create_survey(state, ctx, p)?)
            }
            "vote@v1" => {
                let p: VoteParams = decode_params(params)?;
                encode_return(&self.vote(state, ctx, p.survey_id, p.option)?)
            }
            "close_survey@v1" => {
                let p: SurveyIdParams = decode_params(params)?;
                encode_return(&self.close_survey(state, ctx, p.survey_id)?)
            }
            "withdraw_reward@v1" => {
                let p: SurveyIdParams = decode_params(params)?;
                encode_return(&self.withdraw_reward(state, ctx, p.survey_id)?)
            }
            "view_results@v1" => {
                let p: SurveyIdParams = decode_params(params)?;
                encode_return(&self.view_results(state, &ctx.signer_account_id, p.survey_id)?)
            }
            "view_survey_ids@v1" => encode_return(&self.view_survey_ids(state)?),
            "survey@v1" => {
                let p: SurveyIdParams = decode_params(params)?;
                encode_return(&self.survey(state, p.survey_id)?)
            }
            "stake_of@v1" => {
                let p: AccountParams = decode_params(params)?;
                encode_return(&self.stake_of(state, &p.account)?)
            }
            "active_participations@v1" => {
                let p: AccountParams = decode_params(params)?;
                encode_return(&self.active_participations(state, &p.account)?)
            }
            "claimable@v1" => {
                let p: ClaimParams = decode_params(params)?;
                encode_return(&self.claimable(state, p.survey_id, &p.account)?)
            }
            "custody@v1" => encode_return(&self.custody(state)?),
            _ => Err(TransactionError::Unsupported(format!(
                "Survey service does not support method '{}'",
                method
            ))),
        }
    }
}

impl BlockchainService for SurveyService {
    fn id(&self) -> &str {
        "survey"
    }

    fn abi_version(&self) -> u32 {
        1
    }

    fn state_schema(&self) -> &str {
        "v1"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::VALUE_TRANSFER
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn handle_service_call(
        &self,
        state: &mut dyn StateAccess,
        method: &str,
        params: &[u8],
        ctx: &TxContext<'_>,
    ) -> Result<Vec<u8>, TransactionError> {
        let _span = tracing::debug_span!(
            "service_call",
            service = "survey",
            method,
            signer = %ctx.signer_account_id.short(),
            height = ctx.block_height
        )
        .entered();
        let _timer = Timer::new(service_metrics(), "survey", method);
        let result = self.dispatch(state, method, params, ctx);
        if let Err(e) = &result {
            service_metrics().inc_dispatch_error("survey", method, e.code());
            tracing::debug!(code = e.code(), error = %e, "service call failed");
        }
        result
    }
}

pub(crate) fn decode_params<T: Decode>(params: &[u8]) -> Result<T, TransactionError> {
    codec::from_bytes_canonical(params).map_err(TransactionError::Deserialization)
}

pub(crate) fn encode_return<T: Encode>(value: &T) -> Result<Vec<u8>, TransactionError> {
    codec::to_bytes_canonical(value).map_err(TransactionError::Serialization)
}

fn record_event_metrics(event: &SurveyEvent) {
    let sink = survey_metrics();
    match event {
        SurveyEvent::SurveyCreated { .. } => sink.inc_surveys_created(),
        SurveyEvent::VoteCast { recency_bonus, .. } => sink.inc_votes_cast(*recency_bonus),
        SurveyEvent::SurveyClosed { trigger, .. } => sink.inc_surveys_closed(trigger.as_str()),
        SurveyEvent::RewardCredited { .. } => sink.inc_rewards_credited(1),
        SurveyEvent::RewardWithdrawn { delivered, .. } => {
            sink.inc_rewards_withdrawn(if *delivered { "delivered" } else { "forfeited" })
        }
        SurveyEvent::Staked { .. } | SurveyEvent::Unstaked { .. } => {}
    }
}
