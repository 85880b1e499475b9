// Path: crates/services/tests/survey_scenarios.rs
//! End-to-end scenarios driven through the services' `handle_service_call` ABI.

use anyhow::Result;
use canvass_api::services::access::ServiceDirectory;
use canvass_api::services::BlockchainService;
use canvass_api::state::{InMemoryState, StateAccess};
use canvass_api::transaction::context::TxContext;
use canvass_api::transfer::{AcceptAllTransfers, ValueTransfer};
use canvass_services::registry::{NameRegistry, RegisterParams};
use canvass_services::survey::{
    AccountParams, ClaimParams, CreateSurveyParams, StakeParams, SurveyIdParams, SurveyService,
    UnstakeParams, VoteParams,
};
use canvass_types::app::{AccountId, Balance, CloseTrigger, Receipt, Survey, SurveyEvent, SurveyId};
use canvass_types::codec;
use canvass_types::error::{ErrorCode, TransactionError};
use canvass_types::service_configs::{SurveyParams, UNIT};
use parity_scale_codec::{Decode, Encode};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

const DAY: u64 = 86_400;

fn account(b: u8) -> AccountId {
    AccountId([b; 32])
}

struct Platform {
    state: InMemoryState,
    survey: Arc<SurveyService>,
    registry: Arc<NameRegistry>,
    services: ServiceDirectory,
    height: u64,
    timestamp: u64,
}

impl Platform {
    fn new(params: SurveyParams) -> Self {
        let _ = canvass_telemetry::init::init_tracing();
        let survey = Arc::new(SurveyService::new(params));
        let registry = Arc::new(NameRegistry::default());
        let services = ServiceDirectory::new()
            .with_service(survey.clone())
            .with_service(registry.clone());
        Self {
            state: InMemoryState::new(),
            survey,
            registry,
            services,
            height: 100,
            timestamp: 1_700_000_000,
        }
    }

    fn call_with<P: Encode, R: Decode>(
        &mut self,
        transfers: &dyn ValueTransfer,
        service_id: &str,
        signer: AccountId,
        method: &str,
        params: &P,
    ) -> Result<R, TransactionError> {
        let ctx = TxContext {
            block_height: self.height,
            block_timestamp: self.timestamp,
            signer_account_id: signer,
            services: &self.services,
            transfers,
        };
        let service = self
            .services
            .by_id(service_id)
            .ok_or_else(|| TransactionError::Unsupported(service_id.to_string()))?;
        let bytes = codec::to_bytes_canonical(params).map_err(TransactionError::Serialization)?;
        let out = service.handle_service_call(&mut self.state, method, &bytes, &ctx)?;
        codec::from_bytes_canonical(&out).map_err(TransactionError::Deserialization)
    }

    fn call<P: Encode, R: Decode>(
        &mut self,
        signer: AccountId,
        method: &str,
        params: &P,
    ) -> Result<R, TransactionError> {
        self.call_with(&AcceptAllTransfers, "survey", signer, method, params)
    }

    fn register(&mut self, who: AccountId) -> Result<(), TransactionError> {
        let params = RegisterParams {
            name: format!("user-{}", who.0[0]),
        };
        let ctx = TxContext {
            block_height: self.height,
            block_timestamp: self.timestamp,
            signer_account_id: who,
            services: &self.services,
            transfers: &AcceptAllTransfers,
        };
        let bytes = codec::to_bytes_canonical(&params).map_err(TransactionError::Serialization)?;
        self.registry
            .handle_service_call(&mut self.state, "register@v1", &bytes, &ctx)
            .map(|_| ())
    }

    fn stake(&mut self, who: AccountId, amount: Balance) -> Result<Balance, TransactionError> {
        let r: Receipt<Balance> = self.call(who, "stake@v1", &StakeParams { amount })?;
        Ok(r.value)
    }

    fn create(&mut self, owner: AccountId, quota: u32) -> Result<SurveyId, TransactionError> {
        let params = CreateSurveyParams {
            description: "Best editor?".into(),
            options: vec!["vim".into(), "emacs".into(), "other".into()],
            duration_blocks: 1_000,
            quota,
            results_public: true,
            funding: 0,
        };
        let r: Receipt<SurveyId> = self.call(owner, "create_survey@v1", &params)?;
        Ok(r.value)
    }

    fn vote(&mut self, who: AccountId, survey_id: SurveyId, option: u32) -> Result<Receipt<bool>, TransactionError> {
        self.call(who, "vote@v1", &VoteParams { survey_id, option })
    }

    fn close(&mut self, who: AccountId, survey_id: SurveyId) -> Result<Receipt<bool>, TransactionError> {
        self.call(who, "close_survey@v1", &SurveyIdParams { survey_id })
    }

    fn survey_record(&mut self, survey_id: SurveyId) -> Result<Survey, TransactionError> {
        self.call(account(0), "survey@v1", &SurveyIdParams { survey_id })
    }

    fn claimable(&mut self, survey_id: SurveyId, who: AccountId) -> Result<Balance, TransactionError> {
        self.call(
            account(0),
            "claimable@v1",
            &ClaimParams {
                survey_id,
                account: who,
            },
        )
    }
}

#[test]
fn test_quota_of_two_closes_on_second_vote_and_splits_evenly() -> Result<()> {
    let mut p = Platform::new(SurveyParams::default());
    let (owner, a, b) = (account(1), account(2), account(3));
    p.register(owner)?;
    p.stake(a, UNIT)?;
    p.stake(b, UNIT)?;
    let id = p.create(owner, 2)?;

    assert!(!p.vote(a, id, 0)?.value);
    let receipt = p.vote(b, id, 2)?;
    assert!(receipt.value);
    assert!(receipt.events.iter().any(|e| matches!(
        e,
        SurveyEvent::SurveyClosed {
            trigger: CloseTrigger::QuotaReached,
            ..
        }
    )));

    // First votes never carry the recency bonus.
    let pool = 2 * UNIT;
    assert_eq!(p.claimable(id, a)?, pool / 2);
    assert_eq!(p.claimable(id, b)?, pool / 2);

    let survey = p.survey_record(id)?;
    assert!(!survey.is_open);
    assert_eq!(survey.tally, vec![1, 0, 1]);
    Ok(())
}

#[test]
fn test_tallies_match_responses_and_participants() -> Result<()> {
    let mut p = Platform::new(SurveyParams::default());
    let owner = account(1);
    p.register(owner)?;
    let id = p.create(owner, 10)?;
    for (i, who) in (2..8u8).enumerate() {
        p.stake(account(who), UNIT)?;
        p.vote(account(who), id, (i % 3) as u32)?;
    }

    let survey = p.survey_record(id)?;
    assert_eq!(survey.tally.iter().sum::<u64>(), u64::from(survey.response_count));
    assert_eq!(survey.participants.len(), survey.response_count as usize);
    assert!(survey.response_count <= survey.quota);

    let results: Vec<u64> = p.call(owner, "view_results@v1", &SurveyIdParams { survey_id: id })?;
    assert_eq!(results, vec![2, 2, 2]);
    let ids: Vec<SurveyId> = p.call(owner, "view_survey_ids@v1", &())?;
    assert_eq!(ids, vec![id]);
    Ok(())
}

#[test]
fn test_closed_surveys_stay_closed() -> Result<()> {
    let mut p = Platform::new(SurveyParams::default());
    let (owner, voter) = (account(1), account(2));
    p.register(owner)?;
    p.stake(voter, UNIT)?;
    let id = p.create(owner, 5)?;

    let err = p.close(voter, id).unwrap_err();
    assert_eq!(err.code(), "SURVEY_CANNOT_CLOSE_YET");
    assert!(p.close(owner, id)?.value);
    assert!(!p.close(owner, id)?.value);

    let err = p.vote(voter, id, 0).unwrap_err();
    assert_eq!(err.code(), "SURVEY_CLOSED");
    assert!(!p.survey_record(id)?.is_open);
    Ok(())
}

#[test]
fn test_stake_is_locked_while_participating() -> Result<()> {
    let mut p = Platform::new(SurveyParams::default());
    let (owner, voter) = (account(1), account(2));
    p.register(owner)?;
    p.stake(voter, UNIT)?;
    let id = p.create(owner, 5)?;
    p.vote(voter, id, 1)?;

    let err = p
        .call::<_, Receipt<Balance>>(voter, "unstake@v1", &UnstakeParams { amount: 1 })
        .unwrap_err();
    assert_eq!(err.code(), "SURVEY_STAKE_LOCKED");
    let active: u32 = p.call(voter, "active_participations@v1", &AccountParams { account: voter })?;
    assert_eq!(active, 1);

    p.close(owner, id)?;
    let r: Receipt<Balance> = p.call(voter, "unstake@v1", &UnstakeParams { amount: UNIT })?;
    assert_eq!(r.value, 0);
    let stake: Balance = p.call(voter, "stake_of@v1", &AccountParams { account: voter })?;
    assert_eq!(stake, 0);
    Ok(())
}

#[test]
fn test_recency_bonus_is_paid_from_the_remainder() -> Result<()> {
    let mut p = Platform::new(SurveyParams {
        min_stake: 100,
        ..Default::default()
    });
    let (owner, a, b, c) = (account(1), account(2), account(3), account(4));
    p.register(owner)?;
    for who in [a, b, c] {
        p.stake(who, 333)?;
    }
    // A first vote only sets the baseline for the recency window.
    let warmup = p.create(owner, 5)?;
    p.vote(a, warmup, 0)?;
    p.close(owner, warmup)?;
    assert_eq!(p.claimable(warmup, a)?, 999);

    p.timestamp += DAY;
    let id = p.create(owner, 3)?;
    // Top the shared pool up from 999 to 1_000.
    let funding = CreateSurveyParams {
        description: "top-up".into(),
        options: vec!["x".into()],
        duration_blocks: 1,
        quota: 1,
        results_public: false,
        funding: 1,
    };
    let _: Receipt<SurveyId> = p.call(owner, "create_survey@v1", &funding)?;

    let r = p.vote(a, id, 0)?;
    assert!(matches!(
        r.events.as_slice(),
        [SurveyEvent::VoteCast { recency_bonus: true, .. }]
    ));
    p.vote(b, id, 1)?;
    p.vote(c, id, 2)?;

    // base = 333, the uncapped bonus of 99 is capped to the 1 left in the pool.
    assert_eq!(p.claimable(id, a)?, 334);
    assert_eq!(p.claimable(id, b)?, 333);
    assert_eq!(p.claimable(id, c)?, 333);
    Ok(())
}

#[test]
fn test_failed_operations_leave_state_byte_identical() -> Result<()> {
    let mut p = Platform::new(SurveyParams::default());
    let (owner, voter) = (account(1), account(2));
    p.register(owner)?;
    p.stake(voter, UNIT)?;
    let id = p.create(owner, 5)?;
    p.vote(voter, id, 0)?;
    let before = p.state.clone();

    assert_eq!(p.vote(voter, id, 1).unwrap_err().code(), "SURVEY_ALREADY_VOTED");
    assert_eq!(p.vote(account(9), id, 1).unwrap_err().code(), "SURVEY_INSUFFICIENT_STAKE");
    assert_eq!(p.close(voter, id).unwrap_err().code(), "SURVEY_CANNOT_CLOSE_YET");
    let err = p
        .call::<_, Receipt<Balance>>(voter, "withdraw_reward@v1", &SurveyIdParams { survey_id: id })
        .unwrap_err();
    assert_eq!(err.code(), "SURVEY_NOTHING_TO_WITHDRAW");
    assert_eq!(p.state, before);
    Ok(())
}

#[test]
fn test_unknown_methods_and_bad_params_are_rejected() -> Result<()> {
    let mut p = Platform::new(SurveyParams::default());
    let err = p
        .call::<_, ()>(account(1), "burn@v1", &())
        .unwrap_err();
    assert!(matches!(err, TransactionError::Unsupported(_)));

    let ctx = TxContext {
        block_height: 1,
        block_timestamp: 0,
        signer_account_id: account(1),
        services: &p.services,
        transfers: &AcceptAllTransfers,
    };
    let err = p
        .survey
        .handle_service_call(&mut p.state, "vote@v1", &[1, 2, 3], &ctx)
        .unwrap_err();
    assert!(matches!(err, TransactionError::Deserialization(_)));
    Ok(())
}

enum Attack {
    Withdraw(SurveyId),
    Unstake(Balance),
}

/// A recipient that calls straight back into the survey service once while being paid.
struct Reentrant {
    survey: Arc<SurveyService>,
    attack: Attack,
    entered: AtomicBool,
    outcome: Mutex<Option<&'static str>>,
}

impl Reentrant {
    fn new(survey: Arc<SurveyService>, attack: Attack) -> Self {
        Self {
            survey,
            attack,
            entered: AtomicBool::new(false),
            outcome: Mutex::new(None),
        }
    }

    fn outcome(&self) -> Option<&'static str> {
        *self.outcome.lock().unwrap()
    }
}

impl ValueTransfer for Reentrant {
    fn transfer(
        &self,
        state: &mut dyn StateAccess,
        ctx: &TxContext<'_>,
        to: &AccountId,
        _amount: Balance,
    ) -> Result<(), TransactionError> {
        if self.entered.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        let inner = ctx.with_signer(*to);
        let code = match self.attack {
            Attack::Withdraw(id) => self.survey.withdraw_reward(state, &inner, id).err(),
            Attack::Unstake(amount) => self.survey.unstake(state, &inner, amount).err(),
        }
        .map_or("ok", |e| e.code());
        *self.outcome.lock().unwrap() = Some(code);
        Ok(())
    }
}

#[test]
fn test_reentrant_recipient_cannot_double_withdraw() -> Result<()> {
    let mut p = Platform::new(SurveyParams::default());
    let (owner, voter) = (account(1), account(2));
    p.register(owner)?;
    p.stake(voter, UNIT)?;
    let id = p.create(owner, 1)?;
    p.vote(voter, id, 0)?;
    assert_eq!(p.claimable(id, voter)?, UNIT);

    let sink = Reentrant::new(p.survey.clone(), Attack::Withdraw(id));
    let r: Receipt<Balance> = p.call_with(
        &sink,
        "survey",
        voter,
        "withdraw_reward@v1",
        &SurveyIdParams { survey_id: id },
    )?;
    assert_eq!(r.value, UNIT);
    assert_eq!(sink.outcome(), Some("SURVEY_NOTHING_TO_WITHDRAW"));
    assert_eq!(p.claimable(id, voter)?, 0);
    Ok(())
}

#[test]
fn test_reentrant_recipient_sees_the_reduced_stake() -> Result<()> {
    let mut p = Platform::new(SurveyParams::default());
    let voter = account(2);
    p.stake(voter, 2 * UNIT)?;

    let sink = Reentrant::new(p.survey.clone(), Attack::Unstake(2 * UNIT));
    let r: Receipt<Balance> = p.call_with(
        &sink,
        "survey",
        voter,
        "unstake@v1",
        &UnstakeParams { amount: UNIT },
    )?;
    assert_eq!(r.value, UNIT);
    assert_eq!(sink.outcome(), Some("SURVEY_INSUFFICIENT_BALANCE"));
    let custody: Balance = p.call(voter, "custody@v1", &())?;
    assert_eq!(custody, UNIT);
    Ok(())
}

#[test]
fn test_per_survey_scope_keeps_stakes_out_of_the_pool() -> Result<()> {
    let mut p = Platform::new(SurveyParams {
        reward_pool_scope: canvass_types::service_configs::RewardPoolScope::PerSurvey,
        ..Default::default()
    });
    let (owner, a, b) = (account(1), account(2), account(3));
    p.register(owner)?;
    p.stake(a, UNIT)?;
    p.stake(b, UNIT)?;
    let params = CreateSurveyParams {
        description: "Funded".into(),
        options: vec!["a".into(), "b".into()],
        duration_blocks: 10,
        quota: 2,
        results_public: true,
        funding: 10,
    };
    let id = p.call::<_, Receipt<SurveyId>>(owner, "create_survey@v1", &params)?.value;
    p.vote(a, id, 0)?;
    p.vote(b, id, 1)?;

    assert_eq!(p.claimable(id, a)?, 5);
    assert_eq!(p.claimable(id, b)?, 5);
    let custody: Balance = p.call(owner, "custody@v1", &())?;
    assert_eq!(custody, 2 * UNIT + 10);
    Ok(())
}
