// Path: crates/services/src/survey/gate.rs
//! The participation gate: admission checks for a vote and the recency-bonus window.

use super::records;
use super::SurveyService;
use canvass_api::state::StateAccess;
use canvass_api::transaction::context::TxContext;
use canvass_types::app::{
    AccountId, Ballot, CloseTrigger, ParticipantRecord, Survey, SurveyEvent, SurveyId,
};
use canvass_types::error::{SurveyError, TransactionError};
use canvass_types::service_configs::SurveyParams;

/// The half-open interval `[start, end)` of seconds since the last qualifying vote
/// within which a new vote earns the recency bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecencyWindow {
    pub start: u64,
    pub end: u64,
}

impl From<&SurveyParams> for RecencyWindow {
    fn from(p: &SurveyParams) -> Self {
        Self {
            start: p.recency_window_start_secs,
            end: p.recency_window_end_secs,
        }
    }
}

/// Decides whether a vote at `now` earns the recency bonus, given the timestamp of the
/// identity's last qualifying vote. Returns the flag and the timestamp to store.
///
/// The first vote ever is not eligible but becomes the baseline. After that the stored
/// timestamp only moves when a vote is eligible.
pub fn recency_check(last: Option<u64>, now: u64, window: RecencyWindow) -> (bool, Option<u64>) {
    match last {
        None => (false, Some(now)),
        Some(prev) => {
            let delta = now.saturating_sub(prev);
            if delta >= window.start && delta < window.end {
                (true, Some(now))
            } else {
                (false, Some(prev))
            }
        }
    }
}

impl SurveyService {
    /// Runs the admission checks in order; the first failure wins.
    fn admit(
        &self,
        state: &dyn StateAccess,
        survey: &Survey,
        voter: &AccountId,
        height: u64,
    ) -> Result<ParticipantRecord, TransactionError> {
        if !survey.is_open || survey.is_expired(height) {
            return Err(SurveyError::SurveyClosed(survey.id).into());
        }
        if records::load_ballot(state, survey.id, voter)?.is_some() {
            return Err(SurveyError::AlreadyVoted(survey.id).into());
        }
        let record = records::load_participant(state, voter)?;
        if record.stake < self.params.min_stake {
            return Err(SurveyError::InsufficientStake {
                required: self.params.min_stake,
                have: record.stake,
            }
            .into());
        }
        if record.active_participations >= self.params.max_active_participations {
            return Err(
                SurveyError::ParticipationLimitReached(self.params.max_active_participations).into(),
            );
        }
        Ok(record)
    }

    pub(super) fn do_vote(
        &self,
        state: &mut dyn StateAccess,
        ctx: &TxContext,
        survey_id: SurveyId,
        option: u32,
        events: &mut Vec<SurveyEvent>,
    ) -> Result<bool, TransactionError> {
        let voter = ctx.signer_account_id;
        let mut survey = records::load_survey(state, survey_id)?;
        if survey.is_open && survey.is_expired(ctx.block_height) {
            log::debug!(
                "[Survey] Vote on survey {} observed expiry at height {}",
                survey_id,
                ctx.block_height
            );
        }
        let mut record = self.admit(state, &survey, &voter, ctx.block_height)?;

        let quota_reached = self.record_vote(&mut survey, option, voter)?;

        let (recency_bonus, last) = recency_check(
            record.last_qualifying_vote_at,
            ctx.block_timestamp,
            RecencyWindow::from(&self.params),
        );
        record.last_qualifying_vote_at = last;
        record.active_participations = record
            .active_participations
            .checked_add(1)
            .ok_or(TransactionError::BalanceOverflow)?;
        records::save_participant(state, &voter, &record)?;
        records::save_ballot(
            state,
            survey_id,
            &voter,
            &Ballot {
                option,
                recency_bonus,
                cast_at_height: ctx.block_height,
            },
        )?;

        log::info!(
            "[Survey] {} voted in survey {} ({}/{} responses, bonus: {})",
            voter.short(),
            survey_id,
            survey.response_count,
            survey.quota,
            recency_bonus
        );
        events.push(SurveyEvent::VoteCast {
            survey_id,
            voter,
            recency_bonus,
        });

        if quota_reached {
            self.finalize(state, survey, CloseTrigger::QuotaReached, events)?;
        } else {
            records::save_survey(state, &survey)?;
        }
        Ok(quota_reached)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::tests::{account, Harness, DAY};
    use canvass_types::service_configs::UNIT;

    const WINDOW: RecencyWindow = RecencyWindow {
        start: DAY,
        end: 2 * DAY,
    };

    #[test]
    fn test_recency_window_boundaries() {
        let t0 = 1_000_000;
        assert_eq!(recency_check(None, t0, WINDOW), (false, Some(t0)));
        assert_eq!(recency_check(Some(t0), t0 + DAY - 1, WINDOW), (false, Some(t0)));
        assert_eq!(recency_check(Some(t0), t0 + DAY, WINDOW), (true, Some(t0 + DAY)));
        assert_eq!(
            recency_check(Some(t0), t0 + 2 * DAY - 1, WINDOW),
            (true, Some(t0 + 2 * DAY - 1))
        );
        assert_eq!(recency_check(Some(t0), t0 + 2 * DAY, WINDOW), (false, Some(t0)));
        // A clock that moves backwards never qualifies.
        assert_eq!(recency_check(Some(t0), t0 - 5, WINDOW), (false, Some(t0)));
    }

    #[test]
    fn test_admission_checks_run_in_order() {
        let mut h = Harness::new();
        let owner = account(1);
        let voter = account(2);
        h.register(owner).unwrap();
        let id = h.create_default(owner, 3).unwrap();

        // No stake yet.
        let err = h.vote(voter, id, 0).unwrap_err();
        assert!(matches!(
            err.as_survey(),
            Some(SurveyError::InsufficientStake { have: 0, .. })
        ));

        h.stake(voter, UNIT).unwrap();
        h.vote(voter, id, 0).unwrap();
        let err = h.vote(voter, id, 1).unwrap_err();
        assert_eq!(err.as_survey(), Some(&SurveyError::AlreadyVoted(id)));
    }

    #[test]
    fn test_invalid_option_is_checked_after_admission() {
        let mut h = Harness::new();
        let owner = account(1);
        let voter = account(2);
        h.register(owner).unwrap();
        let id = h.create_default(owner, 3).unwrap();
        h.stake(voter, UNIT).unwrap();

        let err = h.vote(voter, id, 9).unwrap_err();
        assert_eq!(
            err.as_survey(),
            Some(&SurveyError::InvalidOption { index: 9, count: 2 })
        );
        assert_eq!(h.service.active_participations(&h.state, &voter).unwrap(), 0);
    }

    #[test]
    fn test_participation_limit() {
        let mut h = Harness::with_params(SurveyParams {
            max_active_participations: 2,
            ..Default::default()
        });
        let owner = account(1);
        let voter = account(2);
        h.register(owner).unwrap();
        h.stake(voter, UNIT).unwrap();
        let ids: Vec<_> = (0..3).map(|_| h.create_default(owner, 5).unwrap()).collect();

        h.vote(voter, ids[0], 0).unwrap();
        h.vote(voter, ids[1], 0).unwrap();
        let err = h.vote(voter, ids[2], 0).unwrap_err();
        assert_eq!(err.as_survey(), Some(&SurveyError::ParticipationLimitReached(2)));

        // Closing one survey frees a slot.
        h.close(owner, ids[0]).unwrap();
        h.vote(voter, ids[2], 0).unwrap();
    }

    #[test]
    fn test_vote_on_expired_survey_fails_and_leaves_it_open() {
        let mut h = Harness::new();
        let owner = account(1);
        let voter = account(2);
        h.register(owner).unwrap();
        h.stake(voter, UNIT).unwrap();
        let id = h.create_default(owner, 5).unwrap();

        h.height += 100;
        let err = h.vote(voter, id, 0).unwrap_err();
        assert_eq!(err.as_survey(), Some(&SurveyError::SurveyClosed(id)));
        assert!(h.service.survey(&h.state, id).unwrap().is_open);
    }
}
