// Path: crates/types/src/app/events.rs

use super::{AccountId, Balance, SurveyId};
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// The condition that caused a survey to close.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub enum CloseTrigger {
    /// The response count reached the quota.
    QuotaReached,
    /// The current height reached the expiry threshold.
    Expired,
    /// The owner closed the survey early.
    Owner,
}

impl CloseTrigger {
    /// A stable lowercase label, used for metrics and log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QuotaReached => "quota_reached",
            Self::Expired => "expired",
            Self::Owner => "owner",
        }
    }
}

/// A unified event type representing observable state changes on the platform.
/// Events are produced only by successful operations; a rolled-back call emits nothing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub enum SurveyEvent {
    /// A survey was created.
    SurveyCreated {
        /// The new survey's id.
        survey_id: SurveyId,
        /// The creating account.
        owner: AccountId,
        /// The number of options offered.
        option_count: u32,
        /// The response quota.
        quota: u32,
        /// The expiry height.
        expiry_height: u64,
    },

    /// Collateral was locked.
    Staked {
        /// The staking account.
        account: AccountId,
        /// The amount added.
        amount: Balance,
        /// The resulting stake.
        new_stake: Balance,
    },

    /// Collateral was returned.
    Unstaked {
        /// The unstaking account.
        account: AccountId,
        /// The amount returned.
        amount: Balance,
        /// The remaining stake.
        new_stake: Balance,
    },

    /// A vote was accepted.
    VoteCast {
        /// The survey voted in.
        survey_id: SurveyId,
        /// The voter.
        voter: AccountId,
        /// Whether the vote qualified for the recency bonus.
        recency_bonus: bool,
    },

    /// A survey closed and its reward pool was split.
    SurveyClosed {
        /// The closed survey.
        survey_id: SurveyId,
        /// The condition that closed it.
        trigger: CloseTrigger,
        /// The total amount credited to participants.
        distributed: Balance,
    },

    /// A reward amount was credited to a participant.
    RewardCredited {
        /// The survey the reward is attributed to.
        survey_id: SurveyId,
        /// The credited account.
        account: AccountId,
        /// The credited amount.
        amount: Balance,
    },

    /// A pending reward was paid out (or forfeited on a failed transfer).
    RewardWithdrawn {
        /// The survey the reward was attributed to.
        survey_id: SurveyId,
        /// The withdrawing account.
        account: AccountId,
        /// The amount zeroed from the ledger.
        amount: Balance,
        /// False if the outbound transfer failed and the amount was forfeited.
        delivered: bool,
    },
}

/// The value returned by a state-changing operation, together with the events it emitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct Receipt<T> {
    /// The operation's return value.
    pub value: T,
    /// Events emitted by the operation, in order.
    pub events: Vec<SurveyEvent>,
}

impl<T> Receipt<T> {
    /// Creates a receipt with no events.
    pub fn new(value: T) -> Self {
        Self {
            value,
            events: Vec::new(),
        }
    }

    /// Creates a receipt carrying the given events.
    pub fn with_events(value: T, events: Vec<SurveyEvent>) -> Self {
        Self { value, events }
    }

    /// Maps the contained value, keeping the events.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Receipt<U> {
        Receipt {
            value: f(self.value),
            events: self.events,
        }
    }
}
