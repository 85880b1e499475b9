// Path: crates/types/src/app/survey.rs

//! The survey record and the per-voter ballot stored alongside it.

use super::{AccountId, Balance, SurveyId};
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// The canonical, on-chain record of a survey.
///
/// Immutable fields (`description`, `options`, `owner`, `quota`, `expiry_height`,
/// `results_public`) are fixed at creation. The record is mutated only by accepted
/// votes and by the single close transition; it is never deleted.
#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Survey {
    /// The sequential survey identifier.
    pub id: SurveyId,
    /// The survey question or description.
    pub description: String,
    /// The ordered option labels, fixed at creation.
    pub options: Vec<String>,
    /// The account that created the survey.
    pub owner: AccountId,
    /// Dense vote counts, one slot per option.
    pub tally: Vec<u64>,
    /// The maximum number of accepted responses.
    pub quota: u32,
    /// The number of responses accepted so far.
    pub response_count: u32,
    /// The block height at which the survey was created.
    pub created_at_height: u64,
    /// The block height from which the survey counts as expired.
    pub expiry_height: u64,
    /// False once the survey has closed. Never reset to true.
    pub is_open: bool,
    /// Whether anyone (and not only the owner) may read the tally.
    pub results_public: bool,
    /// Voters in the order their ballots were accepted.
    pub participants: Vec<AccountId>,
    /// Dedicated reward funding, used only with the per-survey pool scope.
    pub escrow: Balance,
}

impl Survey {
    /// Returns true iff `option` indexes one of the survey's options.
    pub fn has_option(&self, option: u32) -> bool {
        (option as usize) < self.options.len()
    }

    /// Returns true iff the response quota has been reached.
    pub fn quota_reached(&self) -> bool {
        self.response_count >= self.quota
    }

    /// Returns true iff `height` is at or beyond the expiry threshold.
    pub fn is_expired(&self, height: u64) -> bool {
        height >= self.expiry_height
    }
}

/// A voter's ballot in a single survey. Its presence marks the voter as having voted.
#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ballot {
    /// The chosen option index.
    pub option: u32,
    /// Whether this vote qualified for the recency bonus.
    pub recency_bonus: bool,
    /// The block height at which the ballot was accepted.
    pub cast_at_height: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;

    fn sample() -> Survey {
        Survey {
            id: 3,
            description: "Favourite editor?".into(),
            options: vec!["vim".into(), "emacs".into()],
            owner: AccountId([7; 32]),
            tally: vec![0, 0],
            quota: 2,
            response_count: 0,
            created_at_height: 10,
            expiry_height: 110,
            is_open: true,
            results_public: false,
            participants: Vec::new(),
            escrow: 0,
        }
    }

    #[test]
    fn test_option_bounds_and_expiry() {
        let survey = sample();
        assert!(survey.has_option(1));
        assert!(!survey.has_option(2));
        assert!(!survey.is_expired(109));
        assert!(survey.is_expired(110));
        assert!(!survey.quota_reached());
    }

    #[test]
    fn test_record_survives_canonical_codec() {
        let mut survey = sample();
        survey.response_count = 2;
        survey.tally = vec![1, 1];
        survey.participants = vec![AccountId([1; 32]), AccountId([2; 32])];

        let bytes = codec::to_bytes_canonical(&survey).unwrap();
        let decoded: Survey = codec::from_bytes_canonical(&bytes).unwrap();
        assert_eq!(decoded, survey);
        assert!(decoded.quota_reached());
    }

    #[test]
    fn test_json_view_exposes_tally() {
        let survey = sample();
        let json = serde_json::to_value(&survey).unwrap();
        assert_eq!(json["tally"], serde_json::json!([0, 0]));
        assert_eq!(json["is_open"], serde_json::json!(true));
    }
}
