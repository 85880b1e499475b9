// Path: crates/types/src/app/mod.rs
//! Core application-level records: identities, surveys, ballots and participant state.

/// Observable events and per-operation receipts.
pub mod events;
/// The canonical `AccountId`.
pub mod identity;
/// The identity-keyed participant record (stake and participation counters).
pub mod participant;
/// The survey record and its ballots.
pub mod survey;

pub use events::*;
pub use identity::AccountId;
pub use participant::ParticipantRecord;
pub use survey::{Ballot, Survey};

/// The sequential identifier of a survey.
pub type SurveyId = u64;

/// An amount of collateral, in base units.
pub type Balance = u128;
