// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]

//! # Canvass Types
//!
//! This crate is the foundational library for the Canvass survey platform, containing
//! the core records, error types, well-known state keys and service configuration.
//!
//! ## Architectural Role
//!
//! As the base crate, `canvass-types` has minimal dependencies and is itself a
//! dependency for every other crate in the workspace. Shared types like `AccountId`,
//! `Survey` and `ParticipantRecord` are defined once here so that every component
//! reads and writes state in exactly the same binary representation.

/// The maximum number of options a single survey may offer.
pub const MAX_SURVEY_OPTIONS: usize = 256;
/// The maximum size in bytes of a survey description.
pub const MAX_DESCRIPTION_BYTES: usize = 4 * 1024; // 4 KiB

/// A top-level, crate-wide `Result` type alias with a default error type.
pub type Result<T, E = crate::error::TransactionError> = std::result::Result<T, E>;

/// Application-level records: identities, surveys, ballots and participant state.
pub mod app;
/// The canonical, deterministic binary codec for platform state.
pub mod codec;
/// A unified set of all error types used across the workspace.
pub mod error;
/// Constants and builders for well-known state keys.
pub mod keys;
/// A prelude containing useful extension traits like `OptionExt`.
pub mod prelude;
/// Configuration structures for the survey and registry services.
pub mod service_configs;
