// Path: crates/api/src/lib.rs

//! # Canvass API Crate Lints
//!
//! This crate enforces a strict set of lints to ensure high-quality,
//! panic-free, and well-documented code. Panics are disallowed in non-test
//! code to promote robust error handling.
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::indexing_slicing
    )
)]
//! # Canvass API
//!
//! Core traits and interfaces for the Canvass survey platform. This crate defines
//! the stable contract between services and the host that drives them: state access,
//! atomic execution, the per-call context and the collaborator seams.

/// Re-exports all core error types from the central `canvass-types` crate.
pub mod error;
/// Defines the `RegistrationView` trait for decoupled registration lookups.
pub mod identity;
/// Traits for pluggable blockchain services and the service locator.
pub mod services;
/// Core traits for state management, including `StateAccess` and `StateOverlay`.
pub mod state;
/// Atomic execution and the per-call `TxContext`.
pub mod transaction;
/// Defines the `ValueTransfer` trait for outbound value movements.
pub mod transfer;

/// A curated set of the most commonly used traits and types.
pub mod prelude {
    pub use crate::error::{ErrorCode, StateError, TransactionError};
    pub use crate::identity::RegistrationView;
    pub use crate::services::access::ServiceDirectory;
    pub use crate::services::BlockchainService;
    pub use crate::state::{InMemoryState, StateAccess, StateOverlay};
    pub use crate::transaction::context::TxContext;
    pub use crate::transaction::execute_atomic;
    pub use crate::transfer::ValueTransfer;
}
