// Path: crates/api/src/error/mod.rs
// Re-export all core error types from the central types crate.
pub use canvass_types::error::{
    ErrorCode, RegistryError, StateError, SurveyError, TransactionError,
};
pub use canvass_types::Result;
