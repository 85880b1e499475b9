// Path: crates/services/src/lib.rs
#![forbid(unsafe_code)]
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented
    )
)]
//! Services for the Canvass survey platform: the name registry that gates survey
//! creation, and the staked survey service itself.

pub mod registry;
pub mod survey;
