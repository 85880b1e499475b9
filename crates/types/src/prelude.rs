// Path: crates/types/src/prelude.rs

//! A curated set of commonly used traits and types.

use crate::app::Balance;
use crate::error::TransactionError;

/// An extension trait for `Option` that provides a convenient `required` method
/// to convert an `Option` to a `Result` with a specific error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, E>`, returning the provided
    /// error if the option is `None`.
    fn required<E>(self, err: E) -> Result<T, E>;
}

impl<T> OptionExt<T> for Option<T> {
    fn required<E>(self, err: E) -> Result<T, E> {
        self.ok_or(err)
    }
}

/// Checked balance arithmetic that surfaces overflow as `TransactionError::BalanceOverflow`.
pub trait BalanceExt: Sized {
    /// Adds `rhs`, failing on overflow.
    fn credit(self, rhs: Balance) -> Result<Self, TransactionError>;
    /// Subtracts `rhs`, failing on underflow.
    fn debit(self, rhs: Balance) -> Result<Self, TransactionError>;
}

impl BalanceExt for Balance {
    fn credit(self, rhs: Balance) -> Result<Self, TransactionError> {
        self.checked_add(rhs).ok_or(TransactionError::BalanceOverflow)
    }

    fn debit(self, rhs: Balance) -> Result<Self, TransactionError> {
        self.checked_sub(rhs).ok_or(TransactionError::BalanceOverflow)
    }
}
