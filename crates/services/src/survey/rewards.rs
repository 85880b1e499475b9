// Path: crates/services/src/survey/rewards.rs
//! The reward split computed once at survey close.
//!
//! Every participant receives an equal share of the pool (`base`). Participants whose
//! vote qualified for the recency bonus additionally receive `bonus_per_eligible`, which
//! is a percentage of `base` scaled by `participants / eligible`. The bonus is capped so
//! that the credits never exceed the pool. Integer floor division is used throughout and
//! any remainder stays in the pool.

use canvass_types::app::{AccountId, Balance};
use canvass_types::error::TransactionError;

/// The outcome of splitting a pool across the participants of one survey.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Distribution {
    /// The equal share every participant receives.
    pub base: Balance,
    /// The extra amount each bonus-eligible participant receives.
    pub bonus_per_eligible: Balance,
    /// Per-participant credits, in participant order.
    pub credits: Vec<(AccountId, Balance)>,
    /// The sum of all credits.
    pub total: Balance,
}

/// Splits `pool` across `participants`, each paired with its recency-bonus flag.
///
/// The bonus is paid only out of `pool % participants`, so the whole bonus is bounded
/// by `participants - 1` base units. With pools that divide evenly it is zero, even
/// where `bonus_percent` of `base` would be large.
pub fn split(
    pool: Balance,
    participants: &[(AccountId, bool)],
    bonus_percent: u8,
) -> Result<Distribution, TransactionError> {
    if participants.is_empty() {
        return Ok(Distribution::default());
    }
    let n = participants.len() as Balance;
    let eligible = participants.iter().filter(|(_, flag)| *flag).count() as Balance;

    let base = pool / n;
    let bonus_per_eligible = if eligible == 0 {
        0
    } else {
        let pct_of_base = base
            .checked_mul(Balance::from(bonus_percent))
            .ok_or(TransactionError::BalanceOverflow)?
            / 100;
        let uncapped = pct_of_base
            .checked_mul(n)
            .ok_or(TransactionError::BalanceOverflow)?
            / eligible;
        // base * n <= pool by construction.
        let cap = (pool - base * n) / eligible;
        uncapped.min(cap)
    };

    let mut credits = Vec::with_capacity(participants.len());
    let mut total: Balance = 0;
    for (account, flag) in participants {
        let amount = if *flag { base + bonus_per_eligible } else { base };
        total += amount;
        credits.push((*account, amount));
    }

    Ok(Distribution {
        base,
        bonus_per_eligible,
        credits,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acct(b: u8) -> AccountId {
        AccountId([b; 32])
    }

    #[test]
    fn test_no_participants_distributes_nothing() {
        let d = split(1_000, &[], 10).unwrap();
        assert_eq!(d, Distribution::default());
    }

    #[test]
    fn test_equal_split_keeps_remainder() {
        let d = split(7, &[(acct(1), false), (acct(2), false)], 10).unwrap();
        assert_eq!(d.base, 3);
        assert_eq!(d.bonus_per_eligible, 0);
        assert_eq!(d.credits, vec![(acct(1), 3), (acct(2), 3)]);
        assert_eq!(d.total, 6);
    }

    #[test]
    fn test_bonus_is_capped_by_remaining_pool() {
        // base = 333, uncapped bonus = floor(33 * 3 / 1) = 99, remainder = 1.
        let parts = [(acct(1), true), (acct(2), false), (acct(3), false)];
        let d = split(1_000, &parts, 10).unwrap();
        assert_eq!(d.base, 333);
        assert_eq!(d.bonus_per_eligible, 1);
        assert_eq!(d.total, 1_000);
    }

    #[test]
    fn test_bonus_comes_only_from_the_remainder() {
        // base = 13 and nothing remains, so the bonus is capped to zero.
        let parts = [(acct(1), true), (acct(2), true), (acct(3), false)];
        let d = split(39, &parts, 10).unwrap();
        assert_eq!(d.base, 13);
        assert_eq!(d.bonus_per_eligible, 0);
        assert_eq!(d.total, 39);

        // base = 5_004, uncapped bonus = 1_000, remainder = 1.
        let d = split(10_009, &[(acct(1), true), (acct(2), false)], 10).unwrap();
        assert_eq!(d.bonus_per_eligible, 1);
        assert_eq!(d.credits, vec![(acct(1), 5_005), (acct(2), 5_004)]);
    }

    #[test]
    fn test_bonus_is_bounded_by_the_division_remainder() {
        let unit: Balance = 10u128.pow(18);
        let d = split(2 * unit, &[(acct(1), true), (acct(2), false)], 10).unwrap();
        assert_eq!(d.base, unit);
        assert_eq!(d.bonus_per_eligible, 0);

        let d = split(2 * unit + 1, &[(acct(1), true), (acct(2), false)], 10).unwrap();
        assert_eq!(d.bonus_per_eligible, 1);
        assert_eq!(d.total, 2 * unit + 1);
    }

    #[test]
    fn test_credits_never_exceed_pool() {
        for pool in [0u128, 1, 2, 99, 100, 101, 12_345, 10u128.pow(18) + 7] {
            for mask in 0u8..16 {
                let parts: Vec<_> = (0..4).map(|i| (acct(i), mask & (1 << i) != 0)).collect();
                let d = split(pool, &parts, 10).unwrap();
                assert!(d.total <= pool, "pool {} mask {}", pool, mask);
                assert_eq!(d.total, d.credits.iter().map(|(_, a)| a).sum::<Balance>());
            }
        }
    }

    #[test]
    fn test_overflow_is_reported() {
        let parts = [(acct(1), true)];
        let res = split(Balance::MAX, &parts, 100);
        assert!(matches!(res, Err(TransactionError::BalanceOverflow)));
    }
}
