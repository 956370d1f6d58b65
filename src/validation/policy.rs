//! Write policies.
//!
//! A policy looks at the current value and a candidate and decides what gets
//! committed. Policies are pure: they never touch the field themselves.

use super::bounds::{MIN_TRANSACTION_AMOUNT, within};
use crate::error::RejectReason;
use serde::{Deserialize, Serialize};
use strum::Display;

/// Which end of a range a clamped value was pulled to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Bound {
    Low,
    High,
}

/// The verdict of a policy on a single candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision<T> {
    /// Commit this value.
    Accept(T),
    /// Leave the field unchanged.
    Reject(RejectReason),
    /// Commit the adjusted in-range value instead of the candidate.
    Clamp { value: T, bound: Bound },
}

/// Decides what a write of `candidate` commits, given the `current` value.
pub trait Policy<T> {
    fn decide(&self, current: T, candidate: T) -> Decision<T>;
}

// ============================================================================
// RangePolicy - accept inside [min, max], reject outside
// ============================================================================

/// Replaces the value with the candidate if it lies in `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangePolicy<T> {
    pub min: T,
    pub max: T,
}

impl<T> RangePolicy<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T> Policy<T> for RangePolicy<T>
where
    T: Copy + PartialOrd + Into<i64>,
{
    fn decide(&self, _current: T, candidate: T) -> Decision<T> {
        if within(candidate, self.min, self.max) {
            Decision::Accept(candidate)
        } else {
            Decision::Reject(RejectReason::OutOfRange {
                min: self.min.into(),
                max: self.max.into(),
            })
        }
    }
}

// ============================================================================
// ClampPolicy - pull out-of-range candidates to the nearest bound
// ============================================================================

/// Replaces the value with the candidate, clamped to `[min, max]`. Never rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClampPolicy<T> {
    pub min: T,
    pub max: T,
}

impl<T> ClampPolicy<T>
where
    T: Copy + PartialOrd,
{
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// Clamps `candidate`, reporting which bound was hit, if any.
    pub fn clamp(&self, candidate: T) -> (T, Option<Bound>) {
        if candidate > self.max {
            (self.max, Some(Bound::High))
        } else if candidate < self.min {
            (self.min, Some(Bound::Low))
        } else {
            (candidate, None)
        }
    }
}

impl<T> Policy<T> for ClampPolicy<T>
where
    T: Copy + PartialOrd,
{
    fn decide(&self, _current: T, candidate: T) -> Decision<T> {
        match self.clamp(candidate) {
            (value, Some(bound)) => Decision::Clamp { value, bound },
            (value, None) => Decision::Accept(value),
        }
    }
}

// ============================================================================
// Balance policies - the candidate is an amount, not a replacement value
// ============================================================================

/// Adds a strictly positive amount to the balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DepositPolicy;

impl Policy<i64> for DepositPolicy {
    fn decide(&self, current: i64, amount: i64) -> Decision<i64> {
        if amount < MIN_TRANSACTION_AMOUNT {
            return Decision::Reject(RejectReason::NonPositive);
        }
        match current.checked_add(amount) {
            Some(balance) => Decision::Accept(balance),
            None => Decision::Reject(RejectReason::Overflow),
        }
    }
}

/// Subtracts a strictly positive amount no larger than the balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WithdrawPolicy;

impl Policy<i64> for WithdrawPolicy {
    fn decide(&self, current: i64, amount: i64) -> Decision<i64> {
        if amount < MIN_TRANSACTION_AMOUNT {
            return Decision::Reject(RejectReason::NonPositive);
        }
        if amount > current {
            return Decision::Reject(RejectReason::InsufficientFunds { available: current });
        }
        Decision::Accept(current - amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_policy_accepts_inclusive_bounds() {
        let policy = RangePolicy::new(0, 5);
        assert_eq!(policy.decide(3, 0), Decision::Accept(0));
        assert_eq!(policy.decide(3, 5), Decision::Accept(5));
        assert_eq!(
            policy.decide(3, 6),
            Decision::Reject(RejectReason::OutOfRange { min: 0, max: 5 })
        );
        assert_eq!(
            policy.decide(3, -1),
            Decision::Reject(RejectReason::OutOfRange { min: 0, max: 5 })
        );
    }

    #[test]
    fn test_clamp_policy() {
        let policy = ClampPolicy::new(0, 40);
        assert_eq!(
            policy.decide(25, 45),
            Decision::Clamp {
                value: 40,
                bound: Bound::High
            }
        );
        assert_eq!(
            policy.decide(25, -10),
            Decision::Clamp {
                value: 0,
                bound: Bound::Low
            }
        );
        assert_eq!(policy.decide(25, 40), Decision::Accept(40));
        assert_eq!(policy.decide(25, 0), Decision::Accept(0));
    }

    #[test]
    fn test_deposit_policy() {
        assert_eq!(DepositPolicy.decide(1000, 500), Decision::Accept(1500));
        assert_eq!(
            DepositPolicy.decide(1000, 0),
            Decision::Reject(RejectReason::NonPositive)
        );
        assert_eq!(
            DepositPolicy.decide(i64::MAX, 1),
            Decision::Reject(RejectReason::Overflow)
        );
    }

    #[test]
    fn test_withdraw_policy() {
        assert_eq!(WithdrawPolicy.decide(1500, 300), Decision::Accept(1200));
        // Emptying the account is allowed
        assert_eq!(WithdrawPolicy.decide(1200, 1200), Decision::Accept(0));
        assert_eq!(
            WithdrawPolicy.decide(1200, 2000),
            Decision::Reject(RejectReason::InsufficientFunds { available: 1200 })
        );
        assert_eq!(
            WithdrawPolicy.decide(1200, -5),
            Decision::Reject(RejectReason::NonPositive)
        );
    }

    #[test]
    fn test_bound_display() {
        assert_eq!(Bound::Low.to_string(), "low");
        assert_eq!(Bound::High.to_string(), "high");
    }
}
