//! Bounds and write policies for validated fields.
//!
//! - `bounds`: the static ranges each holder enforces
//! - `policy`: the [`Policy`] trait and its range, clamp and balance rules

pub mod bounds;
pub mod policy;

pub use bounds::{
    DEVICE_MAX_TEMPERATURE_C, DEVICE_MIN_TEMPERATURE_C, FAN_MAX_SPEED, FAN_MIN_SPEED,
    MIN_OPENING_BALANCE, MIN_TRANSACTION_AMOUNT, within,
};
pub use policy::{Bound, ClampPolicy, Decision, DepositPolicy, Policy, RangePolicy, WithdrawPolicy};
