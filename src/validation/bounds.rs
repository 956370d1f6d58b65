//! Static numeric bounds for the validated fields.
//!
//! Every holder validates against one of these ranges. The compile-time
//! assertions at the bottom keep the ranges well-formed.

// ============================================================================
// Fan Speed
// ============================================================================

/// Lowest accepted fan speed setting (fan off)
pub const FAN_MIN_SPEED: i32 = 0;

/// Highest accepted fan speed setting
pub const FAN_MAX_SPEED: i32 = 5;

// ============================================================================
// Account Balance
// ============================================================================

/// Lowest balance an account may be opened with
pub const MIN_OPENING_BALANCE: i64 = 0;

/// Smallest accepted deposit or withdrawal amount
pub const MIN_TRANSACTION_AMOUNT: i64 = 1;

// ============================================================================
// Device Temperature (degrees Celsius)
// ============================================================================

/// Temperatures below this are raised to it
pub const DEVICE_MIN_TEMPERATURE_C: i32 = 0;

/// Temperatures above this are lowered to it
pub const DEVICE_MAX_TEMPERATURE_C: i32 = 40;

// ============================================================================
// Helpers
// ============================================================================

/// Returns true if `value` lies in the inclusive range `[min, max]`.
#[inline]
pub fn within<T: PartialOrd>(value: T, min: T, max: T) -> bool {
    min <= value && value <= max
}

// ============================================================================
// Compile-time Checks
// ============================================================================

const _: () = {
    assert!(
        FAN_MIN_SPEED <= FAN_MAX_SPEED,
        "FAN_MIN_SPEED must be <= FAN_MAX_SPEED"
    );
    assert!(FAN_MIN_SPEED >= 0, "fan speed cannot go below zero");
};

const _: () = {
    assert!(
        MIN_OPENING_BALANCE >= 0,
        "accounts cannot be opened overdrawn"
    );
    assert!(
        MIN_TRANSACTION_AMOUNT > 0,
        "MIN_TRANSACTION_AMOUNT must be positive"
    );
};

const _: () = {
    assert!(
        DEVICE_MIN_TEMPERATURE_C < DEVICE_MAX_TEMPERATURE_C,
        "device temperature range must be non-empty"
    );
};
