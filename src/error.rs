//! Error types for validated field operations.
//!
//! Rejections are an expected control path: a rejected write leaves the field
//! untouched and hands the caller a [`FieldError`] describing why. Nothing in
//! this crate treats a rejection as fatal.

use serde::Serialize;
use thiserror::Error;

/// Result type for field operations
pub type FieldResult<T> = Result<T, FieldError>;

/// Errors raised by validated fields and the holders built on them.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldError {
    /// Candidate fell outside the write policy; the stored value is unchanged.
    #[error("{field}: rejected {candidate}: {reason}")]
    ValidationRejected {
        field: &'static str,
        candidate: i64,
        reason: RejectReason,
    },

    /// A constructor refused its initial value.
    #[error("{field}: invalid initial value {value}: {reason}")]
    InvalidInitial {
        field: &'static str,
        value: String,
        reason: String,
    },
}

impl FieldError {
    /// Name of the field that produced the error.
    pub fn field(&self) -> &'static str {
        match self {
            FieldError::ValidationRejected { field, .. } => field,
            FieldError::InvalidInitial { field, .. } => field,
        }
    }

    /// Returns the rejection reason for write rejections.
    pub fn reject_reason(&self) -> Option<RejectReason> {
        match self {
            FieldError::ValidationRejected { reason, .. } => Some(*reason),
            FieldError::InvalidInitial { .. } => None,
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, FieldError::ValidationRejected { .. })
    }
}

/// Why a policy refused a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectReason {
    /// Candidate outside the inclusive range `[min, max]`.
    #[error("outside valid range [{min}, {max}]")]
    OutOfRange { min: i64, max: i64 },

    /// Amount must be strictly positive.
    #[error("amount must be positive")]
    NonPositive,

    /// Withdrawal larger than the current balance.
    #[error("amount exceeds available balance {available}")]
    InsufficientFunds { available: i64 },

    /// Committing the candidate would overflow the backing integer.
    #[error("arithmetic overflow")]
    Overflow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_display() {
        let err = FieldError::ValidationRejected {
            field: "speed",
            candidate: 10,
            reason: RejectReason::OutOfRange { min: 0, max: 5 },
        };
        assert_eq!(err.to_string(), "speed: rejected 10: outside valid range [0, 5]");
        assert_eq!(err.field(), "speed");
        assert!(err.is_rejection());
    }

    #[test]
    fn test_invalid_initial_has_no_reject_reason() {
        let err = FieldError::InvalidInitial {
            field: "holder",
            value: String::new(),
            reason: "holder name cannot be empty".to_string(),
        };
        assert_eq!(err.reject_reason(), None);
        assert!(!err.is_rejection());
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let err = FieldError::ValidationRejected {
            field: "balance",
            candidate: 2000,
            reason: RejectReason::InsufficientFunds { available: 1200 },
        };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "validation_rejected");
        assert_eq!(json["reason"]["reason"], "insufficient_funds");
        assert_eq!(json["reason"]["available"], 1200);
    }
}
