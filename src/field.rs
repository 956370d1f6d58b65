//! The validated field: a named scalar that is only ever written through a
//! [`Policy`].
//!
//! Reads are unconditional. Writes go through [`ValidatedField::write`], which
//! asks the policy for a [`Decision`] and commits, clamps or rejects
//! accordingly. A rejected write leaves the stored value as it was.

use crate::error::{FieldError, FieldResult};
use crate::validation::{Bound, Decision, Policy};
use serde::Serialize;
use std::fmt;

/// What a successful write committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WriteOutcome<T> {
    /// The policy committed its value unchanged.
    Accepted { previous: T, value: T },
    /// The candidate was out of range and `value` is the bound it was pulled to.
    Clamped {
        previous: T,
        requested: T,
        value: T,
        bound: Bound,
    },
}

impl<T: Copy> WriteOutcome<T> {
    /// The value stored after the write.
    pub fn value(&self) -> T {
        match self {
            WriteOutcome::Accepted { value, .. } | WriteOutcome::Clamped { value, .. } => *value,
        }
    }

    /// The value stored before the write.
    pub fn previous(&self) -> T {
        match self {
            WriteOutcome::Accepted { previous, .. } | WriteOutcome::Clamped { previous, .. } => {
                *previous
            }
        }
    }

    pub fn bound(&self) -> Option<Bound> {
        match self {
            WriteOutcome::Accepted { .. } => None,
            WriteOutcome::Clamped { bound, .. } => Some(*bound),
        }
    }

    pub fn is_clamped(&self) -> bool {
        matches!(self, WriteOutcome::Clamped { .. })
    }
}

/// A named scalar whose writes are filtered through a policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedField<T> {
    name: &'static str,
    value: T,
}

impl<T> ValidatedField<T>
where
    T: Copy + Into<i64> + fmt::Display,
{
    /// Creates a field, running `initial` through the same policy writes use.
    ///
    /// # Errors
    /// Returns [`FieldError::InvalidInitial`] if the policy rejects `initial`.
    /// A clamped initial value is stored at its bound.
    pub fn init<P: Policy<T>>(name: &'static str, policy: &P, initial: T) -> FieldResult<Self> {
        match policy.decide(initial, initial) {
            Decision::Accept(value) => Ok(Self { name, value }),
            Decision::Clamp { value, bound } => {
                tracing::warn!(
                    field = name,
                    requested = %initial,
                    value = %value,
                    %bound,
                    "initial value clamped"
                );
                Ok(Self { name, value })
            }
            Decision::Reject(reason) => Err(FieldError::InvalidInitial {
                field: name,
                value: initial.to_string(),
                reason: reason.to_string(),
            }),
        }
    }

    /// Wraps a value the caller has already checked against its policy.
    pub(crate) fn from_valid(name: &'static str, value: T) -> Self {
        Self { name, value }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Current value. Always succeeds.
    pub fn get(&self) -> T {
        self.value
    }

    /// Writes `candidate` through `policy`.
    ///
    /// # Errors
    /// Returns [`FieldError::ValidationRejected`] when the policy rejects the
    /// candidate. The stored value is unchanged in that case.
    pub fn write<P: Policy<T>>(&mut self, policy: &P, candidate: T) -> FieldResult<WriteOutcome<T>> {
        let previous = self.value;
        match policy.decide(previous, candidate) {
            Decision::Accept(value) => {
                self.value = value;
                tracing::debug!(field = self.name, %previous, %value, "write accepted");
                Ok(WriteOutcome::Accepted { previous, value })
            }
            Decision::Clamp { value, bound } => {
                self.value = value;
                tracing::warn!(
                    field = self.name,
                    requested = %candidate,
                    %value,
                    %bound,
                    "write clamped to bound"
                );
                Ok(WriteOutcome::Clamped {
                    previous,
                    requested: candidate,
                    value,
                    bound,
                })
            }
            Decision::Reject(reason) => {
                tracing::warn!(
                    field = self.name,
                    candidate = %candidate,
                    %reason,
                    "write rejected"
                );
                Err(FieldError::ValidationRejected {
                    field: self.name,
                    candidate: candidate.into(),
                    reason,
                })
            }
        }
    }
}

impl<T: fmt::Display> fmt::Display for ValidatedField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}
