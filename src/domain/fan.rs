//! Fan speed controller.

use crate::error::FieldResult;
use crate::field::{ValidatedField, WriteOutcome};
use crate::validation::{FAN_MAX_SPEED, FAN_MIN_SPEED, RangePolicy};

const SPEED_POLICY: RangePolicy<i32> = RangePolicy::new(FAN_MIN_SPEED, FAN_MAX_SPEED);

/// A fan whose speed setting stays within `[FAN_MIN_SPEED, FAN_MAX_SPEED]`.
///
/// # Example
/// ```
/// use validated_fields::domain::Fan;
///
/// let mut fan = Fan::new(3).unwrap();
/// assert!(fan.set_speed(4).is_ok());
/// assert!(fan.set_speed(10).is_err());
/// assert_eq!(fan.speed(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fan {
    speed: ValidatedField<i32>,
}

impl Fan {
    pub const FIELD: &'static str = "speed";

    /// Creates a fan at the given speed.
    ///
    /// # Errors
    /// Returns `Err` if `speed` is outside the accepted range.
    pub fn new(speed: i32) -> FieldResult<Self> {
        Ok(Self {
            speed: ValidatedField::init(Self::FIELD, &SPEED_POLICY, speed)?,
        })
    }

    pub fn speed(&self) -> i32 {
        self.speed.get()
    }

    /// Changes the speed setting.
    ///
    /// # Errors
    /// Returns `Err` and keeps the current speed if `speed` is out of range.
    pub fn set_speed(&mut self, speed: i32) -> FieldResult<WriteOutcome<i32>> {
        self.speed.write(&SPEED_POLICY, speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fan_rejects_invalid_initial_speed() {
        assert!(Fan::new(-5).is_err());
        assert!(Fan::new(6).is_err());
        assert!(Fan::new(0).is_ok());
        assert!(Fan::new(5).is_ok());
    }

    #[test]
    fn test_fan_speed_scenario() {
        let mut fan = Fan::new(3).unwrap();
        assert_eq!(fan.speed(), 3);

        fan.set_speed(4).unwrap();
        assert_eq!(fan.speed(), 4);

        assert!(fan.set_speed(10).is_err());
        assert_eq!(fan.speed(), 4);
    }
}
