//! Temperature device. Out-of-range writes are clamped, never rejected.

use crate::field::{ValidatedField, WriteOutcome};
use crate::validation::{ClampPolicy, DEVICE_MAX_TEMPERATURE_C, DEVICE_MIN_TEMPERATURE_C};

const TEMPERATURE_POLICY: ClampPolicy<i32> =
    ClampPolicy::new(DEVICE_MIN_TEMPERATURE_C, DEVICE_MAX_TEMPERATURE_C);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    temperature: ValidatedField<i32>,
}

impl Device {
    pub const FIELD: &'static str = "temperature";

    /// Creates a device. An out-of-range starting temperature is clamped.
    pub fn new(temperature: i32) -> Self {
        let (value, bound) = TEMPERATURE_POLICY.clamp(temperature);
        if let Some(bound) = bound {
            tracing::warn!(requested = temperature, value, %bound, "initial temperature clamped");
        }
        Self {
            temperature: ValidatedField::from_valid(Self::FIELD, value),
        }
    }

    /// Current temperature in degrees Celsius.
    pub fn temperature(&self) -> i32 {
        self.temperature.get()
    }

    /// Sets the temperature, clamping to the device range.
    pub fn set_temperature(&mut self, temperature: i32) -> WriteOutcome<i32> {
        let previous = self.temperature.get();
        match self.temperature.write(&TEMPERATURE_POLICY, temperature) {
            Ok(outcome) => outcome,
            // ClampPolicy never rejects
            Err(err) => {
                tracing::error!(error = %err, "temperature write rejected");
                WriteOutcome::Accepted {
                    previous,
                    value: previous,
                }
            }
        }
    }
}
