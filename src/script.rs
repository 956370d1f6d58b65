//! Scripted runs against the three holders.
//!
//! A [`Workbench`] owns one [`Fan`], one [`BankAccount`] and one [`Device`] and
//! applies [`Step`]s to them in order. A rejected step is recorded and the run
//! carries on; nothing in a script can abort it.

use crate::domain::{BankAccount, Device, Fan};
use crate::error::{FieldError, FieldResult};
use crate::field::WriteOutcome;
use crate::report::{Report, Snapshot, StepRecord, StepStatus};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

/// Default starting speed of the demo fan
pub const DEFAULT_FAN_SPEED: i32 = 3;
/// Default account holder of the demo account
pub const DEFAULT_HOLDER: &str = "Ali";
/// Default opening balance of the demo account
pub const DEFAULT_OPENING_BALANCE: i64 = 1000;
/// Default starting temperature of the demo device
pub const DEFAULT_DEVICE_TEMPERATURE_C: i32 = 25;

/// One write against a holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    SetSpeed { value: i32 },
    Deposit { value: i64 },
    Withdraw { value: i64 },
    SetTemperature { value: i32 },
}

impl Step {
    /// Name of the field this step writes.
    pub fn field(&self) -> &'static str {
        match self {
            Step::SetSpeed { .. } => Fan::FIELD,
            Step::Deposit { .. } | Step::Withdraw { .. } => BankAccount::FIELD,
            Step::SetTemperature { .. } => Device::FIELD,
        }
    }

    pub fn op(&self) -> &'static str {
        match self {
            Step::SetSpeed { .. } => "set_speed",
            Step::Deposit { .. } => "deposit",
            Step::Withdraw { .. } => "withdraw",
            Step::SetTemperature { .. } => "set_temperature",
        }
    }

    /// The candidate passed to the write, widened to `i64`.
    pub fn candidate(&self) -> i64 {
        match *self {
            Step::SetSpeed { value } | Step::SetTemperature { value } => value.into(),
            Step::Deposit { value } | Step::Withdraw { value } => value,
        }
    }
}

/// Built-in demonstration scenarios.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Display, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Scenario {
    Fan,
    Account,
    Device,
    #[default]
    All,
}

impl Scenario {
    /// Steps of the scenario, in execution order.
    pub fn steps(self) -> Vec<Step> {
        match self {
            Scenario::Fan => vec![Step::SetSpeed { value: 4 }, Step::SetSpeed { value: 10 }],
            Scenario::Account => vec![
                Step::Deposit { value: 500 },
                Step::Withdraw { value: 300 },
                Step::Withdraw { value: 2000 },
            ],
            Scenario::Device => vec![
                Step::SetTemperature { value: 45 },
                Step::SetTemperature { value: -10 },
                Step::SetTemperature { value: 30 },
            ],
            Scenario::All => Scenario::iter()
                .filter(|scenario| *scenario != Scenario::All)
                .flat_map(Scenario::steps)
                .collect(),
        }
    }
}

/// Starting values for a [`Workbench`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialValues {
    pub fan_speed: i32,
    pub holder: String,
    pub opening_balance: i64,
    pub device_temperature: i32,
}

impl Default for InitialValues {
    fn default() -> Self {
        Self {
            fan_speed: DEFAULT_FAN_SPEED,
            holder: DEFAULT_HOLDER.to_string(),
            opening_balance: DEFAULT_OPENING_BALANCE,
            device_temperature: DEFAULT_DEVICE_TEMPERATURE_C,
        }
    }
}

/// The three holders a script runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workbench {
    pub fan: Fan,
    pub account: BankAccount,
    pub device: Device,
}

impl Workbench {
    /// Builds the holders from `initial`.
    ///
    /// # Errors
    /// Fails if the fan speed, holder name or opening balance is invalid.
    pub fn new(initial: &InitialValues) -> FieldResult<Self> {
        Ok(Self {
            fan: Fan::new(initial.fan_speed)?,
            account: BankAccount::open(initial.holder.clone(), initial.opening_balance)?,
            device: Device::new(initial.device_temperature),
        })
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            speed: self.fan.speed(),
            balance: self.account.balance(),
            temperature: self.device.temperature(),
        }
    }

    /// Applies a single step and records what happened.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(op = step.op(), candidate = step.candidate())
    )]
    pub fn apply(&mut self, step: Step) -> StepRecord {
        match step {
            Step::SetSpeed { value } => {
                let result = self.fan.set_speed(value);
                record(step, widen(result), self.fan.speed().into())
            }
            Step::Deposit { value } => {
                let result = self.account.deposit(value);
                record(step, result, self.account.balance())
            }
            Step::Withdraw { value } => {
                let result = self.account.withdraw(value);
                record(step, result, self.account.balance())
            }
            Step::SetTemperature { value } => {
                let outcome = self.device.set_temperature(value);
                record(step, widen(Ok(outcome)), self.device.temperature().into())
            }
        }
    }

    /// Applies `steps` in order and collects a report.
    pub fn run(&mut self, steps: &[Step]) -> Report {
        let initial = self.snapshot();
        let records: Vec<StepRecord> = steps.iter().map(|step| self.apply(*step)).collect();
        let report = Report {
            holder: self.account.holder().to_string(),
            initial,
            records,
            final_state: self.snapshot(),
        };
        tracing::info!(
            steps = report.records.len(),
            rejected = report.count(StepStatus::Rejected),
            clamped = report.count(StepStatus::Clamped),
            "script finished"
        );
        report
    }
}

fn widen(result: FieldResult<WriteOutcome<i32>>) -> FieldResult<WriteOutcome<i64>> {
    result.map(|outcome| match outcome {
        WriteOutcome::Accepted { previous, value } => WriteOutcome::Accepted {
            previous: previous.into(),
            value: value.into(),
        },
        WriteOutcome::Clamped {
            previous,
            requested,
            value,
            bound,
        } => WriteOutcome::Clamped {
            previous: previous.into(),
            requested: requested.into(),
            value: value.into(),
            bound,
        },
    })
}

fn record(step: Step, result: FieldResult<WriteOutcome<i64>>, current: i64) -> StepRecord {
    match result {
        Ok(outcome) => StepRecord {
            step,
            field: step.field(),
            status: if outcome.is_clamped() {
                StepStatus::Clamped
            } else {
                StepStatus::Accepted
            },
            bound: outcome.bound(),
            previous: outcome.previous(),
            value: outcome.value(),
            error: None,
        },
        Err(error) => StepRecord {
            step,
            field: step.field(),
            status: StepStatus::Rejected,
            bound: None,
            previous: current,
            value: current,
            error: Some(error),
        },
    }
}

/// Runs `steps` on a fresh workbench built from `initial`.
///
/// # Errors
/// Fails only if `initial` is invalid; step rejections end up in the report.
pub fn run_script(initial: &InitialValues, steps: &[Step]) -> Result<Report, FieldError> {
    let mut bench = Workbench::new(initial)?;
    Ok(bench.run(steps))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RejectReason;
    use crate::validation::Bound;

    #[test]
    fn test_all_scenario_concatenates_in_order() {
        let steps = Scenario::All.steps();
        assert_eq!(steps.len(), 8);
        assert_eq!(steps[0], Step::SetSpeed { value: 4 });
        assert_eq!(steps[2], Step::Deposit { value: 500 });
        assert_eq!(steps[7], Step::SetTemperature { value: 30 });
    }

    #[test]
    fn test_rejection_recorded_with_unchanged_value() {
        let mut bench = Workbench::new(&InitialValues::default()).unwrap();
        let record = bench.apply(Step::SetSpeed { value: 10 });
        assert_eq!(record.status, StepStatus::Rejected);
        assert_eq!(record.previous, 3);
        assert_eq!(record.value, 3);
        assert_eq!(
            record.error.as_ref().and_then(FieldError::reject_reason),
            Some(RejectReason::OutOfRange { min: 0, max: 5 })
        );
    }

    #[test]
    fn test_clamp_recorded() {
        let mut bench = Workbench::new(&InitialValues::default()).unwrap();
        let record = bench.apply(Step::SetTemperature { value: -10 });
        assert_eq!(record.status, StepStatus::Clamped);
        assert_eq!(record.bound, Some(Bound::Low));
        assert_eq!(record.previous, 25);
        assert_eq!(record.value, 0);
    }

    #[test]
    fn test_step_deserializes_from_tagged_yaml() {
        let steps: Vec<Step> =
            serde_yaml::from_str("- op: deposit\n  value: 50\n- op: set_speed\n  value: -1\n")
                .unwrap();
        assert_eq!(
            steps,
            vec![Step::Deposit { value: 50 }, Step::SetSpeed { value: -1 }]
        );
    }

    #[test]
    fn test_scenario_display() {
        assert_eq!(Scenario::Account.to_string(), "account");
        assert_eq!(Scenario::default(), Scenario::All);
    }

    #[test]
    fn test_invalid_initial_values() {
        let initial = InitialValues {
            fan_speed: 9,
            ..InitialValues::default()
        };
        assert!(run_script(&initial, &[]).is_err());
    }
}
