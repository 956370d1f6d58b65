//! Step records and their rendering.

use crate::error::{FieldError, RejectReason};
use crate::script::Step;
use crate::validation::{Bound, DEVICE_MIN_TEMPERATURE_C, FAN_MAX_SPEED, FAN_MIN_SPEED};
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use strum::Display;

/// How a report is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StepStatus {
    Accepted,
    Clamped,
    Rejected,
}

/// Values of all three holders at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub speed: i32,
    pub balance: i64,
    pub temperature: i32,
}

/// The result of applying one [`Step`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub step: Step,
    pub field: &'static str,
    pub status: StepStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bound: Option<Bound>,
    pub previous: i64,
    /// Stored value after the step; equals `previous` when rejected.
    pub value: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<FieldError>,
}

impl StepRecord {
    /// Human-readable line describing the outcome.
    pub fn message(&self) -> String {
        match (self.step, self.status) {
            (Step::SetSpeed { .. }, StepStatus::Rejected) => format!(
                "Invalid speed! Must be between {} and {}.",
                FAN_MIN_SPEED, FAN_MAX_SPEED
            ),
            (Step::SetSpeed { .. }, _) => format!("Speed set to {}", self.value),
            (Step::Deposit { value }, StepStatus::Rejected) => match self.reject_reason() {
                Some(RejectReason::Overflow) => {
                    format!("Deposit of ${value} would overflow the balance.")
                }
                _ => "Deposit amount must be positive.".to_string(),
            },
            (Step::Deposit { value }, _) => {
                format!("Deposited ${value}. New Balance: ${}", self.value)
            }
            (Step::Withdraw { .. }, StepStatus::Rejected) => {
                "Insufficient funds or invalid amount.".to_string()
            }
            (Step::Withdraw { value }, _) => {
                format!("Withdrew ${value}. Remaining Balance: ${}", self.value)
            }
            (Step::SetTemperature { .. }, _) => {
                let prefix = match self.bound {
                    Some(Bound::High) => "Warning: Overheating! ".to_string(),
                    Some(Bound::Low) => {
                        format!("Too cold! Auto-adjusting to {DEVICE_MIN_TEMPERATURE_C}. ")
                    }
                    None => String::new(),
                };
                format!("{prefix}Temperature set to {}°C", self.value)
            }
        }
    }

    fn reject_reason(&self) -> Option<RejectReason> {
        self.error.as_ref().and_then(FieldError::reject_reason)
    }
}

/// Everything a scripted run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub holder: String,
    pub initial: Snapshot,
    pub records: Vec<StepRecord>,
    #[serde(rename = "final")]
    pub final_state: Snapshot,
}

impl Report {
    pub fn count(&self, status: StepStatus) -> usize {
        self.records.iter().filter(|r| r.status == status).count()
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Json => {
                serde_json::to_string_pretty(self).context("failed to serialize report as JSON")
            }
        }
    }

    fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Account Holder: {}", self.holder);
        let _ = writeln!(
            out,
            "Initial: speed={} balance=${} temperature={}°C",
            self.initial.speed, self.initial.balance, self.initial.temperature
        );
        for record in &self.records {
            let _ = writeln!(out, "[{:<8}] {}", record.status.to_string(), record.message());
        }
        let _ = write!(
            out,
            "Final: speed={} balance=${} temperature={}°C",
            self.final_state.speed, self.final_state.balance, self.final_state.temperature
        );
        out
    }
}
