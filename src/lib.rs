pub mod config;
pub mod domain;
pub mod error;
pub mod field;
pub mod logging;
pub mod report;
pub mod script;
pub mod validation;

pub use config::{CliArgs, DemoConfig};
pub use domain::{BankAccount, Device, Fan};
pub use error::{FieldError, FieldResult, RejectReason};
pub use field::{ValidatedField, WriteOutcome};
pub use logging::{LoggingConfig, init_logging};
pub use report::{OutputFormat, Report, StepRecord, StepStatus};
pub use script::{InitialValues, Scenario, Step, Workbench};

use anyhow::{Context, Result};

/// Runs the configured steps and returns the resulting report.
pub fn run(config: &DemoConfig) -> Result<Report> {
    let steps = config.steps();
    tracing::info!(
        scenario = %config.scenario,
        scripted = config.script.is_some(),
        steps = steps.len(),
        "running validated field demo"
    );

    script::run_script(&config.initial, &steps).context("invalid initial values")
}
