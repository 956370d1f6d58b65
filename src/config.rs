use crate::report::OutputFormat;
use crate::script::{InitialValues, Scenario, Step};
use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemoConfig {
    pub scenario: Scenario,
    pub format: OutputFormat,
    pub initial: InitialValues,
    /// Steps from a config file; replaces the scenario's steps when present.
    pub script: Option<Vec<Step>>,
}

impl DemoConfig {
    /// Merges CLI arguments over the optional config file over defaults.
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let CliArgs {
            config,
            scenario: cli_scenario,
            format: cli_format,
            fan_speed: cli_fan_speed,
            holder: cli_holder,
            opening_balance: cli_opening_balance,
            device_temperature: cli_device_temperature,
        } = args;

        let file_config = if let Some(path) = config.as_ref() {
            load_config_file(path)?
        } else {
            PartialConfig::default()
        };

        let PartialConfig {
            scenario: file_scenario,
            format: file_format,
            fan_speed: file_fan_speed,
            holder: file_holder,
            opening_balance: file_opening_balance,
            device_temperature: file_device_temperature,
            script: file_script,
        } = file_config;

        let defaults = InitialValues::default();
        let initial = InitialValues {
            fan_speed: cli_fan_speed
                .or(file_fan_speed)
                .unwrap_or(defaults.fan_speed),
            holder: cli_holder
                .or(file_holder)
                .map(|holder| holder.trim().to_string())
                .unwrap_or(defaults.holder),
            opening_balance: cli_opening_balance
                .or(file_opening_balance)
                .unwrap_or(defaults.opening_balance),
            device_temperature: cli_device_temperature
                .or(file_device_temperature)
                .unwrap_or(defaults.device_temperature),
        };

        Ok(Self {
            scenario: cli_scenario.or(file_scenario).unwrap_or_default(),
            format: cli_format.or(file_format).unwrap_or_default(),
            initial,
            script: file_script,
        })
    }

    /// Checks the configuration before any step runs.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            !self.initial.holder.is_empty(),
            "account holder name cannot be empty"
        );
        if let Some(script) = self.script.as_ref() {
            anyhow::ensure!(
                !script.is_empty(),
                "config script must contain at least one step"
            );
        }
        Ok(())
    }

    /// Steps to run: the configured script, or the selected scenario.
    pub fn steps(&self) -> Vec<Step> {
        match &self.script {
            Some(script) => script.clone(),
            None => self.scenario.steps(),
        }
    }
}

#[derive(Parser, Debug, Default, Clone)]
#[command(
    name = "validated-fields",
    about = "Run validated-field scenarios and report each write outcome",
    version
)]
pub struct CliArgs {
    #[arg(
        long,
        env = "VALIDATED_FIELDS_CONFIG",
        value_name = "FILE",
        help = "Path to a configuration file (YAML or JSON)"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        env = "VALIDATED_FIELDS_SCENARIO",
        value_enum,
        value_name = "SCENARIO",
        help = "Built-in scenario to run (ignored when the config file has a script)"
    )]
    pub scenario: Option<Scenario>,

    #[arg(
        long,
        env = "VALIDATED_FIELDS_FORMAT",
        value_enum,
        value_name = "FORMAT",
        help = "Report format"
    )]
    pub format: Option<OutputFormat>,

    #[arg(
        long,
        env = "VALIDATED_FIELDS_FAN_SPEED",
        value_name = "N",
        allow_negative_numbers = true,
        help = "Initial fan speed"
    )]
    pub fan_speed: Option<i32>,

    #[arg(
        long,
        env = "VALIDATED_FIELDS_HOLDER",
        value_name = "NAME",
        help = "Account holder name"
    )]
    pub holder: Option<String>,

    #[arg(
        long,
        env = "VALIDATED_FIELDS_OPENING_BALANCE",
        value_name = "AMOUNT",
        allow_negative_numbers = true,
        help = "Opening account balance"
    )]
    pub opening_balance: Option<i64>,

    #[arg(
        long,
        env = "VALIDATED_FIELDS_DEVICE_TEMPERATURE",
        value_name = "CELSIUS",
        allow_negative_numbers = true,
        help = "Initial device temperature"
    )]
    pub device_temperature: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialConfig {
    scenario: Option<Scenario>,
    format: Option<OutputFormat>,
    fan_speed: Option<i32>,
    holder: Option<String>,
    opening_balance: Option<i64>,
    device_temperature: Option<i32>,
    script: Option<Vec<Step>>,
}

fn load_config_file(path: &Path) -> Result<PartialConfig> {
    if !path.exists() {
        anyhow::bail!("config file {:?} does not exist", path);
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {:?}", path))?;
    let ext = path
        .extension()
        .and_then(|os| os.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&contents)
            .with_context(|| format!("failed to parse YAML config {:?}", path))?,
        "json" => serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse JSON config {:?}", path))?,
        other => anyhow::bail!("unsupported config extension: {other}"),
    };
    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let config = DemoConfig::from_args(CliArgs::default()).unwrap();
        assert_eq!(config, DemoConfig::default());
        assert_eq!(config.steps(), Scenario::All.steps());
        config.validate().unwrap();
    }

    #[test]
    fn test_cli_parses_negative_values() {
        let args = CliArgs::try_parse_from([
            "validated-fields",
            "--scenario",
            "device",
            "--device-temperature",
            "-7",
            "--format",
            "json",
        ])
        .unwrap();
        let config = DemoConfig::from_args(args).unwrap();
        assert_eq!(config.scenario, Scenario::Device);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.initial.device_temperature, -7);
    }

    #[test]
    fn test_blank_holder_fails_validation() {
        let args = CliArgs {
            holder: Some("   ".to_string()),
            ..CliArgs::default()
        };
        let config = DemoConfig::from_args(args).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let args = CliArgs {
            config: Some(PathBuf::from("/nonexistent/validated-fields.yaml")),
            ..CliArgs::default()
        };
        assert!(DemoConfig::from_args(args).is_err());
    }
}
