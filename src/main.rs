use clap::Parser;
use validated_fields::{CliArgs, DemoConfig, LoggingConfig, init_logging, run};

fn main() -> anyhow::Result<()> {
    let logging_config = LoggingConfig::from_env();
    let _guard = init_logging(logging_config)?;

    let cli = CliArgs::parse();
    let config = DemoConfig::from_args(cli)?;

    // Fail fast before any step runs
    config.validate()?;

    let report = run(&config)?;
    println!("{}", report.render(config.format)?);

    Ok(())
}
