mod commands;
mod error;
mod interaction;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::Parser;
use onboarding_config::{DEFAULT_CONFIG_FILE, OnboardingConfig};
use tracing_subscriber::EnvFilter;

use crate::commands::Commands;
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "church-onboard")]
#[command(about = "Onboard a church organization and its subscription", long_about = None)]
struct Cli {
    /// Configuration file (default: ./onboarding.toml when present)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Date validation treats as today, as YYYY-MM-DD
    #[arg(long, global = true, hide = true)]
    today: Option<NaiveDate>,

    /// Log debug output to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match load_config(cli.config) {
        Ok(config) => config,
        Err(e) => {
            print_error(&e);
            return ExitCode::FAILURE;
        }
    };
    let today = cli
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    if let Err(e) = cli.command.execute(&config, today) {
        print_error(&e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<PathBuf>) -> Result<OnboardingConfig, CliError> {
    let config = match path {
        Some(path) => OnboardingConfig::load(&path)?,
        None => OnboardingConfig::load_or_default(&PathBuf::from(DEFAULT_CONFIG_FILE))?,
    };
    Ok(config)
}

fn print_error(error: &CliError) {
    eprintln!("error: {error}");

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("caused by: {cause}");
        source = std::error::Error::source(cause);
    }
}
