use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{error, warn};

mod commands;
mod error;
mod logging;
mod report;
mod settings;

use commands::{CheckArgs, SettingsArgs};
use settings::{AppSettings, LoadedSettings};

#[derive(Parser, Debug)]
#[command(name = "folio", version, about = "Check for new releases of the Folio reader")]
struct Cli {
    /// Write debug logs for this run
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look for a newer release of the running build's variant
    Check(CheckArgs),
    /// Show or write the effective settings
    Settings(SettingsArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let LoadedSettings {
        settings,
        fallback_reason,
    } = AppSettings::load();
    logging::init_logging(cli.debug || settings.debug_logging, settings.max_log_size_bytes);
    if let Some(reason) = fallback_reason {
        warn!("{reason}");
        eprintln!("folio: {reason}");
    }

    let result = match cli.command {
        Command::Check(args) => commands::run_check(&settings, args).await,
        Command::Settings(args) => commands::show_settings(&settings, &args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("folio: {e}");
            ExitCode::FAILURE
        }
    }
}
