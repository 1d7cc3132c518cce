mod commands;
mod helpers;

use clap::Parser;
use ctspect_core::domain::CalibrationError;

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().collect();
    match parse_and_dispatch(args) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            error.exit_code()
        }
    }
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => dispatch_parsed(cli.command),
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(name = "ctspect-rs", about = "CT spectral HU calibration engine")]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Per-kVp effective energies and spectrum integrals
    EffectiveEnergies(commands::EffectiveEnergiesArgs),
    /// Polyenergetic HU table, one column per kVp setting
    HuTable(commands::HuTableArgs),
    /// Monoenergetic HU table at explicit energies
    MonoHu(commands::MonoHuArgs),
    /// HU series for an insert-concentration ladder
    MixtureHu(commands::MixtureHuArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::EffectiveEnergies(args) => commands::run_effective_energies(args),
        CliCommand::HuTable(args) => commands::run_hu_table(args),
        CliCommand::MonoHu(args) => commands::run_mono_hu(args),
        CliCommand::MixtureHu(args) => commands::run_mixture_hu(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Calibration(#[from] CalibrationError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => 2,
            Self::Calibration(error) => error.exit_code(),
            Self::Internal(_) => 3,
        }
    }
}
