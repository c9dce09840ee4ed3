use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use clap::{Parser, Subcommand};

use crate::commands::recover::RecoverArgs;
use crate::commands::split::SplitArgs;
use crate::config::CliConfig;
use crate::error::CliError;
use crate::format::{print_warning, style_success};

#[derive(Parser)]
#[command(
    name = "adss",
    about = "Adept secret sharing: split a secret into tamper-evident shares and recover it",
    version
)]
pub struct Cli {
    /// Path to config file (defaults to ./adss.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Log level filter when RUST_LOG is unset (overrides `logging.level`)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Split a secret into share files
    Split(SplitArgs),
    /// Recover a secret from share files, tolerating corrupted shares
    Recover(RecoverArgs),
}

pub fn run(cli: Cli, config: CliConfig) -> Result<(), CliError> {
    match cli.command {
        Command::Split(args) => {
            for path in crate::commands::split::run(&args, &config)? {
                println!("Share written to: {}", path.display());
            }
            println!("{}", style_success().apply_to("Complete."));
        }
        Command::Recover(args) => {
            let outcome = crate::commands::recover::run(&args, &config)?;
            for path in &outcome.excluded {
                print_warning(&format!("Invalid share at {}", path.display()));
            }
            match outcome.written_to {
                Some(path) => println!("Secret written to: {}", path.display()),
                None => println!("{}", STANDARD.encode(&outcome.secret)),
            }
        }
    }
    Ok(())
}
