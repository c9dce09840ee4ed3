use std::fs;
use std::path::PathBuf;

use adss_types::access::AccessStructure;
use clap::Args;

use crate::config::{CliConfig, ShareFormat};
use crate::error::CliError;
use crate::persist;

/// Arguments of `adss split`.
#[derive(Debug, Clone, Args)]
pub struct SplitArgs {
    /// Number of shares required to reconstruct the secret
    #[arg(short, long)]
    pub threshold: u8,
    /// Number of shares to create
    #[arg(short = 'n', long)]
    pub count: u8,
    /// Secret to split into shares
    #[arg(long, conflicts_with = "secret_path")]
    pub secret: Option<String>,
    /// File to split into shares
    #[arg(long, conflicts_with = "secret")]
    pub secret_path: Option<PathBuf>,
    /// Public data to bind with the shares
    #[arg(long, default_value = "")]
    pub associated_data: String,
    /// Directory to write the shares to (overrides `output.dir`)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
    /// Share file format (overrides `output.format`)
    #[arg(long, value_enum)]
    pub format: Option<ShareFormat>,
}

impl SplitArgs {
    fn secret_bytes(&self) -> Result<Vec<u8>, CliError> {
        match (&self.secret, &self.secret_path) {
            (Some(secret), None) => Ok(secret.as_bytes().to_vec()),
            (None, Some(path)) => fs::read(path).map_err(|source| CliError::Read {
                path: path.clone(),
                source,
            }),
            _ => Err(CliError::Usage(
                "exactly one of --secret or --secret-path must be provided".to_string(),
            )),
        }
    }
}

/// Split the secret and write one file per share. Returns the written paths.
pub fn run(args: &SplitArgs, config: &CliConfig) -> Result<Vec<PathBuf>, CliError> {
    let secret = args.secret_bytes()?;
    let access = AccessStructure::try_new(args.threshold, args.count)?;
    let dir = args.out_dir.as_ref().unwrap_or(&config.output.dir);
    let format = args.format.unwrap_or(config.output.format);

    let shares = adss_crypto::share(&access, &secret, args.associated_data.as_bytes())?;

    let mut paths = Vec::with_capacity(shares.len());
    for share in &shares {
        paths.push(persist::write_share(dir, share, format)?);
    }

    tracing::info!(
        threshold = access.threshold,
        count = access.count,
        dir = %dir.display(),
        ?format,
        "shares written"
    );
    Ok(paths)
}
