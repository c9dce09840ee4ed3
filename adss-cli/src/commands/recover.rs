use std::fs;
use std::path::PathBuf;

use adss_types::share::SecretShare;
use clap::Args;

use crate::config::CliConfig;
use crate::error::CliError;
use crate::persist;

/// Arguments of `adss recover`.
#[derive(Debug, Clone, Args)]
pub struct RecoverArgs {
    /// Comma-separated list of share files
    #[arg(long, value_delimiter = ',', required = true)]
    pub share_paths: Vec<PathBuf>,
    /// File path to create with the secret (prints base64 to stdout otherwise)
    #[arg(long)]
    pub out_path: Option<PathBuf>,
    /// Search candidate subsets in parallel (overrides `recovery.parallel`)
    #[arg(long)]
    pub parallel: bool,
    /// Cap on candidate subsets tried, 0 for none (overrides `recovery.max_candidates`)
    #[arg(long)]
    pub max_candidates: Option<u64>,
}

/// Result of a successful `adss recover`.
#[derive(Debug)]
pub struct RecoverOutcome {
    pub secret: Vec<u8>,
    /// Input files whose share was not part of the accepted explanation.
    pub excluded: Vec<PathBuf>,
    /// Where the secret was written, if `--out-path` was given.
    pub written_to: Option<PathBuf>,
}

/// Load the shares, recover the secret and optionally write it out.
pub fn run(args: &RecoverArgs, config: &CliConfig) -> Result<RecoverOutcome, CliError> {
    if args.share_paths.is_empty() {
        return Err(CliError::Usage("--share-paths is required".to_string()));
    }

    let shares = args
        .share_paths
        .iter()
        .map(|path| persist::read_share(path))
        .collect::<Result<Vec<SecretShare>, CliError>>()?;

    let mut recovery_config = config.recovery.clone();
    if args.parallel {
        recovery_config.parallel = true;
    }
    if let Some(max) = args.max_candidates {
        recovery_config.max_candidates = max;
    }

    let recovery = adss_crypto::recover_with_options(&shares, &recovery_config.options())?;

    let excluded: Vec<PathBuf> = args
        .share_paths
        .iter()
        .zip(&shares)
        .filter(|(_, share)| !recovery.valid_shares.contains(share))
        .map(|(path, _)| path.clone())
        .collect();
    if !excluded.is_empty() {
        tracing::warn!(
            excluded = excluded.len(),
            valid = recovery.valid_shares.len(),
            "recovered with invalid shares present"
        );
    }

    let written_to = match &args.out_path {
        Some(path) => {
            fs::write(path, &recovery.message).map_err(|source| CliError::Write {
                path: path.clone(),
                source,
            })?;
            Some(path.clone())
        }
        None => None,
    };

    Ok(RecoverOutcome {
        secret: recovery.message,
        excluded,
        written_to,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_share_paths() {
        let args = RecoverArgs {
            share_paths: vec![],
            out_path: None,
            parallel: false,
            max_candidates: None,
        };
        assert!(matches!(
            run(&args, &CliConfig::default()),
            Err(CliError::Usage(_))
        ));
    }

    #[test]
    fn test_missing_share_file() {
        let args = RecoverArgs {
            share_paths: vec![PathBuf::from("/nonexistent/share-0.json")],
            out_path: None,
            parallel: false,
            max_candidates: None,
        };
        assert!(matches!(
            run(&args, &CliConfig::default()),
            Err(CliError::Read { .. })
        ));
    }
}
