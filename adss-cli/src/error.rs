use std::path::PathBuf;

use adss_types::error::AdssError;
use thiserror::Error;

/// Errors that can occur in the command-line tool.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error("config error: {reason}")]
    Config { reason: String },

    #[error("reading {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("writing {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("decoding {}: {reason}", .path.display())]
    Decode { path: PathBuf, reason: String },

    #[error("{0}")]
    Adss(#[from] AdssError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
