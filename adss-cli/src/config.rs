use std::path::{Path, PathBuf};

use adss_crypto::RecoveryOptions;
use adss_types::constants::DEFAULT_MAX_CANDIDATES;
use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "adss.toml";

/// On-disk encoding of share files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ShareFormat {
    /// Pretty JSON with base64 byte fields.
    Json,
    /// Versioned borsh encoding.
    Binary,
}

impl ShareFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ShareFormat::Json => "json",
            ShareFormat::Binary => "bin",
        }
    }

    /// Pick the format from a file extension; anything but `.bin` is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("bin") => ShareFormat::Binary,
            _ => ShareFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub output: OutputConfig,
    pub recovery: RecoveryConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory share files are written to.
    pub dir: PathBuf,
    pub format: ShareFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoveryConfig {
    /// Search candidate subsets on all cores.
    pub parallel: bool,
    /// Cap on candidate subsets tried during recovery; 0 means unlimited.
    pub max_candidates: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            format: ShareFormat::Json,
        }
    }
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl RecoveryConfig {
    pub fn options(&self) -> RecoveryOptions {
        RecoveryOptions {
            parallel: self.parallel,
            max_candidates: (self.max_candidates != 0).then_some(self.max_candidates),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let contents = std::fs::read_to_string(path).map_err(|e| CliError::Config {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        let config: CliConfig = toml::from_str(&contents).map_err(|e| CliError::Config {
            reason: format!("failed to parse config file '{}': {}", path.display(), e),
        })?;
        Ok(config)
    }

    /// Load an explicitly requested file, or fall back to
    /// [`DEFAULT_CONFIG_FILE`] and then to defaults if that does not exist.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, CliError> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::load(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
