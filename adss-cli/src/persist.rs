//! Reading and writing share files.

use std::fs;
use std::path::{Path, PathBuf};

use adss_types::share::SecretShare;

use crate::config::ShareFormat;
use crate::error::CliError;

/// `share-<id>.<ext>`
pub fn share_file_name(share: &SecretShare, format: ShareFormat) -> String {
    format!("share-{}.{}", share.id, format.extension())
}

pub fn encode_share(share: &SecretShare, format: ShareFormat) -> Result<Vec<u8>, CliError> {
    match format {
        ShareFormat::Json => Ok(serde_json::to_vec_pretty(share)?),
        ShareFormat::Binary => Ok(share.to_wire_bytes()?),
    }
}

pub fn decode_share(bytes: &[u8], format: ShareFormat) -> Result<SecretShare, String> {
    match format {
        ShareFormat::Json => serde_json::from_slice(bytes).map_err(|e| e.to_string()),
        ShareFormat::Binary => SecretShare::from_wire_bytes(bytes).map_err(|e| e.to_string()),
    }
}

/// Write `share` into `dir`, creating the directory if needed.
pub fn write_share(dir: &Path, share: &SecretShare, format: ShareFormat) -> Result<PathBuf, CliError> {
    fs::create_dir_all(dir).map_err(|source| CliError::Write {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(share_file_name(share, format));
    let bytes = encode_share(share, format)?;
    fs::write(&path, bytes).map_err(|source| CliError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Read a share file, choosing the decoder from its extension.
pub fn read_share(path: &Path) -> Result<SecretShare, CliError> {
    let bytes = fs::read(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    decode_share(&bytes, ShareFormat::from_path(path)).map_err(|reason| CliError::Decode {
        path: path.to_path_buf(),
        reason,
    })
}
