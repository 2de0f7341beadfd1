//! JSON payout address directory.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::info;

use crate::domain::AddressDirectory;
use crate::error::{DirectoryError, Result};
use crate::port::outbound::store::DirectorySource;

/// Directory stored as a JSON object of `account id -> address`.
#[derive(Debug, Clone)]
pub struct JsonDirectorySource {
    path: PathBuf,
}

impl JsonDirectorySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DirectorySource for JsonDirectorySource {
    fn load_directory(&self) -> Result<AddressDirectory> {
        let content = std::fs::read_to_string(&self.path).map_err(|err| {
            if err.kind() == ErrorKind::NotFound {
                DirectoryError::NotFound {
                    path: self.path.display().to_string(),
                }
            } else {
                DirectoryError::Read(err)
            }
        })?;

        let directory = parse_directory(&content)?;
        info!(
            path = %self.path.display(),
            entries = directory.len(),
            "Loaded address directory"
        );
        Ok(directory)
    }
}

/// Parse a directory document.
///
/// # Errors
///
/// Returns [`DirectoryError::Malformed`] for anything other than an object of
/// non-empty strings, and [`DirectoryError::Empty`] for an empty object.
pub fn parse_directory(content: &str) -> std::result::Result<AddressDirectory, DirectoryError> {
    let content = content.trim_start_matches('\u{feff}');
    let raw: HashMap<String, String> =
        serde_json::from_str(content).map_err(|err| DirectoryError::Malformed(err.to_string()))?;

    let mut addresses = HashMap::with_capacity(raw.len());
    for (account_id, address) in raw {
        let address = address.trim();
        if address.is_empty() {
            return Err(DirectoryError::Malformed(format!(
                "empty address for account {account_id}"
            )));
        }
        addresses.insert(account_id.trim().to_string(), address.to_string());
    }

    if addresses.is_empty() {
        return Err(DirectoryError::Empty);
    }
    Ok(AddressDirectory::new(addresses))
}
