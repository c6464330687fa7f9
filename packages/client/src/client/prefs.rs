//! Username preference file.
//!
//! A tiny key-value peripheral: the last username used, so the flag can
//! be omitted on the next run.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Persisted client preferences.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Prefs {
    pub username: Option<String>,
}

/// Default preference file location (`~/.flashtrack/prefs.json`).
pub fn default_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".flashtrack").join("prefs.json"))
}

/// Load preferences; a missing file is just empty preferences.
pub fn load(path: &Path) -> Result<Prefs, ClientError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            serde_json::from_str(&contents).map_err(|e| ClientError::Prefs(e.to_string()))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Prefs::default()),
        Err(e) => Err(ClientError::Prefs(e.to_string())),
    }
}

/// Save preferences, creating the parent directory if needed.
pub fn save(path: &Path, prefs: &Prefs) -> Result<(), ClientError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ClientError::Prefs(e.to_string()))?;
    }
    let contents =
        serde_json::to_string_pretty(prefs).map_err(|e| ClientError::Prefs(e.to_string()))?;
    std::fs::write(path, contents).map_err(|e| ClientError::Prefs(e.to_string()))
}
