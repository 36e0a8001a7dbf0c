use std::path::Path;

use log::warn;

use crate::errors::CoreError;
use crate::models::state::AppState;

/// High-level storage operations: the whole document in, the whole
/// document out, as one JSON blob under one fixed path.
///
/// There is no partial write and no versioning — every save overwrites
/// the previous document. Write frequency is one save per mutation, which
/// is fine at this data volume.
pub struct StorageManager;

impl StorageManager {
    /// Serialize the document to its storage representation.
    pub fn save_to_string(state: &AppState) -> Result<String, CoreError> {
        serde_json::to_string(state)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize state: {e}")))
    }

    /// Parse a stored document.
    pub fn load_from_str(json: &str) -> Result<AppState, CoreError> {
        serde_json::from_str(json)
            .map_err(|e| CoreError::Deserialization(format!("Failed to parse stored state: {e}")))
    }

    /// Write the document to disk, overwriting whatever was there.
    pub fn save_to_file(state: &AppState, path: &Path) -> Result<(), CoreError> {
        let json = Self::save_to_string(state)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Read and parse the document at `path`.
    pub fn load_from_file(path: &Path) -> Result<AppState, CoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::load_from_str(&json)
    }

    /// Startup load: a missing file means a fresh install, a corrupted
    /// file is discarded with a log line. Neither is surfaced as an
    /// error — the app always starts.
    pub fn load_or_default(path: &Path) -> AppState {
        if !path.exists() {
            return AppState::initial();
        }
        match Self::load_from_file(path) {
            Ok(state) => state,
            Err(e) => {
                warn!("discarding unreadable state file {}: {e}", path.display());
                AppState::initial()
            }
        }
    }
}
