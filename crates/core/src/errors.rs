use thiserror::Error;

/// Unified error type for the entire life-dashboard-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// The reducer itself has no error path — it is total over the action
/// space. Errors only arise at the edges: file I/O, (de)serialization,
/// and foreign-document imports.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Storage / File ──────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── Import ──────────────────────────────────────────────────────
    #[error("Invalid import file: {0}")]
    InvalidImport(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
