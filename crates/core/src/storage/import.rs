use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::state::AppState;

/// How a parsed import is reconciled with the current document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    /// Set-union merge by id; current records win on collision.
    Merge,
    /// Wholesale replacement of the current document.
    Replace,
}

/// Headline counts of an import file, shown to the user before they pick
/// a reconciliation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    /// Expense transactions.
    pub transactions: usize,
    pub accounts: usize,
    pub holdings: usize,
    /// Weight, calorie, and step entries combined.
    pub health_logs: usize,
}

impl ImportSummary {
    fn of(state: &AppState) -> Self {
        Self {
            transactions: state.expenses.len(),
            accounts: state.accounts.len(),
            holdings: state.holdings.len(),
            health_logs: state.weight_entries.len()
                + state.calorie_entries.len()
                + state.step_entries.len(),
        }
    }
}

/// A parsed, not-yet-applied import file.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingImport {
    pub state: AppState,
    pub summary: ImportSummary,
}

/// Parse a foreign document for import.
///
/// Validation is deliberately minimal: the file must be JSON with a
/// `settings` object and an `accounts` array. Any list that is missing
/// defaults to empty. There is no schema or version check beyond that.
pub fn parse_import(json: &str) -> Result<PendingImport, CoreError> {
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| CoreError::InvalidImport(format!("not valid JSON: {e}")))?;

    let object = value
        .as_object()
        .ok_or_else(|| CoreError::InvalidImport("top level is not an object".to_string()))?;
    if !object.get("settings").is_some_and(|v| v.is_object()) {
        return Err(CoreError::InvalidImport(
            "missing `settings` object".to_string(),
        ));
    }
    if !object.get("accounts").is_some_and(|v| v.is_array()) {
        return Err(CoreError::InvalidImport(
            "missing `accounts` array".to_string(),
        ));
    }

    let state: AppState = serde_json::from_value(value)
        .map_err(|e| CoreError::InvalidImport(format!("unreadable document: {e}")))?;
    let summary = ImportSummary::of(&state);

    Ok(PendingImport { state, summary })
}
