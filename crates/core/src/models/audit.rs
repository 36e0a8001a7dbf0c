use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::generate_id;

/// Top-level app section a change belongs to. Used to tag audit entries
/// so the history view can filter by area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Section {
    Dashboard,
    Cash,
    Invest,
    Health,
    Settings,
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Section::Dashboard => write!(f, "Dashboard"),
            Section::Cash => write!(f, "Cash"),
            Section::Invest => write!(f, "Invest"),
            Section::Health => write!(f, "Health"),
            Section::Settings => write!(f, "Settings"),
        }
    }
}

/// Kind of change an audit entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Add,
    Edit,
    Delete,
}

/// One line of the append-only change history.
///
/// Entries are prepended (newest first) and never pruned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    pub id: String,

    /// Full timestamp of the change (not day granularity like entity dates).
    pub timestamp: DateTime<Utc>,

    pub section: Section,

    pub action_type: AuditAction,

    /// Human-readable description, e.g. "Added expense: Food - 42".
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AuditLogEntry {
    pub fn new(section: Section, action_type: AuditAction, description: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            timestamp: Utc::now(),
            section,
            action_type,
            description: description.into(),
            details: None,
        }
    }
}
