use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Dashboard section that can be pinned to the top of the overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PinnedSection {
    Health,
    Money,
    Invest,
}

/// User-configurable settings, stored inside the aggregate document.
///
/// Currency handling is deliberately two-sided: everything is either in the
/// main currency or in the single investment currency, converted by one
/// scalar rate. Other currency codes pass through unconverted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Display name shown in the profile.
    pub name: String,

    pub height_cm: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_weight_kg: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_weight_kg: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_date: Option<NaiveDate>,

    pub daily_calorie_target: u32,

    pub daily_step_target: u32,

    /// Currency all dashboard values are displayed in (e.g. "RON").
    pub main_currency: String,

    /// Currency investments are tracked in (e.g. "EUR").
    pub investment_currency: String,

    /// Scalar rate: 1 unit of investment currency in main currency.
    pub exchange_rate: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_backup_date: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned_dashboard_section: Option<PinnedSection>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            name: "User".to_string(),
            height_cm: 175.0,
            start_weight_kg: None,
            goal_weight_kg: None,
            goal_date: None,
            daily_calorie_target: 2000,
            daily_step_target: 10_000,
            main_currency: "RON".to_string(),
            investment_currency: "EUR".to_string(),
            exchange_rate: 4.97,
            last_backup_date: None,
            pinned_dashboard_section: None,
        }
    }
}
