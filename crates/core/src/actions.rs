use chrono::{DateTime, NaiveDate, Utc};

use crate::models::health::{CalorieEntry, StepEntry, TrainingEntry, WeightEntry};
use crate::models::invest::{Holding, InvestmentTransaction};
use crate::models::money::{Account, Expense};
use crate::models::savings::{SavingsPot, SavingsTransaction};
use crate::models::settings::{PinnedSection, Settings};
use crate::models::state::AppState;

/// Every mutation of the aggregate document, as a tagged value.
///
/// The reducer is total over this space: every variant is handled, none
/// can fail. Add/Edit variants carry the full record; Delete variants
/// carry the id.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace the whole document verbatim. No audit entry.
    LoadState(Box<AppState>),

    /// Set-union merge of an imported document (see the reducer for the
    /// exact per-list rules).
    MergeState(Box<AppState>),

    /// Replace the whole document with the fixed initial one.
    ResetData,

    UpdateSettings(SettingsPatch),

    // ── Money ───────────────────────────────────────────────────────
    AddExpense(Expense),
    EditExpense(Expense),
    DeleteExpense(String),

    AddAccount(Account),
    EditAccount(Account),
    DeleteAccount(String),

    // ── Savings ─────────────────────────────────────────────────────
    AddSavingsPot(SavingsPot),
    EditSavingsPot(SavingsPot),
    DeleteSavingsPot(String),
    AddSavingsTx(SavingsTransaction),

    // ── Investments ─────────────────────────────────────────────────
    AddHolding(Holding),
    EditHolding(Holding),
    DeleteHolding(String),
    /// Replace a holding's current value and stamp the update time.
    /// Records no transaction; callers wanting history also record an
    /// `UPDATE_PRICE` transaction.
    UpdateHoldingValue { id: String, value: f64 },
    AddInvestmentTx(InvestmentTransaction),

    // ── Health ──────────────────────────────────────────────────────
    AddWeight(WeightEntry),
    EditWeight(WeightEntry),
    DeleteWeight(String),

    AddCalories(CalorieEntry),
    EditCalories(CalorieEntry),
    DeleteCalories(String),

    AddSteps(StepEntry),
    EditSteps(StepEntry),
    DeleteSteps(String),

    AddTraining(TrainingEntry),
    EditTraining(TrainingEntry),
    DeleteTraining(String),
}

/// A partial settings update. `None` fields are left untouched; the patch
/// is shallow-merged into the current settings without validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsPatch {
    pub name: Option<String>,
    pub height_cm: Option<f64>,
    pub start_weight_kg: Option<f64>,
    pub goal_weight_kg: Option<f64>,
    pub goal_date: Option<NaiveDate>,
    pub daily_calorie_target: Option<u32>,
    pub daily_step_target: Option<u32>,
    pub main_currency: Option<String>,
    pub investment_currency: Option<String>,
    pub exchange_rate: Option<f64>,
    pub last_backup_date: Option<DateTime<Utc>>,
    pub pinned_dashboard_section: Option<PinnedSection>,
}

impl SettingsPatch {
    pub(crate) fn apply_to(self, settings: &mut Settings) {
        if let Some(name) = self.name {
            settings.name = name;
        }
        if let Some(height_cm) = self.height_cm {
            settings.height_cm = height_cm;
        }
        if let Some(kg) = self.start_weight_kg {
            settings.start_weight_kg = Some(kg);
        }
        if let Some(kg) = self.goal_weight_kg {
            settings.goal_weight_kg = Some(kg);
        }
        if let Some(date) = self.goal_date {
            settings.goal_date = Some(date);
        }
        if let Some(target) = self.daily_calorie_target {
            settings.daily_calorie_target = target;
        }
        if let Some(target) = self.daily_step_target {
            settings.daily_step_target = target;
        }
        if let Some(currency) = self.main_currency {
            settings.main_currency = currency;
        }
        if let Some(currency) = self.investment_currency {
            settings.investment_currency = currency;
        }
        if let Some(rate) = self.exchange_rate {
            settings.exchange_rate = rate;
        }
        if let Some(ts) = self.last_backup_date {
            settings.last_backup_date = Some(ts);
        }
        if let Some(section) = self.pinned_dashboard_section {
            settings.pinned_dashboard_section = Some(section);
        }
    }
}
