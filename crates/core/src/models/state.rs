use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::audit::{AuditAction, AuditLogEntry, Section};
use super::health::{CalorieEntry, StepEntry, TrainingEntry, WeightEntry};
use super::invest::{Holding, InvestmentTransaction};
use super::money::{Account, AccountKind, Expense};
use super::savings::{PotKind, SavingsPot, SavingsTransaction};
use super::settings::Settings;

/// The aggregate document. Everything the app knows lives in here, and the
/// whole thing is serialized to storage after every mutation.
///
/// Entities reference each other by id only (expense → account,
/// savings transaction → pot, investment transaction → holding); the
/// document is the sole owner of every record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default)]
    pub settings: Settings,

    #[serde(default)]
    pub accounts: Vec<Account>,

    /// Newest first.
    #[serde(default)]
    pub expenses: Vec<Expense>,

    /// Savings pots. Serialized as `savings` for document compatibility.
    #[serde(rename = "savings", default)]
    pub pots: Vec<SavingsPot>,

    /// Newest first.
    #[serde(default)]
    pub savings_transactions: Vec<SavingsTransaction>,

    #[serde(default)]
    pub holdings: Vec<Holding>,

    /// Newest first.
    #[serde(default)]
    pub investment_transactions: Vec<InvestmentTransaction>,

    /// Kept sorted by date, newest first.
    #[serde(default)]
    pub weight_entries: Vec<WeightEntry>,

    #[serde(default)]
    pub calorie_entries: Vec<CalorieEntry>,

    #[serde(default)]
    pub step_entries: Vec<StepEntry>,

    #[serde(default)]
    pub training_entries: Vec<TrainingEntry>,

    /// Append-only change history, newest first.
    #[serde(default)]
    pub audit_log: Vec<AuditLogEntry>,
}

impl AppState {
    /// The fixed initial document: two default accounts, one default
    /// emergency pot, one seed audit entry, everything else empty.
    ///
    /// Default entities carry fixed ids so that merging two fresh
    /// documents does not duplicate them.
    pub fn initial() -> Self {
        let seed = AuditLogEntry {
            id: "init".to_string(),
            timestamp: Utc::now(),
            section: Section::Settings,
            action_type: AuditAction::Add,
            description: "App initialized".to_string(),
            details: None,
        };
        let settings = Settings::default();
        let currency = settings.main_currency.clone();

        Self {
            accounts: vec![
                Account {
                    id: "acc_1".to_string(),
                    name: "Wallet".to_string(),
                    kind: AccountKind::Cash,
                    currency: currency.clone(),
                    opening_balance: 0.0,
                },
                Account {
                    id: "acc_2".to_string(),
                    name: "Main Checking".to_string(),
                    kind: AccountKind::Bank,
                    currency: currency.clone(),
                    opening_balance: 0.0,
                },
            ],
            pots: vec![SavingsPot {
                id: "sav_1".to_string(),
                name: "Emergency Fund".to_string(),
                kind: PotKind::Emergency,
                opening_balance: 0.0,
                target: None,
                currency,
                bank_name: None,
            }],
            expenses: Vec::new(),
            savings_transactions: Vec::new(),
            holdings: Vec::new(),
            investment_transactions: Vec::new(),
            weight_entries: Vec::new(),
            calorie_entries: Vec::new(),
            step_entries: Vec::new(),
            training_entries: Vec::new(),
            audit_log: vec![seed],
            settings,
        }
    }

    // ── Lookups ─────────────────────────────────────────────────────

    pub fn account(&self, id: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    pub fn pot(&self, id: &str) -> Option<&SavingsPot> {
        self.pots.iter().find(|p| p.id == id)
    }

    pub fn holding(&self, id: &str) -> Option<&Holding> {
        self.holdings.iter().find(|h| h.id == id)
    }

    pub fn expense(&self, id: &str) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::initial()
    }
}
