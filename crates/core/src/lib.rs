pub mod actions;
pub mod errors;
pub mod models;
pub mod reducer;
pub mod services;
pub mod storage;

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use log::info;

use actions::{Action, SettingsPatch};
use errors::CoreError;
use models::analytics::{
    CategorySpend, DayMetrics, HoldingPerformance, MonthlySnapshot, MonthlySummary,
    PeriodComparison, PeriodSummary, PotOverview, StreakSummary,
};
use models::health::{CalorieEntry, StepEntry, TrainingEntry, WeightEntry};
use models::invest::{Holding, InvestmentTransaction};
use models::money::{Account, Expense};
use models::range::DateRange;
use models::savings::{SavingsPot, SavingsTransaction};
use models::state::AppState;
use reducer::Outcome;
use services::health_service::HealthService;
use services::invest_service::InvestService;
use services::money_service::MoneyService;
use storage::import::{ImportMode, PendingImport};
use storage::manager::StorageManager;

/// Handle returned by [`LifeDashboard::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn Fn(&AppState)>;

/// Main entry point for the Life Dashboard core library.
///
/// Holds the aggregate document and is its single mutation entry point:
/// every change goes through [`dispatch`](Self::dispatch) (directly or via
/// a typed convenience method), which runs the reducer, writes the whole
/// document through to storage, and notifies subscribers. Reads go through
/// [`state`](Self::state) or the derived-metric methods.
#[must_use]
pub struct LifeDashboard {
    state: AppState,
    /// Write-through target. `None` keeps the document in memory only.
    path: Option<PathBuf>,
    money_service: MoneyService,
    invest_service: InvestService,
    health_service: HealthService,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl std::fmt::Debug for LifeDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifeDashboard")
            .field("accounts", &self.state.accounts.len())
            .field("expenses", &self.state.expenses.len())
            .field("holdings", &self.state.holdings.len())
            .field("audit_entries", &self.state.audit_log.len())
            .field("path", &self.path)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl LifeDashboard {
    /// A fresh in-memory dashboard with the initial document. Nothing is
    /// persisted until a storage path is attached via [`Self::open`].
    pub fn create_new() -> Self {
        Self::build(AppState::initial(), None)
    }

    /// Wrap an existing document (e.g. one restored by the caller).
    pub fn with_state(state: AppState) -> Self {
        Self::build(state, None)
    }

    /// Open the dashboard backed by a storage file. A missing file starts
    /// the initial document; a corrupted one is discarded with a warning
    /// and the initial document is used instead. Every subsequent
    /// mutation writes the full document back to this path.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = StorageManager::load_or_default(&path);
        Self::build(state, Some(path))
    }

    /// The current document. Read-only; mutations go through
    /// [`dispatch`](Self::dispatch).
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub fn storage_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    // ── Dispatch ────────────────────────────────────────────────────

    /// Apply one action. If it changed the document, write it through to
    /// storage and notify subscribers. Actions that change nothing (e.g.
    /// editing an id that does not exist) write nothing and notify nobody.
    pub fn dispatch(&mut self, action: Action) -> Result<Outcome, CoreError> {
        let outcome = reducer::apply(&mut self.state, action);
        if outcome == Outcome::Changed {
            self.persist()?;
            self.notify();
        }
        Ok(outcome)
    }

    fn persist(&self) -> Result<(), CoreError> {
        if let Some(path) = &self.path {
            StorageManager::save_to_file(&self.state, path)?;
        }
        Ok(())
    }

    fn notify(&self) {
        for (_, subscriber) in &self.subscribers {
            subscriber(&self.state);
        }
    }

    // ── Subscriptions ───────────────────────────────────────────────

    /// Register a callback invoked with the new document after every
    /// applied mutation.
    pub fn subscribe(&mut self, subscriber: impl Fn(&AppState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Remove a subscriber. Returns `false` when the id is unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    // ── Money ───────────────────────────────────────────────────────

    /// Record an expense. Returns the expense id.
    pub fn add_expense(&mut self, expense: Expense) -> Result<String, CoreError> {
        let id = expense.id.clone();
        self.dispatch(Action::AddExpense(expense))?;
        Ok(id)
    }

    pub fn edit_expense(&mut self, expense: Expense) -> Result<Outcome, CoreError> {
        self.dispatch(Action::EditExpense(expense))
    }

    pub fn delete_expense(&mut self, id: &str) -> Result<Outcome, CoreError> {
        self.dispatch(Action::DeleteExpense(id.to_string()))
    }

    pub fn add_account(&mut self, account: Account) -> Result<String, CoreError> {
        let id = account.id.clone();
        self.dispatch(Action::AddAccount(account))?;
        Ok(id)
    }

    pub fn edit_account(&mut self, account: Account) -> Result<Outcome, CoreError> {
        self.dispatch(Action::EditAccount(account))
    }

    pub fn delete_account(&mut self, id: &str) -> Result<Outcome, CoreError> {
        self.dispatch(Action::DeleteAccount(id.to_string()))
    }

    #[must_use]
    pub fn account_balance(&self, account_id: &str) -> f64 {
        self.money_service.account_balance(&self.state, account_id)
    }

    /// Net worth in the main currency: accounts + pots + holdings.
    #[must_use]
    pub fn net_worth(&self) -> f64 {
        self.money_service.net_worth(&self.state)
    }

    #[must_use]
    pub fn period_summary(&self, range: &DateRange) -> PeriodSummary {
        self.money_service.period_summary(&self.state, range)
    }

    #[must_use]
    pub fn period_comparison(&self, range: &DateRange) -> Option<PeriodComparison> {
        self.money_service.period_comparison(&self.state, range)
    }

    #[must_use]
    pub fn spending_by_category(&self, range: &DateRange) -> Vec<CategorySpend> {
        self.money_service.spending_by_category(&self.state, range)
    }

    #[must_use]
    pub fn monthly_summary(&self, month_of: NaiveDate) -> MonthlySummary {
        self.money_service.monthly_summary(&self.state, month_of)
    }

    // ── Savings ─────────────────────────────────────────────────────

    pub fn add_pot(&mut self, pot: SavingsPot) -> Result<String, CoreError> {
        let id = pot.id.clone();
        self.dispatch(Action::AddSavingsPot(pot))?;
        Ok(id)
    }

    pub fn edit_pot(&mut self, pot: SavingsPot) -> Result<Outcome, CoreError> {
        self.dispatch(Action::EditSavingsPot(pot))
    }

    pub fn delete_pot(&mut self, id: &str) -> Result<Outcome, CoreError> {
        self.dispatch(Action::DeleteSavingsPot(id.to_string()))
    }

    /// Deposit into a pot on `date`. Returns the transaction id.
    pub fn deposit_to_pot(
        &mut self,
        pot_id: &str,
        date: NaiveDate,
        amount: f64,
    ) -> Result<String, CoreError> {
        let tx = SavingsTransaction::deposit(pot_id, date, amount);
        let id = tx.id.clone();
        self.dispatch(Action::AddSavingsTx(tx))?;
        Ok(id)
    }

    /// Withdraw from a pot on `date`. Balances may go negative.
    pub fn withdraw_from_pot(
        &mut self,
        pot_id: &str,
        date: NaiveDate,
        amount: f64,
    ) -> Result<String, CoreError> {
        let tx = SavingsTransaction::withdraw(pot_id, date, amount);
        let id = tx.id.clone();
        self.dispatch(Action::AddSavingsTx(tx))?;
        Ok(id)
    }

    #[must_use]
    pub fn pot_balance(&self, pot_id: &str) -> f64 {
        self.money_service.pot_balance(&self.state, pot_id)
    }

    /// Progress toward a pot's target, clamped at 100%.
    #[must_use]
    pub fn goal_progress(&self, pot_id: &str) -> Option<f64> {
        self.money_service.goal_progress(&self.state, pot_id)
    }

    #[must_use]
    pub fn months_to_target(&self, pot_id: &str, today: NaiveDate) -> Option<u32> {
        self.money_service.months_to_target(&self.state, pot_id, today)
    }

    #[must_use]
    pub fn pot_overview(&self, today: NaiveDate) -> Vec<PotOverview> {
        self.money_service.pot_overview(&self.state, today)
    }

    // ── Investments ─────────────────────────────────────────────────

    pub fn add_holding(&mut self, holding: Holding) -> Result<String, CoreError> {
        let id = holding.id.clone();
        self.dispatch(Action::AddHolding(holding))?;
        Ok(id)
    }

    pub fn edit_holding(&mut self, holding: Holding) -> Result<Outcome, CoreError> {
        self.dispatch(Action::EditHolding(holding))
    }

    pub fn delete_holding(&mut self, id: &str) -> Result<Outcome, CoreError> {
        self.dispatch(Action::DeleteHolding(id.to_string()))
    }

    /// Replace a holding's current value. Records no history by itself;
    /// use [`Self::record_valuation`] to also keep a snapshot.
    pub fn update_holding_value(&mut self, id: &str, value: f64) -> Result<Outcome, CoreError> {
        self.dispatch(Action::UpdateHoldingValue {
            id: id.to_string(),
            value,
        })
    }

    /// Update a holding's value and record the snapshot transaction, so
    /// the monthly history sees it.
    pub fn record_valuation(
        &mut self,
        holding_id: &str,
        date: NaiveDate,
        value: f64,
    ) -> Result<(), CoreError> {
        self.dispatch(Action::UpdateHoldingValue {
            id: holding_id.to_string(),
            value,
        })?;
        let tx = InvestmentTransaction::valuation_snapshot(holding_id, date, value);
        self.dispatch(Action::AddInvestmentTx(tx))?;
        Ok(())
    }

    pub fn record_investment_tx(&mut self, tx: InvestmentTransaction) -> Result<String, CoreError> {
        let id = tx.id.clone();
        self.dispatch(Action::AddInvestmentTx(tx))?;
        Ok(id)
    }

    #[must_use]
    pub fn monthly_snapshots(&self, holding_id: &str, today: NaiveDate) -> Vec<MonthlySnapshot> {
        self.invest_service
            .monthly_snapshots(&self.state, holding_id, today)
    }

    #[must_use]
    pub fn holding_performance(
        &self,
        holding_id: &str,
        today: NaiveDate,
    ) -> Option<HoldingPerformance> {
        self.invest_service
            .holding_performance(&self.state, holding_id, today)
    }

    #[must_use]
    pub fn net_invested(&self, holding_id: &str) -> f64 {
        self.invest_service.net_invested(&self.state, holding_id)
    }

    /// Total holding value in the main currency.
    #[must_use]
    pub fn total_investment_value(&self) -> f64 {
        self.invest_service.total_value(&self.state)
    }

    // ── Health ──────────────────────────────────────────────────────

    pub fn log_weight(&mut self, entry: WeightEntry) -> Result<String, CoreError> {
        let id = entry.id.clone();
        self.dispatch(Action::AddWeight(entry))?;
        Ok(id)
    }

    pub fn log_calories(&mut self, entry: CalorieEntry) -> Result<String, CoreError> {
        let id = entry.id.clone();
        self.dispatch(Action::AddCalories(entry))?;
        Ok(id)
    }

    pub fn log_steps(&mut self, entry: StepEntry) -> Result<String, CoreError> {
        let id = entry.id.clone();
        self.dispatch(Action::AddSteps(entry))?;
        Ok(id)
    }

    pub fn log_training(&mut self, entry: TrainingEntry) -> Result<String, CoreError> {
        let id = entry.id.clone();
        self.dispatch(Action::AddTraining(entry))?;
        Ok(id)
    }

    #[must_use]
    pub fn calorie_streak(&self, today: NaiveDate) -> u32 {
        self.health_service.calorie_streak(&self.state, today)
    }

    #[must_use]
    pub fn step_streak(&self, today: NaiveDate) -> u32 {
        self.health_service.step_streak(&self.state, today)
    }

    #[must_use]
    pub fn workout_streak(&self, today: NaiveDate) -> u32 {
        self.health_service.workout_streak(&self.state, today)
    }

    #[must_use]
    pub fn streaks(&self, today: NaiveDate) -> StreakSummary {
        self.health_service.streaks(&self.state, today)
    }

    #[must_use]
    pub fn current_weight(&self) -> f64 {
        self.health_service.current_weight(&self.state)
    }

    #[must_use]
    pub fn weeks_to_goal(&self, today: NaiveDate) -> Option<u32> {
        self.health_service.weeks_to_goal(&self.state, today)
    }

    #[must_use]
    pub fn daily_timeline(&self, range: &DateRange) -> Vec<DayMetrics> {
        self.health_service.daily_timeline(&self.state, range)
    }

    // ── Settings & lifecycle ────────────────────────────────────────

    pub fn update_settings(&mut self, patch: SettingsPatch) -> Result<Outcome, CoreError> {
        self.dispatch(Action::UpdateSettings(patch))
    }

    /// Factory reset: replace everything with the initial document. The
    /// caller is responsible for confirming with the user first.
    pub fn reset(&mut self) -> Result<(), CoreError> {
        self.dispatch(Action::ResetData)?;
        Ok(())
    }

    // ── Export / Import ─────────────────────────────────────────────

    /// Export the full document as pretty-printed JSON with the backup
    /// timestamp stamped into its settings. The in-memory settings record
    /// the same timestamp (the export file itself carries no audit entry
    /// for that update).
    pub fn export_json(&mut self) -> Result<String, CoreError> {
        let now = Utc::now();
        let mut doc = self.state.clone();
        doc.settings.last_backup_date = Some(now);
        let json = serde_json::to_string_pretty(&doc)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize export: {e}")))?;
        self.dispatch(Action::UpdateSettings(SettingsPatch {
            last_backup_date: Some(now),
            ..SettingsPatch::default()
        }))?;
        Ok(json)
    }

    /// Parse a foreign document and summarize it for user confirmation.
    /// Nothing is applied until [`Self::apply_import`].
    pub fn preview_import(&self, json: &str) -> Result<PendingImport, CoreError> {
        storage::import::parse_import(json)
    }

    /// Apply a previewed import: replace the document wholesale, or merge
    /// it in by id.
    pub fn apply_import(
        &mut self,
        pending: PendingImport,
        mode: ImportMode,
    ) -> Result<(), CoreError> {
        info!(
            "importing document ({} accounts, {} transactions, mode {mode:?})",
            pending.summary.accounts, pending.summary.transactions
        );
        let action = match mode {
            ImportMode::Replace => Action::LoadState(Box::new(pending.state)),
            ImportMode::Merge => Action::MergeState(Box::new(pending.state)),
        };
        self.dispatch(action)?;
        Ok(())
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(state: AppState, path: Option<PathBuf>) -> Self {
        Self {
            state,
            path,
            money_service: MoneyService::new(),
            invest_service: InvestService::new(),
            health_service: HealthService::new(),
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }
}
