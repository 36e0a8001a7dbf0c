use std::collections::HashSet;

use chrono::Utc;

use crate::actions::Action;
use crate::models::audit::{AuditAction, AuditLogEntry, Section};
use crate::models::state::AppState;

/// What applying an action did.
///
/// `Unchanged` means the document is byte-for-byte what it was: nothing
/// to persist, nobody to notify.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Changed,
    Unchanged,
}

/// Apply one action to the document.
///
/// Total over the action space: never fails, never panics. Every data
/// change prepends exactly one audit entry, except `LoadState`, which
/// replaces the document verbatim. Payload validation is the caller's
/// job; the reducer stores what it is given.
pub fn apply(state: &mut AppState, action: Action) -> Outcome {
    match action {
        Action::LoadState(doc) => {
            *state = *doc;
            Outcome::Changed
        }

        Action::MergeState(doc) => {
            merge(state, *doc);
            log(
                state,
                Section::Settings,
                AuditAction::Edit,
                "Data imported via merge",
            );
            Outcome::Changed
        }

        Action::ResetData => {
            *state = AppState::initial();
            Outcome::Changed
        }

        Action::UpdateSettings(patch) => {
            patch.apply_to(&mut state.settings);
            log(state, Section::Settings, AuditAction::Edit, "Updated settings");
            Outcome::Changed
        }

        // ── Expenses ────────────────────────────────────────────────
        Action::AddExpense(expense) => {
            let desc = format!("Added expense: {} - {}", expense.category, expense.amount);
            state.expenses.insert(0, expense);
            log(state, Section::Cash, AuditAction::Add, desc);
            Outcome::Changed
        }

        Action::EditExpense(expense) => {
            let Some(slot) = state.expenses.iter_mut().find(|e| e.id == expense.id) else {
                return Outcome::Unchanged;
            };
            let desc = format!("Edited expense: {}", expense.category);
            *slot = expense;
            log(state, Section::Cash, AuditAction::Edit, desc);
            Outcome::Changed
        }

        Action::DeleteExpense(id) => {
            let Some(idx) = state.expenses.iter().position(|e| e.id == id) else {
                return Outcome::Unchanged;
            };
            let removed = state.expenses.remove(idx);
            let desc = format!("Deleted expense: {}", removed.category);
            log(state, Section::Cash, AuditAction::Delete, desc);
            Outcome::Changed
        }

        // ── Accounts ────────────────────────────────────────────────
        Action::AddAccount(account) => {
            let desc = format!("Added account: {}", account.name);
            state.accounts.push(account);
            log(state, Section::Cash, AuditAction::Add, desc);
            Outcome::Changed
        }

        Action::EditAccount(account) => {
            let desc = format!("Edited account: {}", account.name);
            if let Some(slot) = state.accounts.iter_mut().find(|a| a.id == account.id) {
                *slot = account;
            }
            log(state, Section::Cash, AuditAction::Edit, desc);
            Outcome::Changed
        }

        Action::DeleteAccount(id) => {
            state.accounts.retain(|a| a.id != id);
            // Expenses keep their history but lose the dangling reference.
            for expense in &mut state.expenses {
                if expense.account_id.as_deref() == Some(id.as_str()) {
                    expense.account_id = None;
                }
            }
            log(state, Section::Cash, AuditAction::Delete, "Deleted account");
            Outcome::Changed
        }

        // ── Savings ─────────────────────────────────────────────────
        Action::AddSavingsPot(pot) => {
            let desc = format!("Added savings pot: {}", pot.name);
            state.pots.push(pot);
            log(state, Section::Cash, AuditAction::Add, desc);
            Outcome::Changed
        }

        Action::EditSavingsPot(pot) => {
            let desc = format!("Edited savings pot: {}", pot.name);
            if let Some(slot) = state.pots.iter_mut().find(|p| p.id == pot.id) {
                *slot = pot;
            }
            log(state, Section::Cash, AuditAction::Edit, desc);
            Outcome::Changed
        }

        Action::DeleteSavingsPot(id) => {
            state.pots.retain(|p| p.id != id);
            // The pot's balance was derived from these; they go with it.
            state.savings_transactions.retain(|t| t.pot_id != id);
            log(state, Section::Cash, AuditAction::Delete, "Deleted savings pot");
            Outcome::Changed
        }

        Action::AddSavingsTx(tx) => {
            let desc = format!("{} savings: {}", tx.kind, tx.amount);
            state.savings_transactions.insert(0, tx);
            log(state, Section::Cash, AuditAction::Add, desc);
            Outcome::Changed
        }

        // ── Investments ─────────────────────────────────────────────
        Action::AddHolding(holding) => {
            let desc = format!("Added holding: {}", holding.symbol);
            state.holdings.push(holding);
            log(state, Section::Invest, AuditAction::Add, desc);
            Outcome::Changed
        }

        Action::EditHolding(holding) => {
            let desc = format!("Edited holding: {}", holding.symbol);
            if let Some(slot) = state.holdings.iter_mut().find(|h| h.id == holding.id) {
                *slot = holding;
            }
            log(state, Section::Invest, AuditAction::Edit, desc);
            Outcome::Changed
        }

        Action::DeleteHolding(id) => {
            state.holdings.retain(|h| h.id != id);
            state.investment_transactions.retain(|t| t.holding_id != id);
            log(state, Section::Invest, AuditAction::Delete, "Deleted holding");
            Outcome::Changed
        }

        Action::UpdateHoldingValue { id, value } => {
            let Some(holding) = state.holdings.iter_mut().find(|h| h.id == id) else {
                return Outcome::Unchanged;
            };
            holding.current_value = value;
            holding.last_value_update = Utc::now();
            let desc = format!("Updated price for {}", holding.symbol);
            log(state, Section::Invest, AuditAction::Edit, desc);
            Outcome::Changed
        }

        Action::AddInvestmentTx(tx) => {
            let symbol = state
                .holding(&tx.holding_id)
                .map(|h| h.symbol.clone())
                .unwrap_or_else(|| "Asset".to_string());
            let desc = format!("{} {}", tx.kind, symbol);
            state.investment_transactions.insert(0, tx);
            log(state, Section::Invest, AuditAction::Add, desc);
            Outcome::Changed
        }

        // ── Health ──────────────────────────────────────────────────
        Action::AddWeight(entry) => {
            let desc = format!("Logged weight: {}", entry.weight);
            state.weight_entries.insert(0, entry);
            sort_weights(state);
            log(state, Section::Health, AuditAction::Add, desc);
            Outcome::Changed
        }

        Action::EditWeight(entry) => {
            if let Some(slot) = state.weight_entries.iter_mut().find(|e| e.id == entry.id) {
                *slot = entry;
            }
            sort_weights(state);
            log(state, Section::Health, AuditAction::Edit, "Updated weight entry");
            Outcome::Changed
        }

        Action::DeleteWeight(id) => {
            state.weight_entries.retain(|e| e.id != id);
            log(state, Section::Health, AuditAction::Delete, "Deleted weight entry");
            Outcome::Changed
        }

        Action::AddCalories(entry) => {
            let desc = format!("Logged calories: {}", entry.calories);
            state.calorie_entries.insert(0, entry);
            log(state, Section::Health, AuditAction::Add, desc);
            Outcome::Changed
        }

        Action::EditCalories(entry) => {
            if let Some(slot) = state.calorie_entries.iter_mut().find(|e| e.id == entry.id) {
                *slot = entry;
            }
            log(state, Section::Health, AuditAction::Edit, "Updated calorie entry");
            Outcome::Changed
        }

        Action::DeleteCalories(id) => {
            state.calorie_entries.retain(|e| e.id != id);
            log(state, Section::Health, AuditAction::Delete, "Deleted calorie entry");
            Outcome::Changed
        }

        Action::AddSteps(entry) => {
            let desc = format!("Logged steps: {}", entry.count);
            state.step_entries.insert(0, entry);
            log(state, Section::Health, AuditAction::Add, desc);
            Outcome::Changed
        }

        Action::EditSteps(entry) => {
            if let Some(slot) = state.step_entries.iter_mut().find(|e| e.id == entry.id) {
                *slot = entry;
            }
            log(state, Section::Health, AuditAction::Edit, "Updated step entry");
            Outcome::Changed
        }

        Action::DeleteSteps(id) => {
            state.step_entries.retain(|e| e.id != id);
            log(state, Section::Health, AuditAction::Delete, "Deleted step entry");
            Outcome::Changed
        }

        Action::AddTraining(entry) => {
            let desc = format!("Logged training: {}", entry.kind);
            state.training_entries.insert(0, entry);
            log(state, Section::Health, AuditAction::Add, desc);
            Outcome::Changed
        }

        Action::EditTraining(entry) => {
            if let Some(slot) = state.training_entries.iter_mut().find(|e| e.id == entry.id) {
                *slot = entry;
            }
            log(state, Section::Health, AuditAction::Edit, "Updated training entry");
            Outcome::Changed
        }

        Action::DeleteTraining(id) => {
            state.training_entries.retain(|e| e.id != id);
            log(state, Section::Health, AuditAction::Delete, "Deleted training session");
            Outcome::Changed
        }
    }
}

/// Prepend an audit entry (newest first).
fn log(state: &mut AppState, section: Section, action_type: AuditAction, description: impl Into<String>) {
    state
        .audit_log
        .insert(0, AuditLogEntry::new(section, action_type, description));
}

/// Keep weight entries sorted by date, newest first. The sort is stable,
/// so same-day entries keep their insertion order.
fn sort_weights(state: &mut AppState) {
    state.weight_entries.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Set-union merge of an imported document into the current one.
///
/// Every list, the audit log included, is merged by id with current
/// records winning on collision. Settings are overwritten by the incoming
/// document.
fn merge(state: &mut AppState, incoming: AppState) {
    union_by_id(&mut state.accounts, incoming.accounts, |a| &a.id);
    union_by_id(&mut state.expenses, incoming.expenses, |e| &e.id);
    union_by_id(&mut state.pots, incoming.pots, |p| &p.id);
    union_by_id(
        &mut state.savings_transactions,
        incoming.savings_transactions,
        |t| &t.id,
    );
    union_by_id(&mut state.holdings, incoming.holdings, |h| &h.id);
    union_by_id(
        &mut state.investment_transactions,
        incoming.investment_transactions,
        |t| &t.id,
    );
    union_by_id(&mut state.weight_entries, incoming.weight_entries, |e| &e.id);
    union_by_id(&mut state.calorie_entries, incoming.calorie_entries, |e| &e.id);
    union_by_id(&mut state.step_entries, incoming.step_entries, |e| &e.id);
    union_by_id(&mut state.training_entries, incoming.training_entries, |e| &e.id);

    union_by_id(&mut state.audit_log, incoming.audit_log, |e| &e.id);
    state.settings = incoming.settings;
}

/// Append incoming records whose id is not already present.
fn union_by_id<T, F>(current: &mut Vec<T>, incoming: Vec<T>, id_of: F)
where
    F: Fn(&T) -> &str,
{
    let existing: HashSet<String> = current.iter().map(|x| id_of(x).to_string()).collect();
    current.extend(incoming.into_iter().filter(|x| !existing.contains(id_of(x))));
}
