// ═══════════════════════════════════════════════════════════════════
// Reducer Tests — action application, audit trail, merge/replace/reset
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;

use life_dashboard_core::actions::{Action, SettingsPatch};
use life_dashboard_core::models::audit::{AuditAction, Section};
use life_dashboard_core::models::health::{CalorieEntry, Intensity, StepEntry, TrainingEntry, WeightEntry};
use life_dashboard_core::models::invest::{
    AssetClass, Holding, InvestmentAction, InvestmentTransaction,
};
use life_dashboard_core::models::money::{Account, AccountKind, Expense};
use life_dashboard_core::models::savings::{PotKind, SavingsPot, SavingsTransaction};
use life_dashboard_core::models::state::AppState;
use life_dashboard_core::reducer::{apply, Outcome};
use life_dashboard_core::services::money_service::MoneyService;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn expense(amount: f64, date: NaiveDate) -> Expense {
    Expense::new(date, amount, "RON", "Food")
}

// ═══════════════════════════════════════════════════════════════════
//  Expenses & account balances
// ═══════════════════════════════════════════════════════════════════

mod expenses {
    use super::*;

    #[test]
    fn add_prepends_to_list() {
        let mut state = AppState::initial();
        apply(&mut state, Action::AddExpense(expense(10.0, d(2026, 1, 1))));
        apply(&mut state, Action::AddExpense(expense(20.0, d(2026, 1, 2))));
        assert_eq!(state.expenses.len(), 2);
        assert_eq!(state.expenses[0].amount, 20.0);
    }

    #[test]
    fn add_logs_category_and_amount() {
        let mut state = AppState::initial();
        apply(&mut state, Action::AddExpense(expense(50.0, d(2026, 1, 1))));
        let entry = &state.audit_log[0];
        assert_eq!(entry.description, "Added expense: Food - 50");
        assert_eq!(entry.section, Section::Cash);
        assert_eq!(entry.action_type, AuditAction::Add);
    }

    #[test]
    fn add_against_account_debits_derived_balance() {
        let money = MoneyService::new();
        let mut state = AppState::initial();
        apply(
            &mut state,
            Action::AddExpense(expense(50.0, d(2026, 1, 1)).with_account("acc_1")),
        );
        assert_eq!(money.account_balance(&state, "acc_1"), -50.0);
        assert_eq!(money.account_balance(&state, "acc_2"), 0.0);
    }

    #[test]
    fn add_without_account_affects_no_balance() {
        let money = MoneyService::new();
        let mut state = AppState::initial();
        apply(&mut state, Action::AddExpense(expense(50.0, d(2026, 1, 1))));
        assert_eq!(money.account_balance(&state, "acc_1"), 0.0);
        assert_eq!(money.account_balance(&state, "acc_2"), 0.0);
    }

    #[test]
    fn edit_moves_effect_between_accounts() {
        // Add X against A, move it to C, delete it: every balance ends
        // where it started.
        let money = MoneyService::new();
        let mut state = AppState::initial();
        let e = expense(75.0, d(2026, 1, 1)).with_account("acc_1");
        let id = e.id.clone();
        apply(&mut state, Action::AddExpense(e.clone()));
        assert_eq!(money.account_balance(&state, "acc_1"), -75.0);

        let mut moved = e.clone();
        moved.account_id = Some("acc_2".to_string());
        apply(&mut state, Action::EditExpense(moved));
        assert_eq!(money.account_balance(&state, "acc_1"), 0.0);
        assert_eq!(money.account_balance(&state, "acc_2"), -75.0);

        apply(&mut state, Action::DeleteExpense(id));
        assert_eq!(money.account_balance(&state, "acc_1"), 0.0);
        assert_eq!(money.account_balance(&state, "acc_2"), 0.0);
    }

    #[test]
    fn edit_replaces_record_in_place() {
        let mut state = AppState::initial();
        let e = expense(10.0, d(2026, 1, 1));
        let id = e.id.clone();
        apply(&mut state, Action::AddExpense(e.clone()));

        let mut edited = e;
        edited.amount = 99.0;
        edited.category = "Travel".to_string();
        apply(&mut state, Action::EditExpense(edited));

        assert_eq!(state.expenses.len(), 1);
        assert_eq!(state.expenses[0].id, id);
        assert_eq!(state.expenses[0].amount, 99.0);
        assert_eq!(state.audit_log[0].description, "Edited expense: Travel");
    }

    #[test]
    fn edit_unknown_id_changes_nothing() {
        let mut state = AppState::initial();
        apply(&mut state, Action::AddExpense(expense(10.0, d(2026, 1, 1))));
        let before = state.clone();

        let ghost = expense(1.0, d(2026, 1, 1));
        let outcome = apply(&mut state, Action::EditExpense(ghost));
        assert_eq!(outcome, Outcome::Unchanged);
        assert_eq!(state, before);
    }

    #[test]
    fn delete_unknown_id_changes_nothing() {
        let mut state = AppState::initial();
        let before = state.clone();
        let outcome = apply(&mut state, Action::DeleteExpense("nope".to_string()));
        assert_eq!(outcome, Outcome::Unchanged);
        assert_eq!(state, before);
    }

    #[test]
    fn delete_logs_removed_category() {
        let mut state = AppState::initial();
        let e = expense(10.0, d(2026, 1, 1));
        let id = e.id.clone();
        apply(&mut state, Action::AddExpense(e));
        apply(&mut state, Action::DeleteExpense(id));
        assert_eq!(state.audit_log[0].description, "Deleted expense: Food");
        assert_eq!(state.audit_log[0].action_type, AuditAction::Delete);
        assert!(state.expenses.is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Accounts
// ═══════════════════════════════════════════════════════════════════

mod accounts {
    use super::*;

    #[test]
    fn add_appends_and_logs_name() {
        let mut state = AppState::initial();
        apply(
            &mut state,
            Action::AddAccount(Account::new("Card", AccountKind::Card, "RON", 100.0)),
        );
        assert_eq!(state.accounts.len(), 3);
        assert_eq!(state.audit_log[0].description, "Added account: Card");
    }

    #[test]
    fn edit_replaces_by_id() {
        let mut state = AppState::initial();
        let mut edited = state.accounts[0].clone();
        edited.name = "Pocket".to_string();
        edited.opening_balance = 20.0;
        apply(&mut state, Action::EditAccount(edited));
        assert_eq!(state.accounts[0].name, "Pocket");
        assert_eq!(state.accounts[0].opening_balance, 20.0);
    }

    #[test]
    fn delete_nulls_expense_references() {
        let mut state = AppState::initial();
        apply(
            &mut state,
            Action::AddExpense(expense(10.0, d(2026, 1, 1)).with_account("acc_1")),
        );
        apply(&mut state, Action::DeleteAccount("acc_1".to_string()));

        assert_eq!(state.accounts.len(), 1);
        assert!(state.expenses[0].account_id.is_none());
        assert_eq!(state.audit_log[0].description, "Deleted account");
    }

    #[test]
    fn delete_keeps_other_references_intact() {
        let mut state = AppState::initial();
        apply(
            &mut state,
            Action::AddExpense(expense(10.0, d(2026, 1, 1)).with_account("acc_2")),
        );
        apply(&mut state, Action::DeleteAccount("acc_1".to_string()));
        assert_eq!(state.expenses[0].account_id.as_deref(), Some("acc_2"));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Savings
// ═══════════════════════════════════════════════════════════════════

mod savings {
    use super::*;

    #[test]
    fn deposit_raises_derived_balance() {
        let money = MoneyService::new();
        let mut state = AppState::initial();
        apply(
            &mut state,
            Action::AddSavingsTx(SavingsTransaction::deposit("sav_1", d(2026, 1, 5), 100.0)),
        );
        assert_eq!(money.pot_balance(&state, "sav_1"), 100.0);
        assert_eq!(state.audit_log[0].description, "DEPOSIT savings: 100");
    }

    #[test]
    fn withdraw_can_go_negative() {
        let money = MoneyService::new();
        let mut state = AppState::initial();
        apply(
            &mut state,
            Action::AddSavingsTx(SavingsTransaction::withdraw("sav_1", d(2026, 1, 5), 40.0)),
        );
        assert_eq!(money.pot_balance(&state, "sav_1"), -40.0);
        assert_eq!(state.audit_log[0].description, "WITHDRAW savings: 40");
    }

    #[test]
    fn tx_against_unknown_pot_is_still_recorded() {
        let mut state = AppState::initial();
        let outcome = apply(
            &mut state,
            Action::AddSavingsTx(SavingsTransaction::deposit("ghost", d(2026, 1, 5), 10.0)),
        );
        assert_eq!(outcome, Outcome::Changed);
        assert_eq!(state.savings_transactions.len(), 1);
    }

    #[test]
    fn delete_pot_removes_its_transactions() {
        let mut state = AppState::initial();
        let pot = SavingsPot::new("Holiday", PotKind::Regular, "RON");
        let pot_id = pot.id.clone();
        apply(&mut state, Action::AddSavingsPot(pot));
        apply(
            &mut state,
            Action::AddSavingsTx(SavingsTransaction::deposit(&pot_id, d(2026, 1, 5), 10.0)),
        );
        apply(
            &mut state,
            Action::AddSavingsTx(SavingsTransaction::deposit("sav_1", d(2026, 1, 6), 20.0)),
        );

        apply(&mut state, Action::DeleteSavingsPot(pot_id));
        assert_eq!(state.pots.len(), 1);
        assert_eq!(state.savings_transactions.len(), 1);
        assert_eq!(state.savings_transactions[0].pot_id, "sav_1");
    }

    #[test]
    fn edit_pot_changes_target() {
        let mut state = AppState::initial();
        let mut edited = state.pots[0].clone();
        edited.target = Some(10_000.0);
        apply(&mut state, Action::EditSavingsPot(edited));
        assert_eq!(state.pots[0].target, Some(10_000.0));
        assert_eq!(
            state.audit_log[0].description,
            "Edited savings pot: Emergency Fund"
        );
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Investments
// ═══════════════════════════════════════════════════════════════════

mod investments {
    use super::*;

    fn holding(value: f64) -> Holding {
        Holding::new("VWCE", "All-World", AssetClass::Etf, "EUR", value)
    }

    #[test]
    fn add_holding_logs_symbol() {
        let mut state = AppState::initial();
        apply(&mut state, Action::AddHolding(holding(1000.0)));
        assert_eq!(state.holdings.len(), 1);
        assert_eq!(state.audit_log[0].description, "Added holding: VWCE");
    }

    #[test]
    fn update_value_replaces_and_stamps() {
        let mut state = AppState::initial();
        let h = holding(1000.0);
        let id = h.id.clone();
        let stamped_at_add = h.last_value_update;
        apply(&mut state, Action::AddHolding(h));
        apply(
            &mut state,
            Action::UpdateHoldingValue {
                id: id.clone(),
                value: 1100.0,
            },
        );
        assert_eq!(state.holdings[0].current_value, 1100.0);
        assert!(state.holdings[0].last_value_update >= stamped_at_add);
        assert_eq!(state.audit_log[0].description, "Updated price for VWCE");
    }

    #[test]
    fn update_value_records_no_transaction() {
        let mut state = AppState::initial();
        let h = holding(1000.0);
        let id = h.id.clone();
        apply(&mut state, Action::AddHolding(h));
        apply(&mut state, Action::UpdateHoldingValue { id, value: 1100.0 });
        assert!(state.investment_transactions.is_empty());
    }

    #[test]
    fn update_value_unknown_id_changes_nothing() {
        let mut state = AppState::initial();
        let before = state.clone();
        let outcome = apply(
            &mut state,
            Action::UpdateHoldingValue {
                id: "ghost".to_string(),
                value: 1.0,
            },
        );
        assert_eq!(outcome, Outcome::Unchanged);
        assert_eq!(state, before);
    }

    #[test]
    fn add_tx_does_not_touch_holding_value() {
        let mut state = AppState::initial();
        let h = holding(1000.0);
        let id = h.id.clone();
        apply(&mut state, Action::AddHolding(h));
        apply(
            &mut state,
            Action::AddInvestmentTx(InvestmentTransaction::deposit(&id, d(2026, 1, 5), 500.0)),
        );
        assert_eq!(state.holdings[0].current_value, 1000.0);
        assert_eq!(state.investment_transactions.len(), 1);
        assert_eq!(state.audit_log[0].description, "DEPOSIT VWCE");
    }

    #[test]
    fn add_tx_for_unknown_holding_logs_asset() {
        let mut state = AppState::initial();
        let mut tx = InvestmentTransaction::new("ghost", d(2026, 1, 5), InvestmentAction::Buy);
        tx.quantity = Some(1.0);
        apply(&mut state, Action::AddInvestmentTx(tx));
        assert_eq!(state.investment_transactions.len(), 1);
        assert_eq!(state.audit_log[0].description, "BUY Asset");
    }

    #[test]
    fn delete_holding_removes_its_transactions() {
        let mut state = AppState::initial();
        let h = holding(1000.0);
        let id = h.id.clone();
        apply(&mut state, Action::AddHolding(h));
        apply(
            &mut state,
            Action::AddInvestmentTx(InvestmentTransaction::deposit(&id, d(2026, 1, 5), 500.0)),
        );
        apply(&mut state, Action::DeleteHolding(id));
        assert!(state.holdings.is_empty());
        assert!(state.investment_transactions.is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Health entries
// ═══════════════════════════════════════════════════════════════════

mod health {
    use super::*;

    #[test]
    fn weights_stay_sorted_newest_first() {
        let mut state = AppState::initial();
        apply(&mut state, Action::AddWeight(WeightEntry::new(d(2026, 1, 10), 80.0)));
        apply(&mut state, Action::AddWeight(WeightEntry::new(d(2026, 1, 20), 79.0)));
        apply(&mut state, Action::AddWeight(WeightEntry::new(d(2026, 1, 15), 79.5)));

        let dates: Vec<NaiveDate> = state.weight_entries.iter().map(|w| w.date).collect();
        assert_eq!(dates, vec![d(2026, 1, 20), d(2026, 1, 15), d(2026, 1, 10)]);
    }

    #[test]
    fn weight_edit_resorts() {
        let mut state = AppState::initial();
        let early = WeightEntry::new(d(2026, 1, 1), 80.0);
        let early_id = early.id.clone();
        apply(&mut state, Action::AddWeight(early));
        apply(&mut state, Action::AddWeight(WeightEntry::new(d(2026, 1, 10), 79.0)));

        let mut moved = state.weight_entries[1].clone();
        assert_eq!(moved.id, early_id);
        moved.date = d(2026, 1, 20);
        apply(&mut state, Action::EditWeight(moved));
        assert_eq!(state.weight_entries[0].id, early_id);
    }

    #[test]
    fn add_weight_logs_value() {
        let mut state = AppState::initial();
        apply(&mut state, Action::AddWeight(WeightEntry::new(d(2026, 1, 1), 79.5)));
        assert_eq!(state.audit_log[0].description, "Logged weight: 79.5");
    }

    #[test]
    fn calories_and_steps_prepend() {
        let mut state = AppState::initial();
        apply(&mut state, Action::AddCalories(CalorieEntry::new(d(2026, 1, 1), 600)));
        apply(&mut state, Action::AddCalories(CalorieEntry::new(d(2026, 1, 1), 400)));
        apply(&mut state, Action::AddSteps(StepEntry::new(d(2026, 1, 1), 4000)));

        assert_eq!(state.calorie_entries[0].calories, 400);
        assert_eq!(state.audit_log[0].description, "Logged steps: 4000");
        assert_eq!(state.audit_log[1].description, "Logged calories: 400");
    }

    #[test]
    fn delete_training_logs_session() {
        let mut state = AppState::initial();
        let t = TrainingEntry::new(d(2026, 1, 1), "Workout", 45, Intensity::Medium);
        let id = t.id.clone();
        apply(&mut state, Action::AddTraining(t));
        assert_eq!(state.audit_log[0].description, "Logged training: Workout");

        apply(&mut state, Action::DeleteTraining(id));
        assert!(state.training_entries.is_empty());
        assert_eq!(state.audit_log[0].description, "Deleted training session");
    }

    #[test]
    fn edit_calories_replaces_record() {
        let mut state = AppState::initial();
        let c = CalorieEntry::new(d(2026, 1, 1), 600);
        let id = c.id.clone();
        apply(&mut state, Action::AddCalories(c));

        let mut edited = state.calorie_entries[0].clone();
        edited.calories = 650;
        apply(&mut state, Action::EditCalories(edited));
        assert_eq!(state.calorie_entries[0].id, id);
        assert_eq!(state.calorie_entries[0].calories, 650);
        assert_eq!(state.audit_log[0].description, "Updated calorie entry");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Settings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[test]
    fn patch_merges_only_given_fields() {
        let mut state = AppState::initial();
        apply(
            &mut state,
            Action::UpdateSettings(SettingsPatch {
                exchange_rate: Some(5.0),
                goal_weight_kg: Some(75.0),
                ..SettingsPatch::default()
            }),
        );
        assert_eq!(state.settings.exchange_rate, 5.0);
        assert_eq!(state.settings.goal_weight_kg, Some(75.0));
        assert_eq!(state.settings.name, "User");
        assert_eq!(state.settings.main_currency, "RON");
        assert_eq!(state.audit_log[0].description, "Updated settings");
    }

    #[test]
    fn patch_accepts_unvalidated_values() {
        // Validation is the caller's job; the reducer stores what it gets.
        let mut state = AppState::initial();
        apply(
            &mut state,
            Action::UpdateSettings(SettingsPatch {
                exchange_rate: Some(-1.0),
                ..SettingsPatch::default()
            }),
        );
        assert_eq!(state.settings.exchange_rate, -1.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Load / merge / reset
// ═══════════════════════════════════════════════════════════════════

mod lifecycle {
    use super::*;

    fn populated() -> AppState {
        let mut state = AppState::initial();
        apply(&mut state, Action::AddExpense(expense(10.0, d(2026, 1, 1))));
        apply(
            &mut state,
            Action::AddSavingsTx(SavingsTransaction::deposit("sav_1", d(2026, 1, 2), 50.0)),
        );
        apply(
            &mut state,
            Action::AddHolding(Holding::new("BTC", "Bitcoin", AssetClass::Crypto, "EUR", 500.0)),
        );
        state
    }

    #[test]
    fn load_state_replaces_verbatim_without_audit() {
        let mut state = AppState::initial();
        let doc = populated();
        apply(&mut state, Action::LoadState(Box::new(doc.clone())));
        assert_eq!(state, doc);
    }

    #[test]
    fn reset_restores_initial_document() {
        let mut state = populated();
        apply(&mut state, Action::ResetData);

        assert_eq!(state.accounts.len(), 2);
        assert_eq!(state.accounts[0].name, "Wallet");
        assert_eq!(state.accounts[1].name, "Main Checking");
        assert_eq!(state.accounts.iter().map(|a| a.opening_balance).sum::<f64>(), 0.0);
        assert_eq!(state.pots.len(), 1);
        assert_eq!(state.pots[0].name, "Emergency Fund");
        assert!(state.expenses.is_empty());
        assert!(state.savings_transactions.is_empty());
        assert!(state.holdings.is_empty());
        assert!(state.investment_transactions.is_empty());
        assert_eq!(state.audit_log.len(), 1);
    }

    #[test]
    fn merge_appends_unknown_records() {
        let mut state = AppState::initial();
        let mut other = AppState::initial();
        apply(&mut other, Action::AddExpense(expense(10.0, d(2026, 1, 1))));
        apply(
            &mut other,
            Action::AddHolding(Holding::new("BTC", "Bitcoin", AssetClass::Crypto, "EUR", 500.0)),
        );

        apply(&mut state, Action::MergeState(Box::new(other)));
        assert_eq!(state.expenses.len(), 1);
        assert_eq!(state.holdings.len(), 1);
        // Default accounts share fixed ids, so they do not duplicate.
        assert_eq!(state.accounts.len(), 2);
        assert_eq!(state.pots.len(), 1);
    }

    #[test]
    fn merge_keeps_current_record_on_id_collision() {
        let mut state = AppState::initial();
        let mut other = AppState::initial();
        other.accounts[0].name = "Imported Wallet".to_string();

        apply(&mut state, Action::MergeState(Box::new(other)));
        assert_eq!(state.accounts[0].name, "Wallet");
    }

    #[test]
    fn merge_overwrites_settings_with_incoming() {
        let mut state = AppState::initial();
        let mut other = AppState::initial();
        other.settings.exchange_rate = 5.25;
        other.settings.name = "Imported".to_string();

        apply(&mut state, Action::MergeState(Box::new(other)));
        assert_eq!(state.settings.exchange_rate, 5.25);
        assert_eq!(state.settings.name, "Imported");
    }

    #[test]
    fn merge_prepends_one_merge_entry() {
        let mut state = AppState::initial();
        let other = AppState::initial();
        apply(&mut state, Action::MergeState(Box::new(other)));
        assert_eq!(state.audit_log[0].description, "Data imported via merge");
        assert_eq!(state.audit_log[0].section, Section::Settings);
    }

    #[test]
    fn merging_document_into_itself_adds_nothing_but_the_merge_entry() {
        let mut state = populated();
        let before = state.clone();

        apply(&mut state, Action::MergeState(Box::new(before.clone())));

        assert_eq!(state.expenses, before.expenses);
        assert_eq!(state.accounts, before.accounts);
        assert_eq!(state.pots, before.pots);
        assert_eq!(state.savings_transactions, before.savings_transactions);
        assert_eq!(state.holdings, before.holdings);
        assert_eq!(state.audit_log.len(), before.audit_log.len() + 1);
        assert_eq!(state.audit_log[0].description, "Data imported via merge");
    }
}
