use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};

use crate::models::analytics::{
    CategorySpend, MonthlySummary, PeriodComparison, PeriodSummary, PotOverview,
};
use crate::models::range::{same_month, start_of_month, DateRange};
use crate::models::savings::SavingsTxKind;
use crate::models::settings::Settings;
use crate::models::state::AppState;

/// Money-side derived metrics: balances, net worth, goal progress, and
/// time-bucketed spend/save summaries.
///
/// Everything here is recomputed from the raw records on every call —
/// nothing is cached or incrementally maintained. Balances in particular
/// are never stored: an account or pot balance is always its opening
/// balance plus the signed effect of its transactions, so the stored
/// document cannot drift from its history.
pub struct MoneyService;

impl MoneyService {
    pub fn new() -> Self {
        Self
    }

    // ── Balances ────────────────────────────────────────────────────

    /// Current balance of an account: opening balance minus the expenses
    /// it owns. Unknown ids report 0.
    pub fn account_balance(&self, state: &AppState, account_id: &str) -> f64 {
        let opening = state
            .account(account_id)
            .map(|a| a.opening_balance)
            .unwrap_or(0.0);
        let spent: f64 = state
            .expenses
            .iter()
            .filter(|e| e.account_id.as_deref() == Some(account_id))
            .map(|e| e.amount)
            .sum();
        opening - spent
    }

    /// Current balance of a savings pot: opening balance plus signed
    /// transactions. May be negative; withdrawals are not bounded.
    pub fn pot_balance(&self, state: &AppState, pot_id: &str) -> f64 {
        let opening = state.pot(pot_id).map(|p| p.opening_balance).unwrap_or(0.0);
        let moved: f64 = state
            .savings_transactions
            .iter()
            .filter(|t| t.pot_id == pot_id)
            .map(|t| t.signed_amount())
            .sum();
        opening + moved
    }

    // ── Currency ────────────────────────────────────────────────────

    /// Convert an amount to the main currency.
    ///
    /// Amounts in the investment currency are multiplied by the
    /// configured scalar rate. Any other currency code is treated as the
    /// main currency — a two-currency design limitation, not an error.
    pub fn convert_to_main(&self, settings: &Settings, amount: f64, currency: &str) -> f64 {
        if currency == settings.investment_currency && currency != settings.main_currency {
            amount * settings.exchange_rate
        } else {
            amount
        }
    }

    /// Net worth in the main currency: all account balances, pot
    /// balances, and holding values, converted.
    pub fn net_worth(&self, state: &AppState) -> f64 {
        let accounts: f64 = state
            .accounts
            .iter()
            .map(|a| {
                self.convert_to_main(&state.settings, self.account_balance(state, &a.id), &a.currency)
            })
            .sum();
        let pots: f64 = state
            .pots
            .iter()
            .map(|p| {
                self.convert_to_main(&state.settings, self.pot_balance(state, &p.id), &p.currency)
            })
            .sum();
        let holdings: f64 = state
            .holdings
            .iter()
            .map(|h| self.convert_to_main(&state.settings, h.current_value, &h.currency))
            .sum();
        accounts + pots + holdings
    }

    // ── Goals ───────────────────────────────────────────────────────

    /// Progress toward a pot's target in percent, clamped at 100.
    /// `None` when the pot is unknown or has no positive target.
    pub fn goal_progress(&self, state: &AppState, pot_id: &str) -> Option<f64> {
        let pot = state.pot(pot_id)?;
        let target = pot.target.filter(|t| *t > 0.0)?;
        Some((self.pot_balance(state, pot_id) / target).min(1.0) * 100.0)
    }

    /// Estimated months until a pot reaches its target, extrapolating the
    /// deposits of the trailing 30 days. `None` without a target or
    /// without recent deposits.
    pub fn months_to_target(&self, state: &AppState, pot_id: &str, today: NaiveDate) -> Option<u32> {
        let pot = state.pot(pot_id)?;
        let target = pot.target.filter(|t| *t > 0.0)?;
        let window_start = today - Days::new(30);
        let recent: f64 = state
            .savings_transactions
            .iter()
            .filter(|t| {
                t.pot_id == pot_id
                    && t.kind == SavingsTxKind::Deposit
                    && t.date >= window_start
                    && t.date <= today
            })
            .map(|t| t.amount)
            .sum();
        if recent <= 0.0 {
            return None;
        }
        let remaining = target - self.pot_balance(state, pot_id);
        Some((remaining / recent).round().max(0.0) as u32)
    }

    /// All pots with their derived balances and recent deposit activity.
    pub fn pot_overview(&self, state: &AppState, today: NaiveDate) -> Vec<PotOverview> {
        state
            .pots
            .iter()
            .map(|pot| {
                let mut txs: Vec<_> = state
                    .savings_transactions
                    .iter()
                    .filter(|t| t.pot_id == pot.id)
                    .collect();
                txs.sort_by(|a, b| b.date.cmp(&a.date));
                let last_deposit_date = txs
                    .first()
                    .filter(|t| t.kind == SavingsTxKind::Deposit)
                    .map(|t| t.date);
                let added_this_month = txs
                    .iter()
                    .filter(|t| t.kind == SavingsTxKind::Deposit && same_month(t.date, today))
                    .map(|t| t.amount)
                    .sum();
                PotOverview {
                    pot: pot.clone(),
                    balance: self.pot_balance(state, &pot.id),
                    last_deposit_date,
                    added_this_month,
                }
            })
            .collect()
    }

    // ── Period summaries ────────────────────────────────────────────

    /// Spend and save totals over a closed interval of calendar days.
    pub fn period_summary(&self, state: &AppState, range: &DateRange) -> PeriodSummary {
        let mut total_spent = 0.0;
        let mut expense_count = 0;
        for expense in &state.expenses {
            if range.contains(expense.date) {
                total_spent += expense.amount;
                expense_count += 1;
            }
        }
        let total_saved = state
            .savings_transactions
            .iter()
            .filter(|t| t.kind == SavingsTxKind::Deposit && range.contains(t.date))
            .map(|t| t.amount)
            .sum();
        PeriodSummary {
            range: *range,
            total_spent,
            total_saved,
            expense_count,
        }
    }

    /// The same aggregation over the immediately-preceding equal-length
    /// interval, for month-over-month / week-over-week comparison.
    /// `None` for presets with no calendar-aligned previous period.
    pub fn period_comparison(&self, state: &AppState, range: &DateRange) -> Option<PeriodComparison> {
        let previous_range = range.previous_period()?;
        Some(PeriodComparison {
            current: self.period_summary(state, range),
            previous: self.period_summary(state, &previous_range),
        })
    }

    /// Spending per category over a range, largest first.
    pub fn spending_by_category(&self, state: &AppState, range: &DateRange) -> Vec<CategorySpend> {
        let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
        for expense in &state.expenses {
            if range.contains(expense.date) {
                *totals.entry(expense.category.as_str()).or_insert(0.0) += expense.amount;
            }
        }
        let mut out: Vec<CategorySpend> = totals
            .into_iter()
            .map(|(category, total)| CategorySpend {
                category: category.to_string(),
                total,
            })
            .collect();
        out.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(std::cmp::Ordering::Equal));
        out
    }

    /// Spent / saved / weight movement for the calendar month containing
    /// `month_of`.
    pub fn monthly_summary(&self, state: &AppState, month_of: NaiveDate) -> MonthlySummary {
        let total_spent = state
            .expenses
            .iter()
            .filter(|e| same_month(e.date, month_of))
            .map(|e| e.amount)
            .sum();
        let total_saved = state
            .savings_transactions
            .iter()
            .filter(|t| t.kind == SavingsTxKind::Deposit && same_month(t.date, month_of))
            .map(|t| t.amount)
            .sum();

        let mut weights: Vec<_> = state
            .weight_entries
            .iter()
            .filter(|w| same_month(w.date, month_of))
            .collect();
        weights.sort_by(|a, b| a.date.cmp(&b.date));
        let weight_change_kg = match (weights.first(), weights.last()) {
            (Some(first), Some(last)) if weights.len() > 1 => last.weight - first.weight,
            _ => 0.0,
        };

        MonthlySummary {
            month: start_of_month(month_of),
            total_spent,
            total_saved,
            weight_change_kg,
        }
    }
}

impl Default for MoneyService {
    fn default() -> Self {
        Self::new()
    }
}
