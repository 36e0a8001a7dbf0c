use chrono::{Months, NaiveDate};

use crate::models::analytics::{HoldingPerformance, MonthlySnapshot};
use crate::models::invest::{Holding, InvestmentTransaction};
use crate::models::range::{same_month, start_of_month, start_of_year};
use crate::models::state::AppState;
use crate::services::money_service::MoneyService;

/// How many months of history a snapshot series covers when a holding has
/// no transactions yet.
const DEFAULT_SNAPSHOT_MONTHS: u32 = 5;

/// Investment derived metrics over the valuation-snapshot model.
///
/// A holding's history is its transaction list: `UPDATE_PRICE` records are
/// valuation snapshots of the whole position, deposits/withdrawals (and
/// buys/sells) are money flows. Everything below is derived from those two
/// series; the holding's stored `current_value` is only the latest
/// snapshot.
pub struct InvestService {
    money_service: MoneyService,
}

impl InvestService {
    pub fn new() -> Self {
        Self {
            money_service: MoneyService::new(),
        }
    }

    // ── Valuations ──────────────────────────────────────────────────

    /// The position value recorded by the last valuation snapshot on or
    /// before `date`. 0 when no snapshot exists yet.
    pub fn value_at(&self, state: &AppState, holding_id: &str, date: NaiveDate) -> f64 {
        let mut snapshots: Vec<&InvestmentTransaction> = state
            .investment_transactions
            .iter()
            .filter(|t| t.holding_id == holding_id && t.valuation().is_some() && t.date <= date)
            .collect();
        // Stable sort: same-date snapshots keep list order, i.e. the most
        // recently recorded one wins.
        snapshots.sort_by(|a, b| b.date.cmp(&a.date));
        snapshots
            .first()
            .and_then(|t| t.valuation())
            .unwrap_or(0.0)
    }

    /// Value change since the start of the current month. 0 when no
    /// valuation existed at the month boundary.
    pub fn month_change(&self, state: &AppState, holding: &Holding, today: NaiveDate) -> f64 {
        let start = self.value_at(state, &holding.id, start_of_month(today));
        if start > 0.0 {
            holding.current_value - start
        } else {
            0.0
        }
    }

    /// Value change since January 1st. 0 when no valuation existed at the
    /// year boundary.
    pub fn year_change(&self, state: &AppState, holding: &Holding, today: NaiveDate) -> f64 {
        let start = self.value_at(state, &holding.id, start_of_year(today));
        if start > 0.0 {
            holding.current_value - start
        } else {
            0.0
        }
    }

    // ── Flows ───────────────────────────────────────────────────────

    /// Cumulative deposits minus withdrawals since the holding's creation.
    pub fn net_invested(&self, state: &AppState, holding_id: &str) -> f64 {
        state
            .investment_transactions
            .iter()
            .filter(|t| t.holding_id == holding_id)
            .map(|t| t.flow())
            .sum()
    }

    /// Lifetime profit: current value minus everything ever put in.
    pub fn lifetime_profit(&self, state: &AppState, holding: &Holding) -> f64 {
        holding.current_value - self.net_invested(state, &holding.id)
    }

    // ── Monthly snapshots ───────────────────────────────────────────

    /// Partition a holding's history into calendar-month buckets, from
    /// the month of its earliest transaction (or the preceding
    /// `DEFAULT_SNAPSHOT_MONTHS` months when it has none) through the
    /// month containing `today`.
    ///
    /// A month's ending value is its most recent valuation snapshot;
    /// months without one carry the previous ending value forward and add
    /// the month's net flow. Profit per month is the value movement with
    /// flows stripped out.
    pub fn monthly_snapshots(
        &self,
        state: &AppState,
        holding_id: &str,
        today: NaiveDate,
    ) -> Vec<MonthlySnapshot> {
        let txs: Vec<&InvestmentTransaction> = state
            .investment_transactions
            .iter()
            .filter(|t| t.holding_id == holding_id)
            .collect();

        let current_month = start_of_month(today);
        let first_month = txs
            .iter()
            .map(|t| t.date)
            .min()
            .map(start_of_month)
            .unwrap_or_else(|| {
                current_month
                    .checked_sub_months(Months::new(DEFAULT_SNAPSHOT_MONTHS))
                    .unwrap_or(current_month)
            });

        let mut out = Vec::new();
        let mut month = first_month;
        let mut starting_value = 0.0;
        let mut net_invested = 0.0;

        while month <= current_month {
            let net_flow: f64 = txs
                .iter()
                .filter(|t| same_month(t.date, month))
                .map(|t| t.flow())
                .sum();

            let mut month_snapshots: Vec<&InvestmentTransaction> = txs
                .iter()
                .copied()
                .filter(|t| same_month(t.date, month) && t.valuation().is_some())
                .collect();
            month_snapshots.sort_by(|a, b| b.date.cmp(&a.date));
            let ending_value = month_snapshots
                .first()
                .and_then(|t| t.valuation())
                .unwrap_or(starting_value + net_flow);

            net_invested += net_flow;
            out.push(MonthlySnapshot {
                month,
                starting_value,
                ending_value,
                net_flow,
                profit: ending_value - starting_value - net_flow,
                net_invested,
            });

            starting_value = ending_value;
            month = match month.checked_add_months(Months::new(1)) {
                Some(next) => next,
                None => break,
            };
        }

        out
    }

    // ── Portfolio level ─────────────────────────────────────────────

    /// Everything a card needs for one holding. `None` for unknown ids.
    pub fn holding_performance(
        &self,
        state: &AppState,
        holding_id: &str,
        today: NaiveDate,
    ) -> Option<HoldingPerformance> {
        let holding = state.holding(holding_id)?;
        Some(HoldingPerformance {
            holding_id: holding.id.clone(),
            symbol: holding.symbol.clone(),
            current_value: holding.current_value,
            month_change: self.month_change(state, holding, today),
            year_change: self.year_change(state, holding, today),
            net_invested: self.net_invested(state, &holding.id),
            lifetime_profit: self.lifetime_profit(state, holding),
        })
    }

    /// Total value of all holdings, converted to the main currency.
    pub fn total_value(&self, state: &AppState) -> f64 {
        state
            .holdings
            .iter()
            .map(|h| {
                self.money_service
                    .convert_to_main(&state.settings, h.current_value, &h.currency)
            })
            .sum()
    }
}

impl Default for InvestService {
    fn default() -> Self {
        Self::new()
    }
}
