use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::range::DateRange;
use super::savings::SavingsPot;

/// Spend/save totals over one date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    /// The interval the totals cover.
    pub range: DateRange,

    /// Sum of expense amounts dated inside the range.
    pub total_spent: f64,

    /// Sum of savings deposits dated inside the range.
    pub total_saved: f64,

    pub expense_count: usize,
}

/// A period summary paired with the immediately-preceding period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodComparison {
    pub current: PeriodSummary,
    pub previous: PeriodSummary,
}

/// Total spent in one expense category over a range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpend {
    pub category: String,
    pub total: f64,
}

/// A savings pot with its derived balance and recent activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PotOverview {
    pub pot: SavingsPot,

    /// Derived balance: opening balance plus signed transactions.
    pub balance: f64,

    /// Date of the most recent transaction, if it was a deposit.
    pub last_deposit_date: Option<NaiveDate>,

    /// Sum of deposits in the current calendar month.
    pub added_this_month: f64,
}

/// Spent / saved / weight movement for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    /// First day of the month summarized.
    pub month: NaiveDate,

    pub total_spent: f64,

    pub total_saved: f64,

    /// Last weight in the month minus the first; 0 with fewer than two
    /// entries.
    pub weight_change_kg: f64,
}

/// One calendar-month bucket of a holding's value history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySnapshot {
    /// First day of the month.
    pub month: NaiveDate,

    /// Previous month's ending value (0 for the first bucket).
    pub starting_value: f64,

    /// Most recent valuation recorded in the month, or the starting value
    /// plus this month's net flow when no valuation exists.
    pub ending_value: f64,

    /// Deposits minus withdrawals during the month.
    pub net_flow: f64,

    /// Value movement with contributions stripped out:
    /// ending − starting − net flow.
    pub profit: f64,

    /// Running deposits-minus-withdrawals through this month.
    pub net_invested: f64,
}

/// Current standing of one holding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingPerformance {
    pub holding_id: String,

    pub symbol: String,

    pub current_value: f64,

    /// Change since the last valuation on or before the start of the
    /// current month (0 when there is none).
    pub month_change: f64,

    /// Change since the last valuation on or before January 1st.
    pub year_change: f64,

    /// Cumulative deposits minus withdrawals.
    pub net_invested: f64,

    /// current value − net invested.
    pub lifetime_profit: f64,
}

/// Health metrics for one day of a timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayMetrics {
    pub date: NaiveDate,

    /// Weight logged that day, if any.
    pub weight: Option<f64>,

    pub steps: u32,

    pub calories: u32,
}

/// Current streaks: consecutive qualifying days (calories, steps) and
/// ISO weeks (workouts), counting an in-progress today / this week as
/// "not yet broken".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakSummary {
    pub calories: u32,
    pub steps: u32,
    pub workouts: u32,
}
