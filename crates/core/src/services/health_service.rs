use std::collections::HashSet;

use chrono::{Datelike, Days, NaiveDate};

use crate::models::analytics::{DayMetrics, StreakSummary};
use crate::models::health::WeightEntry;
use crate::models::range::DateRange;
use crate::models::state::AppState;

/// How many days back the daily streak scans look.
const STREAK_LOOKBACK_DAYS: u64 = 365;

/// How many weeks back the workout streak scan looks.
const STREAK_LOOKBACK_WEEKS: u64 = 52;

/// Health-side derived metrics: daily totals, streaks, and timelines.
pub struct HealthService;

impl HealthService {
    pub fn new() -> Self {
        Self
    }

    // ── Daily totals ────────────────────────────────────────────────

    pub fn calories_on(&self, state: &AppState, date: NaiveDate) -> u32 {
        state
            .calorie_entries
            .iter()
            .filter(|e| e.date == date)
            .map(|e| e.calories)
            .sum()
    }

    pub fn steps_on(&self, state: &AppState, date: NaiveDate) -> u32 {
        state
            .step_entries
            .iter()
            .filter(|e| e.date == date)
            .map(|e| e.count)
            .sum()
    }

    // ── Weight ──────────────────────────────────────────────────────

    /// The most recent weight entry, if any.
    pub fn latest_weight<'a>(&self, state: &'a AppState) -> Option<&'a WeightEntry> {
        let mut entries: Vec<&WeightEntry> = state.weight_entries.iter().collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        entries.first().copied()
    }

    /// Latest logged weight, falling back to the configured start weight,
    /// then 0.
    pub fn current_weight(&self, state: &AppState) -> f64 {
        self.latest_weight(state)
            .map(|e| e.weight)
            .or(state.settings.start_weight_kg)
            .unwrap_or(0.0)
    }

    /// Last weight in the month minus the first; 0 with fewer than two
    /// entries in the month.
    pub fn weight_change_in_month(&self, state: &AppState, month_of: NaiveDate) -> f64 {
        let mut entries: Vec<&WeightEntry> = state
            .weight_entries
            .iter()
            .filter(|w| w.date.year() == month_of.year() && w.date.month() == month_of.month())
            .collect();
        entries.sort_by(|a, b| a.date.cmp(&b.date));
        match (entries.first(), entries.last()) {
            (Some(first), Some(last)) if entries.len() > 1 => last.weight - first.weight,
            _ => 0.0,
        }
    }

    /// Rough weeks-to-goal estimate: weight still to lose divided by a
    /// quarter of the loss over the trailing 30 days. `None` without a
    /// goal, without recent loss, or when the goal is already reached.
    pub fn weeks_to_goal(&self, state: &AppState, today: NaiveDate) -> Option<u32> {
        let goal = state.settings.goal_weight_kg?;
        let to_lose = self.current_weight(state) - goal;

        let window_start = today - Days::new(30);
        let mut recent: Vec<&WeightEntry> = state
            .weight_entries
            .iter()
            .filter(|w| w.date >= window_start && w.date <= today)
            .collect();
        recent.sort_by(|a, b| a.date.cmp(&b.date));
        let lost = match (recent.first(), recent.last()) {
            (Some(first), Some(last)) if recent.len() > 1 => first.weight - last.weight,
            _ => 0.0,
        };

        if lost > 0.0 && to_lose > 0.0 {
            Some((to_lose / (lost / 4.0)).round() as u32)
        } else {
            None
        }
    }

    // ── Streaks ─────────────────────────────────────────────────────

    /// Consecutive days with at least one calorie logged, counting back
    /// from `today`. An empty today is skipped rather than breaking the
    /// streak — the day is still in progress.
    pub fn calorie_streak(&self, state: &AppState, today: NaiveDate) -> u32 {
        self.daily_streak(today, |date| self.calories_on(state, date) >= 1)
    }

    /// Consecutive days meeting the daily step target, with the same
    /// in-progress-today tolerance.
    pub fn step_streak(&self, state: &AppState, today: NaiveDate) -> u32 {
        let target = state.settings.daily_step_target;
        self.daily_streak(today, |date| self.steps_on(state, date) >= target)
    }

    fn daily_streak(&self, today: NaiveDate, met: impl Fn(NaiveDate) -> bool) -> u32 {
        let mut streak = 0;
        for i in 0..STREAK_LOOKBACK_DAYS {
            let date = today - Days::new(i);
            if met(date) {
                streak += 1;
            } else if i == 0 {
                continue;
            } else {
                break;
            }
        }
        streak
    }

    /// Consecutive ISO weeks with at least one training entry, counting
    /// back from the week containing `today`. The current week gets the
    /// same in-progress tolerance as days do.
    pub fn workout_streak(&self, state: &AppState, today: NaiveDate) -> u32 {
        let trained_weeks: HashSet<(i32, u32)> = state
            .training_entries
            .iter()
            .map(|e| {
                let week = e.date.iso_week();
                (week.year(), week.week())
            })
            .collect();

        let mut streak = 0;
        let mut cursor = today;
        for i in 0..STREAK_LOOKBACK_WEEKS {
            let week = cursor.iso_week();
            if trained_weeks.contains(&(week.year(), week.week())) {
                streak += 1;
            } else if i > 0 {
                break;
            }
            cursor = cursor - Days::new(7);
        }
        streak
    }

    /// All three streaks at once, for the dashboard badges.
    pub fn streaks(&self, state: &AppState, today: NaiveDate) -> StreakSummary {
        StreakSummary {
            calories: self.calorie_streak(state, today),
            steps: self.step_streak(state, today),
            workouts: self.workout_streak(state, today),
        }
    }

    // ── Timelines ───────────────────────────────────────────────────

    /// Per-day weight/steps/calories over a range, one record per
    /// calendar day, for chart rendering.
    pub fn daily_timeline(&self, state: &AppState, range: &DateRange) -> Vec<DayMetrics> {
        let mut out = Vec::new();
        let mut date = range.start;
        while date <= range.end {
            let weight = state
                .weight_entries
                .iter()
                .filter(|w| w.date == date)
                .last()
                .map(|w| w.weight);
            out.push(DayMetrics {
                date,
                weight,
                steps: self.steps_on(state, date),
                calories: self.calories_on(state, date),
            });
            date = match date.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }
        out
    }
}

impl Default for HealthService {
    fn default() -> Self {
        Self::new()
    }
}
