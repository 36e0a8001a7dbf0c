use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Named date-range presets offered by the time selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DateRangePreset {
    Today,
    Week,
    LastWeek,
    Month,
    LastMonth,
    #[serde(rename = "3_MONTHS")]
    ThreeMonths,
    #[serde(rename = "6_MONTHS")]
    SixMonths,
    Year,
    All,
    Custom,
}

/// A closed interval of calendar days, tagged with the preset it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub preset: DateRangePreset,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Resolve a preset to concrete bounds relative to `today`.
    ///
    /// Weeks are ISO weeks (Monday start). `ThreeMonths`/`SixMonths` are
    /// trailing windows ending today; `Year` is the current calendar year.
    /// `All` starts at the Unix epoch. `Custom` resolves to today until
    /// real bounds are supplied via [`DateRange::custom`].
    pub fn for_preset(preset: DateRangePreset, today: NaiveDate) -> Self {
        let (start, end) = match preset {
            DateRangePreset::Today | DateRangePreset::Custom => (today, today),
            DateRangePreset::Week => week_bounds(today),
            DateRangePreset::LastWeek => week_bounds(today - Days::new(7)),
            DateRangePreset::Month => month_bounds(today),
            DateRangePreset::LastMonth => {
                month_bounds(today.checked_sub_months(Months::new(1)).unwrap_or(today))
            }
            DateRangePreset::ThreeMonths => (
                today.checked_sub_months(Months::new(3)).unwrap_or(today),
                today,
            ),
            DateRangePreset::SixMonths => (
                today.checked_sub_months(Months::new(6)).unwrap_or(today),
                today,
            ),
            DateRangePreset::Year => (
                today.with_month(1).and_then(|d| d.with_day(1)).unwrap_or(today),
                today.with_month(12).and_then(|d| d.with_day(31)).unwrap_or(today),
            ),
            DateRangePreset::All => (
                NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(today),
                today,
            ),
        };
        Self { preset, start, end }
    }

    /// An explicit user-chosen interval.
    pub fn custom(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            preset: DateRangePreset::Custom,
            start,
            end,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// The equal-length immediately-preceding interval, for
    /// period-over-period comparison. Only defined for the
    /// calendar-aligned Month and Week presets.
    pub fn previous_period(&self) -> Option<DateRange> {
        match self.preset {
            DateRangePreset::Month => {
                let prev = self.start.checked_sub_months(Months::new(1))?;
                let (start, end) = month_bounds(prev);
                Some(DateRange {
                    preset: DateRangePreset::LastMonth,
                    start,
                    end,
                })
            }
            DateRangePreset::Week => Some(DateRange {
                preset: DateRangePreset::LastWeek,
                start: self.start - Days::new(7),
                end: self.end - Days::new(7),
            }),
            _ => None,
        }
    }
}

/// First and last day of the calendar month containing `date`.
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = start_of_month(date);
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|d| d.checked_sub_days(Days::new(1)))
        .unwrap_or(date);
    (start, end)
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn start_of_year(date: NaiveDate) -> NaiveDate {
    date.with_month(1).and_then(|d| d.with_day(1)).unwrap_or(date)
}

/// Monday and Sunday of the ISO week containing `date`.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let week = date.week(Weekday::Mon);
    (week.first_day(), week.last_day())
}

/// True when both dates fall in the same calendar month.
pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}
