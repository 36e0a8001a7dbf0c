use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::generate_id;

/// A weight measurement in kilograms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightEntry {
    pub id: String,

    pub date: NaiveDate,

    pub weight: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl WeightEntry {
    pub fn new(date: NaiveDate, weight: f64) -> Self {
        Self {
            id: generate_id(),
            date,
            weight,
            note: None,
        }
    }
}

/// Calories logged for a day. Multiple entries per day are summed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalorieEntry {
    pub id: String,

    pub date: NaiveDate,

    pub calories: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fats: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl CalorieEntry {
    pub fn new(date: NaiveDate, calories: u32) -> Self {
        Self {
            id: generate_id(),
            date,
            calories,
            protein: None,
            carbs: None,
            fats: None,
            note: None,
        }
    }
}

/// Steps logged for a day. Multiple entries per day are summed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepEntry {
    pub id: String,

    pub date: NaiveDate,

    pub count: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl StepEntry {
    pub fn new(date: NaiveDate, count: u32) -> Self {
        Self {
            id: generate_id(),
            date,
            count,
            note: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intensity {
    Easy,
    Medium,
    Hard,
}

/// A training session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingEntry {
    pub id: String,

    pub date: NaiveDate,

    /// Free-text kind, e.g. "Workout", "Run", "Climbing".
    #[serde(rename = "type")]
    pub kind: String,

    pub duration_minutes: u32,

    pub intensity: Intensity,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercises: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl TrainingEntry {
    pub fn new(
        date: NaiveDate,
        kind: impl Into<String>,
        duration_minutes: u32,
        intensity: Intensity,
    ) -> Self {
        Self {
            id: generate_id(),
            date,
            kind: kind.into(),
            duration_minutes,
            intensity,
            exercises: None,
            note: None,
        }
    }
}
