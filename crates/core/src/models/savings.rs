use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::generate_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PotKind {
    Emergency,
    Regular,
}

/// A named savings sub-account ("pot") with an optional target amount.
///
/// Like [`Account`](super::money::Account), only the opening balance is
/// stored; the current balance is derived from the pot's transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsPot {
    pub id: String,

    pub name: String,

    #[serde(rename = "type")]
    pub kind: PotKind,

    /// Balance at creation time; legacy documents stored the running
    /// balance under `balance`.
    #[serde(alias = "balance")]
    pub opening_balance: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,

    pub currency: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
}

impl SavingsPot {
    pub fn new(name: impl Into<String>, kind: PotKind, currency: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            kind,
            opening_balance: 0.0,
            target: None,
            currency: currency.into(),
            bank_name: None,
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: f64) -> Self {
        self.target = Some(target);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SavingsTxKind {
    Deposit,
    Withdraw,
}

impl std::fmt::Display for SavingsTxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SavingsTxKind::Deposit => write!(f, "DEPOSIT"),
            SavingsTxKind::Withdraw => write!(f, "WITHDRAW"),
        }
    }
}

/// A deposit into or withdrawal from a savings pot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsTransaction {
    pub id: String,

    #[serde(rename = "savingsAccountId")]
    pub pot_id: String,

    pub date: NaiveDate,

    #[serde(rename = "type")]
    pub kind: SavingsTxKind,

    pub amount: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl SavingsTransaction {
    pub fn deposit(pot_id: impl Into<String>, date: NaiveDate, amount: f64) -> Self {
        Self::new(pot_id, date, SavingsTxKind::Deposit, amount)
    }

    pub fn withdraw(pot_id: impl Into<String>, date: NaiveDate, amount: f64) -> Self {
        Self::new(pot_id, date, SavingsTxKind::Withdraw, amount)
    }

    fn new(pot_id: impl Into<String>, date: NaiveDate, kind: SavingsTxKind, amount: f64) -> Self {
        Self {
            id: generate_id(),
            pot_id: pot_id.into(),
            date,
            kind,
            amount,
            note: None,
        }
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Effect of this transaction on the pot balance.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            SavingsTxKind::Deposit => self.amount,
            SavingsTxKind::Withdraw => -self.amount,
        }
    }
}
