use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::generate_id;

/// Suggested expense categories. Free-text categories are allowed; this set
/// is what pickers offer by default.
pub const EXPENSE_CATEGORIES: [&str; 16] = [
    "Food",
    "Groceries",
    "Transport",
    "Housing",
    "Utilities",
    "Shopping",
    "Gadgets/Electronics",
    "Entertainment",
    "Health",
    "Personal Care",
    "Education",
    "Travel",
    "Gifts",
    "Subscriptions",
    "Charity",
    "Other",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountKind {
    Cash,
    Bank,
    Card,
}

/// A spendable money account (wallet, bank account, card).
///
/// Only the opening balance is stored. The current balance is derived on
/// read from the opening balance and the expenses owned by the account,
/// so the two can never drift apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,

    pub name: String,

    #[serde(rename = "type")]
    pub kind: AccountKind,

    pub currency: String,

    /// Balance at creation time. Documents written by earlier versions
    /// stored the running balance under `balance`; on import it becomes
    /// the opening balance.
    #[serde(alias = "balance")]
    pub opening_balance: f64,
}

impl Account {
    pub fn new(
        name: impl Into<String>,
        kind: AccountKind,
        currency: impl Into<String>,
        opening_balance: f64,
    ) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            kind,
            currency: currency.into(),
            opening_balance,
        }
    }
}

/// A single spend record. `amount` is always positive ("money spent").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,

    /// Day granularity, no time component.
    pub date: NaiveDate,

    pub amount: f64,

    pub currency: String,

    pub category: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,

    /// Account the money came from. Optional; expenses without an account
    /// affect no balance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_recurring: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Expense {
    pub fn new(
        date: NaiveDate,
        amount: f64,
        currency: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: generate_id(),
            date,
            amount,
            currency: currency.into(),
            category: category.into(),
            merchant: None,
            account_id: None,
            is_recurring: None,
            note: None,
        }
    }

    /// Attach the expense to a source account.
    #[must_use]
    pub fn with_account(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}
