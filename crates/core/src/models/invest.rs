use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::generate_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetClass {
    Stock,
    Etf,
    Fund,
    Crypto,
}

/// A tracked investment or crypto position.
///
/// Holdings follow the valuation-snapshot model: `current_value` is the
/// total value of the position, updated manually, and contribution /
/// withdrawal flows are recorded as separate transactions. There is no
/// per-share price on the holding itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub id: String,

    /// Ticker symbol, uppercased (e.g. "VWCE", "BTC").
    pub symbol: String,

    pub name: String,

    #[serde(rename = "type")]
    pub class: AssetClass,

    pub currency: String,

    /// Total position value. Legacy documents called this `currentPrice`.
    #[serde(alias = "currentPrice")]
    pub current_value: f64,

    /// When `current_value` was last updated.
    #[serde(alias = "lastPriceUpdate")]
    pub last_value_update: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl Holding {
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        class: AssetClass,
        currency: impl Into<String>,
        current_value: f64,
    ) -> Self {
        Self {
            id: generate_id(),
            symbol: symbol.into().to_uppercase(),
            name: name.into(),
            class,
            currency: currency.into(),
            current_value,
            last_value_update: Utc::now(),
            tags: None,
        }
    }
}

/// Kind of investment transaction.
///
/// `UpdateValue` records a valuation snapshot (serialized as
/// `UPDATE_PRICE` for document compatibility); `Deposit`/`Withdraw` record
/// money flowing into or out of the position. Buy/Sell/Dividend are trade
/// history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvestmentAction {
    Buy,
    Sell,
    Dividend,
    Deposit,
    Withdraw,
    #[serde(rename = "UPDATE_PRICE")]
    UpdateValue,
}

impl std::fmt::Display for InvestmentAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvestmentAction::Buy => write!(f, "BUY"),
            InvestmentAction::Sell => write!(f, "SELL"),
            InvestmentAction::Dividend => write!(f, "DIVIDEND"),
            InvestmentAction::Deposit => write!(f, "DEPOSIT"),
            InvestmentAction::Withdraw => write!(f, "WITHDRAW"),
            InvestmentAction::UpdateValue => write!(f, "UPDATE_PRICE"),
        }
    }
}

/// One entry in a holding's transaction history.
///
/// Which optional fields are filled depends on the action kind: trades
/// carry quantity/price/fees, flows and valuations carry `total_amount`
/// (with `price_per_unit` doubling as the snapshot value in legacy
/// documents).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentTransaction {
    pub id: String,

    pub holding_id: String,

    pub date: NaiveDate,

    #[serde(rename = "type")]
    pub kind: InvestmentAction,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_unit: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fees: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl InvestmentTransaction {
    pub fn new(holding_id: impl Into<String>, date: NaiveDate, kind: InvestmentAction) -> Self {
        Self {
            id: generate_id(),
            holding_id: holding_id.into(),
            date,
            kind,
            quantity: None,
            price_per_unit: None,
            fees: None,
            total_amount: None,
            note: None,
        }
    }

    /// A valuation snapshot: "the position was worth `value` on `date`".
    pub fn valuation_snapshot(holding_id: impl Into<String>, date: NaiveDate, value: f64) -> Self {
        let mut tx = Self::new(holding_id, date, InvestmentAction::UpdateValue);
        tx.price_per_unit = Some(value);
        tx.total_amount = Some(value);
        tx
    }

    pub fn deposit(holding_id: impl Into<String>, date: NaiveDate, amount: f64) -> Self {
        let mut tx = Self::new(holding_id, date, InvestmentAction::Deposit);
        tx.total_amount = Some(amount);
        tx
    }

    pub fn withdraw(holding_id: impl Into<String>, date: NaiveDate, amount: f64) -> Self {
        let mut tx = Self::new(holding_id, date, InvestmentAction::Withdraw);
        tx.total_amount = Some(amount);
        tx
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// The recorded position value, for valuation snapshots.
    pub fn valuation(&self) -> Option<f64> {
        if self.kind != InvestmentAction::UpdateValue {
            return None;
        }
        self.price_per_unit.or(self.total_amount)
    }

    /// Signed money flow into the position.
    ///
    /// Deposits and buys contribute (buys at cost including fees), sells
    /// and withdrawals take out, dividends and valuations move nothing.
    pub fn flow(&self) -> f64 {
        let gross = self.total_amount.unwrap_or_else(|| {
            self.quantity.unwrap_or(0.0) * self.price_per_unit.unwrap_or(0.0)
        });
        match self.kind {
            InvestmentAction::Deposit => gross,
            InvestmentAction::Buy => gross + self.fees.unwrap_or(0.0),
            InvestmentAction::Withdraw | InvestmentAction::Sell => -gross,
            InvestmentAction::Dividend | InvestmentAction::UpdateValue => 0.0,
        }
    }
}
