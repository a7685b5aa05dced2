use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A single recorded balance of an account at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSnapshot {
    pub id: String,
    pub account_id: String,
    /// Only the calendar month of this date matters for charting
    pub date: NaiveDate,
    pub balance: f64,
    pub updated_at: NaiveDateTime,
}

impl BalanceSnapshot {
    /// True when `self` supersedes `other` for the same account: later date,
    /// or same date and more recently updated.
    pub fn supersedes(&self, other: &BalanceSnapshot) -> bool {
        (self.date, self.updated_at) > (other.date, other.updated_at)
    }
}

/// Ordering requested from the balance repository, by snapshot date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}
