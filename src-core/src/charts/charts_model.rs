//! Chart series domain models.

use chrono::{Datelike, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, ValidationError};

lazy_static! {
    static ref MONTH_KEY_RE: Regex = Regex::new(r"^(\d{4})-(\d{2})$").unwrap();
}

/// A calendar month, rendered as `YYYY-MM`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, SerializeDisplay, DeserializeFromStr,
)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Returns `None` when `month` is outside `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(MonthKey { year, month })
    }

    /// The month a date falls in; the day is discarded.
    pub fn from_date(date: NaiveDate) -> Self {
        MonthKey {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            MonthKey {
                year: self.year + 1,
                month: 1,
            }
        } else {
            MonthKey {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Every month from `self` through `end`, both inclusive. Empty when `end` precedes `self`.
    pub fn through(self, end: MonthKey) -> impl Iterator<Item = MonthKey> {
        let first = Some(self).filter(|m| *m <= end);
        std::iter::successors(first, move |m| Some(m.next()).filter(|n| *n <= end))
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            Error::Validation(ValidationError::InvalidInput(format!(
                "'{}' is not a YYYY-MM month",
                s
            )))
        };
        let caps = MONTH_KEY_RE.captures(s).ok_or_else(invalid)?;
        let year: i32 = caps[1].parse().map_err(|_| invalid())?;
        let month: u32 = caps[2].parse().map_err(|_| invalid())?;
        MonthKey::new(year, month).ok_or_else(invalid)
    }
}

/// Last known state of one account carried into a month.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountMonthState {
    pub balance: f64,
    /// `None` when the account has no group or its record is missing
    pub group_id: Option<String>,
    pub type_id: Option<String>,
}

/// account_id -> state, for every account with a known balance by that month
pub type MonthlySnapshotMap = HashMap<String, AccountMonthState>;

/// Amount as a JSON number: integral values are written without a fraction
/// (`1050`, not `1050.0`). Non-finite values are left to the serializer.
struct Amount(f64);

/// Largest magnitude below which every integral f64 converts to i64 exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let value = self.0;
        if value.is_finite() && value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
            serializer.serialize_i64(value as i64)
        } else {
            serializer.serialize_f64(value)
        }
    }
}

fn serialize_amount<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    Amount(*value).serialize(serializer)
}

fn serialize_amounts<S>(values: &BTreeMap<String, f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(values.iter().map(|(k, v)| (k, Amount(*v))))
}

/// Forward-filled account states for one month.
#[derive(Debug, Clone)]
pub struct MonthSnapshot {
    pub month: MonthKey,
    pub accounts: MonthlySnapshotMap,
}

/// One month of the balance chart.
///
/// Missing keys in the breakdown maps mean "no data", not zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataEntry {
    pub date: MonthKey,
    /// Sum over accounts flagged `show_in_graphs`
    #[serde(serialize_with = "serialize_amount")]
    pub total: f64,
    #[serde(serialize_with = "serialize_amounts")]
    pub by_account: BTreeMap<String, f64>,
    #[serde(serialize_with = "serialize_amounts")]
    pub by_group: BTreeMap<String, f64>,
    #[serde(serialize_with = "serialize_amounts")]
    pub by_type: BTreeMap<String, f64>,
}

/// Projected totals for one future year, one column per configured percentage.
///
/// Serializes flat, e.g. `{"year": 2027, "5": 1050, "10": 1100}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PredictionEntry {
    pub year: i32,
    #[serde(flatten)]
    pub projections: BTreeMap<String, f64>,
}

impl Serialize for PredictionEntry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.projections.len() + 1))?;
        map.serialize_entry("year", &self.year)?;
        for (key, value) in &self.projections {
            map.serialize_entry(key, &Amount(*value))?;
        }
        map.end()
    }
}

impl PredictionEntry {
    pub fn projection(&self, percentage: f64) -> Option<f64> {
        self.projections.get(&percentage_key(percentage)).copied()
    }
}

/// Column key of a percentage: shortest decimal form, so `5.0` is `"5"` and `2.5` is `"2.5"`.
pub fn percentage_key(percentage: f64) -> String {
    percentage.to_string()
}

/// Output of the chart engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub balances: Vec<ChartDataEntry>,
    pub predictions: Vec<PredictionEntry>,
}

/// Display metadata for one key used in the chart breakdowns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendItem {
    pub id: String,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub archived: bool,
}

/// Labels for `by_account`, `by_group` and `by_type` keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartLegend {
    pub accounts: Vec<LegendItem>,
    pub groups: Vec<LegendItem>,
    pub types: Vec<LegendItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_key_formats_zero_padded() {
        let key = MonthKey::new(2023, 3).unwrap();
        assert_eq!(key.to_string(), "2023-03");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2023-03\"");
    }

    #[test]
    fn month_key_rolls_over_year() {
        let dec = MonthKey::new(2023, 12).unwrap();
        assert_eq!(dec.next(), MonthKey::new(2024, 1).unwrap());
    }

    #[test]
    fn month_key_parse_rejects_bad_month() {
        assert!("2023-13".parse::<MonthKey>().is_err());
        assert!("2023-1".parse::<MonthKey>().is_err());
        assert!("23-01".parse::<MonthKey>().is_err());
        assert_eq!(
            "2024-02".parse::<MonthKey>().unwrap(),
            MonthKey::new(2024, 2).unwrap()
        );
    }

    #[test]
    fn through_is_inclusive_and_empty_when_reversed() {
        let start = MonthKey::new(2023, 11).unwrap();
        let end = MonthKey::new(2024, 2).unwrap();
        let months: Vec<String> = start.through(end).map(|m| m.to_string()).collect();
        assert_eq!(months, vec!["2023-11", "2023-12", "2024-01", "2024-02"]);

        assert_eq!(end.through(start).count(), 0);
        assert_eq!(start.through(start).count(), 1);
    }

    #[test]
    fn prediction_entry_serializes_flat() {
        let mut projections = BTreeMap::new();
        projections.insert(percentage_key(5.0), 1050.0);
        projections.insert(percentage_key(2.5), 1025.0);
        let entry = PredictionEntry {
            year: 2027,
            projections,
        };

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["year"], 2027);
        assert_eq!(value["5"].as_i64(), Some(1050));
        assert_eq!(value["2.5"].as_i64(), Some(1025));

        let back: PredictionEntry = serde_json::from_value(value).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn integral_amounts_serialize_without_fraction() {
        let mut by_account = BTreeMap::new();
        by_account.insert("1".to_string(), 1050.0);
        by_account.insert("2".to_string(), 2.5);
        let entry = ChartDataEntry {
            date: MonthKey::new(2024, 1).unwrap(),
            total: 1050.0,
            by_account,
            by_group: BTreeMap::new(),
            by_type: BTreeMap::new(),
        };

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"total\":1050,"), "{}", json);
        assert!(json.contains("\"1\":1050,"), "{}", json);
        assert!(json.contains("\"2\":2.5"), "{}", json);
        assert!(!json.contains("1050.0"), "{}", json);
    }

    #[test]
    fn prediction_columns_serialize_without_fraction() {
        let mut projections = BTreeMap::new();
        projections.insert(percentage_key(5.0), 1050.0);
        let entry = PredictionEntry {
            year: 2027,
            projections,
        };
        assert_eq!(
            serde_json::to_string(&entry).unwrap(),
            r#"{"year":2027,"5":1050}"#
        );
    }
}
