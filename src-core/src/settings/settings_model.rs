//! Chart engine configuration.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// Tunables for the chart engine, passed explicitly to [`crate::ChartService`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSettings {
    /// Annual growth rates, in percent, to project the total with
    pub prediction_percentages: Vec<f64>,
    /// Leading months hidden from the balance series
    pub remove_first_x_entries: usize,
}

impl ChartSettings {
    pub fn new(prediction_percentages: Vec<f64>, remove_first_x_entries: usize) -> Self {
        Self {
            prediction_percentages,
            remove_first_x_entries,
        }
    }

    /// Builds settings from raw configuration values; `None` means unset.
    pub fn from_values(percentages: Option<&str>, remove_first: Option<&str>) -> Result<Self> {
        let prediction_percentages = match percentages {
            Some(raw) => Self::parse_percentages(raw)?,
            None => Vec::new(),
        };
        let remove_first_x_entries = match remove_first.map(str::trim) {
            None | Some("") => 0,
            Some(raw) => raw.parse::<usize>().map_err(|_| {
                ValidationError::InvalidInput(format!(
                    "number of chart entries to remove must be a non-negative integer, got '{}'",
                    raw
                ))
            })?,
        };
        Ok(Self::new(prediction_percentages, remove_first_x_entries))
    }

    /// Parses a comma-separated list such as `"1, 3,5,7.5"`.
    ///
    /// A blank string is an empty list. Tokens that are not finite numbers are
    /// rejected.
    ///
    /// Repeated values are kept once. Each percentage names its own projection
    /// column (see `percentage_key`), and a column must have a single
    /// accumulator: a repeated rate sharing one would compound twice per year.
    pub fn parse_percentages(raw: &str) -> Result<Vec<f64>> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(Vec::new());
        }

        let mut percentages: Vec<f64> = Vec::new();
        for (index, token) in raw.split(',').enumerate() {
            let token = token.trim();
            let value = token
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ValidationError::MalformedPercentage {
                    token: token.to_string(),
                    index,
                })?;
            if !percentages.contains(&value) {
                percentages.push(value);
            }
        }
        Ok(percentages)
    }
}
