//! Folds a month of account states into the chart facets.

use log::debug;
use std::collections::{BTreeMap, HashSet};

use crate::charts::charts_model::{ChartDataEntry, MonthSnapshot};

/// Reduces one month into its total and per-account/group/type breakdowns.
///
/// `shown` holds the ids of accounts flagged `show_in_graphs`; only those count
/// towards `total`. The breakdowns include every account present in the month.
pub fn reduce_month(snapshot: &MonthSnapshot, shown: &HashSet<&str>) -> ChartDataEntry {
    let mut total = 0.0;
    let mut by_account = BTreeMap::new();
    let mut by_group: BTreeMap<String, f64> = BTreeMap::new();
    let mut by_type: BTreeMap<String, f64> = BTreeMap::new();

    for (account_id, state) in &snapshot.accounts {
        if shown.contains(account_id.as_str()) {
            total += state.balance;
        }

        by_account.insert(account_id.clone(), state.balance);

        if let Some(group_id) = state.group_id.as_deref().filter(|g| !g.is_empty()) {
            *by_group.entry(group_id.to_string()).or_insert(0.0) += state.balance;
        }
        if let Some(type_id) = state.type_id.as_deref().filter(|t| !t.is_empty()) {
            *by_type.entry(type_id.to_string()).or_insert(0.0) += state.balance;
        }
    }

    ChartDataEntry {
        date: snapshot.month,
        total,
        by_account,
        by_group,
        by_type,
    }
}

/// Drops the first `count` entries of a chronologically ordered series.
pub fn trim_leading(mut entries: Vec<ChartDataEntry>, count: usize) -> Vec<ChartDataEntry> {
    if count > 0 {
        let removed = count.min(entries.len());
        entries.drain(..removed);
        debug!("Removed {} leading chart entries", removed);
    }
    entries
}
