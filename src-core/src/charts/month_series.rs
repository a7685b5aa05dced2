//! Monthly forward-filled reconstruction of account balances.

use chrono::NaiveDate;
use log::{debug, warn};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::accounts::Account;
use crate::balances::BalanceSnapshot;
use crate::charts::charts_model::{AccountMonthState, MonthKey, MonthSnapshot, MonthlySnapshotMap};

/// Builds one snapshot per calendar month, from the month of the first balance
/// through the month of `today`, both inclusive.
///
/// `balances` are expected in ascending date order. Within a month, the last
/// snapshot encountered for an account wins. Once an account has a balance it
/// is carried into every later month until a newer snapshot replaces it;
/// archived accounts are carried like any other.
pub fn build_month_series(
    balances: &[BalanceSnapshot],
    accounts: &HashMap<&str, &Account>,
    today: NaiveDate,
) -> Vec<MonthSnapshot> {
    let Some(first) = balances.first() else {
        return Vec::new();
    };
    let earliest_month = MonthKey::from_date(first.date);
    let current_month = MonthKey::from_date(today);

    // Bucket once instead of rescanning every balance per month. Input order
    // is preserved inside each bucket.
    let mut by_month: BTreeMap<MonthKey, Vec<&BalanceSnapshot>> = BTreeMap::new();
    for balance in balances {
        by_month
            .entry(MonthKey::from_date(balance.date))
            .or_default()
            .push(balance);
    }

    let mut last_known_balances: HashMap<&str, f64> = HashMap::new();
    let mut orphans_reported: HashSet<&str> = HashSet::new();
    let mut series = Vec::new();

    for month in earliest_month.through(current_month) {
        if let Some(updates) = by_month.get(&month) {
            for balance in updates {
                last_known_balances.insert(balance.account_id.as_str(), balance.balance);
            }
        }

        let snapshot: MonthlySnapshotMap = last_known_balances
            .iter()
            .map(|(&account_id, &balance)| {
                let account = accounts.get(account_id);
                if account.is_none() && orphans_reported.insert(account_id) {
                    warn!(
                        "Balance recorded for unknown account {}, charting it without group or type",
                        account_id
                    );
                }
                (
                    account_id.to_string(),
                    AccountMonthState {
                        balance,
                        group_id: account.and_then(|a| a.group_id.clone()),
                        type_id: account.and_then(|a| a.type_id.clone()),
                    },
                )
            })
            .collect();

        series.push(MonthSnapshot {
            month,
            accounts: snapshot,
        });
    }

    debug!(
        "Built {} monthly snapshots from {} balances ({} to {})",
        series.len(),
        balances.len(),
        earliest_month,
        current_month
    );

    series
}
