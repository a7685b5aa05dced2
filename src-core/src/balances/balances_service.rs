use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::balances::balances_model::{BalanceSnapshot, SortOrder};
use crate::balances::balances_traits::{BalanceRepositoryTrait, BalanceServiceTrait};
use crate::charts::MonthKey;
use crate::errors::Result;

pub struct BalanceService<T: BalanceRepositoryTrait> {
    balance_repo: Arc<T>,
}

impl<T: BalanceRepositoryTrait> BalanceService<T> {
    pub fn new(balance_repo: Arc<T>) -> Self {
        BalanceService { balance_repo }
    }
}

/// Keeps one snapshot per account, the one that supersedes all others.
/// Output is ordered by account id.
fn latest_per_account<I>(snapshots: I) -> Vec<BalanceSnapshot>
where
    I: IntoIterator<Item = BalanceSnapshot>,
{
    let mut latest: HashMap<String, BalanceSnapshot> = HashMap::new();
    for snapshot in snapshots {
        match latest.get(&snapshot.account_id) {
            Some(current) if !snapshot.supersedes(current) => {}
            _ => {
                latest.insert(snapshot.account_id.clone(), snapshot);
            }
        }
    }

    let mut result: Vec<BalanceSnapshot> = latest.into_values().collect();
    result.sort_by(|a, b| a.account_id.cmp(&b.account_id));
    result
}

#[async_trait]
impl<T: BalanceRepositoryTrait> BalanceServiceTrait for BalanceService<T> {
    async fn latest_balances(&self, user_id: &str) -> Result<Vec<BalanceSnapshot>> {
        let snapshots = self.balance_repo.list(user_id, SortOrder::Desc).await?;
        Ok(latest_per_account(snapshots))
    }

    async fn balances_for_month(
        &self,
        user_id: &str,
        month: MonthKey,
    ) -> Result<Vec<BalanceSnapshot>> {
        let snapshots = self.balance_repo.list(user_id, SortOrder::Asc).await?;
        Ok(latest_per_account(
            snapshots
                .into_iter()
                .filter(|s| MonthKey::from_date(s.date) == month),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn snapshot(id: &str, account: &str, date: &str, updated: &str, balance: f64) -> BalanceSnapshot {
        BalanceSnapshot {
            id: id.to_string(),
            account_id: account.to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            balance,
            updated_at: NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
                + chrono::Duration::minutes(updated.parse().unwrap()),
        }
    }

    #[test]
    fn keeps_latest_date_per_account() {
        let result = latest_per_account(vec![
            snapshot("1", "a", "2024-01-10", "0", 10.0),
            snapshot("2", "a", "2024-02-10", "0", 20.0),
            snapshot("3", "b", "2024-01-05", "0", 5.0),
        ]);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].id, "2");
        assert_eq!(result[1].id, "3");
    }

    #[test]
    fn same_date_resolved_by_update_time() {
        let result = latest_per_account(vec![
            snapshot("late", "a", "2024-03-01", "30", 300.0),
            snapshot("early", "a", "2024-03-01", "10", 100.0),
        ]);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "late");
        assert_eq!(result[0].balance, 300.0);
    }
}
