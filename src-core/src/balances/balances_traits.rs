//! Balance repository and service traits.

use async_trait::async_trait;

use super::balances_model::{BalanceSnapshot, SortOrder};
use crate::charts::MonthKey;
use crate::errors::Result;

/// Read access to recorded balance snapshots.
#[async_trait]
pub trait BalanceRepositoryTrait: Send + Sync {
    /// All snapshots of the user's accounts ordered by date.
    async fn list(&self, user_id: &str, order: SortOrder) -> Result<Vec<BalanceSnapshot>>;
}

#[async_trait]
pub trait BalanceServiceTrait: Send + Sync {
    /// The current balance of every account: its latest snapshot, ties on the
    /// date resolved by the most recent update.
    async fn latest_balances(&self, user_id: &str) -> Result<Vec<BalanceSnapshot>>;

    /// The authoritative snapshot of each account within `month`.
    async fn balances_for_month(
        &self,
        user_id: &str,
        month: MonthKey,
    ) -> Result<Vec<BalanceSnapshot>>;
}
