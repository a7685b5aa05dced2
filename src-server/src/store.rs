//! Read-only JSON file store backing the account and balance repositories.

use anyhow::{Context, Result as AnyResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

use wealthtrack_core::accounts::{Account, AccountGroup, AccountRepositoryTrait, AccountType};
use wealthtrack_core::balances::{BalanceRepositoryTrait, BalanceSnapshot, SortOrder};
use wealthtrack_core::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
}

/// On-disk layout of the data file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreData {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub groups: Vec<AccountGroup>,
    #[serde(default)]
    pub types: Vec<AccountType>,
    #[serde(default)]
    pub balances: Vec<BalanceSnapshot>,
}

pub struct JsonStore {
    data: StoreData,
    /// account_id -> user_id
    owners: HashMap<String, String>,
    user_ids: HashSet<String>,
}

impl JsonStore {
    pub fn new(data: StoreData) -> Self {
        let owners = data
            .accounts
            .iter()
            .map(|a| (a.id.clone(), a.user_id.clone()))
            .collect();
        let user_ids = data.users.iter().map(|u| u.id.clone()).collect();
        JsonStore {
            data,
            owners,
            user_ids,
        }
    }

    pub fn load(path: &Path) -> AnyResult<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Reading data file {}", path.display()))?;
        let data: StoreData = serde_json::from_str(&raw)
            .with_context(|| format!("Parsing data file {}", path.display()))?;
        tracing::info!(
            "Loaded {} users, {} accounts and {} balances from {}",
            data.users.len(),
            data.accounts.len(),
            data.balances.len(),
            path.display()
        );
        Ok(Self::new(data))
    }

    pub fn has_user(&self, user_id: &str) -> bool {
        self.user_ids.contains(user_id)
    }
}

#[async_trait]
impl AccountRepositoryTrait for JsonStore {
    async fn list(&self, user_id: &str) -> Result<Vec<Account>> {
        Ok(self
            .data
            .accounts
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_groups(&self, user_id: &str) -> Result<Vec<AccountGroup>> {
        Ok(self
            .data
            .groups
            .iter()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_types(&self, user_id: &str) -> Result<Vec<AccountType>> {
        Ok(self
            .data
            .types
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl BalanceRepositoryTrait for JsonStore {
    async fn list(&self, user_id: &str, order: SortOrder) -> Result<Vec<BalanceSnapshot>> {
        let mut balances: Vec<BalanceSnapshot> = self
            .data
            .balances
            .iter()
            .filter(|b| self.owners.get(&b.account_id).map(String::as_str) == Some(user_id))
            .cloned()
            .collect();
        // stable sorts keep file order between same-day snapshots
        match order {
            SortOrder::Asc => balances.sort_by(|a, b| a.date.cmp(&b.date)),
            SortOrder::Desc => balances.sort_by(|a, b| b.date.cmp(&a.date)),
        }
        Ok(balances)
    }
}
