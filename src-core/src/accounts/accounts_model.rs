//! Account domain models.

use serde::{Deserialize, Serialize};

/// A named account owned by a user. Read-only from the chart engine's side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub color: String,
    /// Whether the account counts towards the chart total
    pub show_in_graphs: bool,
    pub archived: bool,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub type_id: Option<String>,
}

/// User-defined grouping of accounts (e.g. "Retirement")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountGroup {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub color: String,
}

/// User-defined account type (e.g. "Savings", "Brokerage")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountType {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub color: String,
}
