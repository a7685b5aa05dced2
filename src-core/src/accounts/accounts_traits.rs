//! Account repository traits.

use async_trait::async_trait;

use super::accounts_model::{Account, AccountGroup, AccountType};
use crate::errors::Result;

/// Read access to a user's accounts and their group/type relations.
#[async_trait]
pub trait AccountRepositoryTrait: Send + Sync {
    /// All accounts of the user, archived ones included.
    async fn list(&self, user_id: &str) -> Result<Vec<Account>>;

    async fn list_groups(&self, user_id: &str) -> Result<Vec<AccountGroup>>;

    async fn list_types(&self, user_id: &str) -> Result<Vec<AccountType>>;
}
