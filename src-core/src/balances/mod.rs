pub mod balances_model;
pub mod balances_service;
pub mod balances_traits;

pub use balances_model::{BalanceSnapshot, SortOrder};
pub use balances_service::BalanceService;
pub use balances_traits::{BalanceRepositoryTrait, BalanceServiceTrait};
