use async_trait::async_trait;
use chrono::{Datelike, Local, NaiveDate};
use log::debug;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::accounts::{Account, AccountRepositoryTrait};
use crate::balances::{BalanceRepositoryTrait, SortOrder};
use crate::charts::aggregation::{reduce_month, trim_leading};
use crate::charts::charts_model::{ChartLegend, ChartSeries, LegendItem, PredictionEntry};
use crate::charts::charts_traits::ChartServiceTrait;
use crate::charts::month_series::build_month_series;
use crate::charts::prediction::project;
use crate::errors::Result;
use crate::settings::ChartSettings;

/// Builds chart series from the account and balance repositories.
///
/// Every call works on freshly fetched data and its own accumulators, so
/// concurrent calls never share state.
pub struct ChartService<A: AccountRepositoryTrait, B: BalanceRepositoryTrait> {
    account_repo: Arc<A>,
    balance_repo: Arc<B>,
    settings: ChartSettings,
}

impl<A: AccountRepositoryTrait, B: BalanceRepositoryTrait> ChartService<A, B> {
    pub fn new(account_repo: Arc<A>, balance_repo: Arc<B>, settings: ChartSettings) -> Self {
        ChartService {
            account_repo,
            balance_repo,
            settings,
        }
    }

    /// Projections for the years after `current_year`.
    pub fn compute_predictions_for_year(
        &self,
        current_total: f64,
        current_year: i32,
    ) -> Vec<PredictionEntry> {
        project(
            current_total,
            &self.settings.prediction_percentages,
            current_year,
        )
    }
}

#[async_trait]
impl<A, B> ChartServiceTrait for ChartService<A, B>
where
    A: AccountRepositoryTrait,
    B: BalanceRepositoryTrait,
{
    async fn compute_chart_series(&self, user_id: &str) -> Result<ChartSeries> {
        let today = Local::now().date_naive();
        self.compute_chart_series_as_of(user_id, today).await
    }

    async fn compute_chart_series_as_of(
        &self,
        user_id: &str,
        today: NaiveDate,
    ) -> Result<ChartSeries> {
        let (accounts, balances) = futures::try_join!(
            self.account_repo.list(user_id),
            self.balance_repo.list(user_id, SortOrder::Asc)
        )?;

        if balances.is_empty() {
            debug!("No balances recorded for user {}", user_id);
            return Ok(ChartSeries::default());
        }

        let accounts_by_id: HashMap<&str, &Account> =
            accounts.iter().map(|a| (a.id.as_str(), a)).collect();
        let shown: HashSet<&str> = accounts
            .iter()
            .filter(|a| a.show_in_graphs)
            .map(|a| a.id.as_str())
            .collect();

        let entries: Vec<_> = build_month_series(&balances, &accounts_by_id, today)
            .iter()
            .map(|month| reduce_month(month, &shown))
            .collect();
        let entries = trim_leading(entries, self.settings.remove_first_x_entries);

        let predictions = match entries.last() {
            Some(last) => self.compute_predictions_for_year(last.total, today.year()),
            None => Vec::new(),
        };

        Ok(ChartSeries {
            balances: entries,
            predictions,
        })
    }

    fn compute_predictions(&self, current_total: f64) -> Vec<PredictionEntry> {
        self.compute_predictions_for_year(current_total, Local::now().year())
    }

    async fn chart_legend(&self, user_id: &str) -> Result<ChartLegend> {
        let (accounts, groups, types) = futures::try_join!(
            self.account_repo.list(user_id),
            self.account_repo.list_groups(user_id),
            self.account_repo.list_types(user_id)
        )?;

        Ok(ChartLegend {
            accounts: accounts
                .into_iter()
                .map(|a| LegendItem {
                    id: a.id,
                    name: a.name,
                    color: a.color,
                    archived: a.archived,
                })
                .collect(),
            groups: groups
                .into_iter()
                .map(|g| LegendItem {
                    id: g.id,
                    name: g.name,
                    color: g.color,
                    archived: false,
                })
                .collect(),
            types: types
                .into_iter()
                .map(|t| LegendItem {
                    id: t.id,
                    name: t.name,
                    color: t.color,
                    archived: false,
                })
                .collect(),
        })
    }
}
