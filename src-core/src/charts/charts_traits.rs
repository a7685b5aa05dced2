//! Chart service traits.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::charts_model::{ChartLegend, ChartSeries, PredictionEntry};
use crate::errors::Result;

/// Trait defining the contract for chart data operations.
#[async_trait]
pub trait ChartServiceTrait: Send + Sync {
    /// Monthly balance series of a user through the current month, plus the
    /// growth predictions seeded from its last total.
    ///
    /// A user without any recorded balance gets an empty series and no predictions.
    async fn compute_chart_series(&self, user_id: &str) -> Result<ChartSeries>;

    /// Same as [`ChartServiceTrait::compute_chart_series`] with an explicit "today".
    async fn compute_chart_series_as_of(
        &self,
        user_id: &str,
        today: NaiveDate,
    ) -> Result<ChartSeries>;

    /// Yearly projections of `current_total` starting next calendar year.
    fn compute_predictions(&self, current_total: f64) -> Vec<PredictionEntry>;

    /// Names and colors for the keys used in the series breakdowns.
    async fn chart_legend(&self, user_id: &str) -> Result<ChartLegend>;
}
