pub mod aggregation;
pub mod charts_model;
pub mod charts_service;
pub mod charts_traits;
pub mod month_series;
pub mod prediction;

pub use charts_model::{
    AccountMonthState, ChartDataEntry, ChartLegend, ChartSeries, LegendItem, MonthKey,
    MonthSnapshot, MonthlySnapshotMap, PredictionEntry,
};
pub use charts_service::ChartService;
pub use charts_traits::ChartServiceTrait;
