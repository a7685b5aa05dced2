use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use wealthtrack_core::charts::{ChartLegend, ChartSeries, PredictionEntry};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserQuery {
    pub user_id: String,
}

#[derive(Deserialize)]
struct PredictionQuery {
    total: f64,
}

/// Monthly balance series of a user with growth predictions
async fn get_chart_series(
    Query(query): Query<UserQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ChartSeries>> {
    state.ensure_user(&query.user_id)?;
    let series = state
        .chart_service
        .compute_chart_series(&query.user_id)
        .await?;
    tracing::debug!(
        "Chart series for {}: {} months, {} prediction years",
        query.user_id,
        series.balances.len(),
        series.predictions.len()
    );
    Ok(Json(series))
}

/// Predictions for an arbitrary starting total
async fn get_predictions(
    Query(query): Query<PredictionQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<PredictionEntry>>> {
    if !query.total.is_finite() {
        return Err(ApiError::BadRequest(format!(
            "total must be a finite number, got {}",
            query.total
        )));
    }
    Ok(Json(state.chart_service.compute_predictions(query.total)))
}

async fn get_chart_legend(
    Query(query): Query<UserQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ChartLegend>> {
    state.ensure_user(&query.user_id)?;
    let legend = state.chart_service.chart_legend(&query.user_id).await?;
    Ok(Json(legend))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/charts", get(get_chart_series))
        .route("/charts/predictions", get(get_predictions))
        .route("/charts/legend", get(get_chart_legend))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use chrono::{Datelike, Local};
    use wealthtrack_core::charts::MonthKey;
    use wealthtrack_core::ChartSettings;

    use crate::api::test_support::{account, app, balance, get_json};
    use crate::store::StoreData;

    fn sample() -> StoreData {
        StoreData {
            accounts: vec![account("a1", "u1", true), account("a2", "u1", false)],
            balances: vec![
                balance("a1", "2020-01-15", 1000.0),
                balance("a2", "2020-01-20", 300.0),
            ],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn chart_series_runs_through_current_month() {
        let settings = ChartSettings::new(vec![5.0, 10.0], 0);
        let (status, body) = get_json(app(sample(), settings), "/api/v1/charts?userId=u1").await;

        assert_eq!(status, StatusCode::OK);
        let balances = body["balances"].as_array().unwrap();
        let current = MonthKey::from_date(Local::now().date_naive()).to_string();
        assert_eq!(balances[0]["date"], "2020-01");
        assert_eq!(balances.last().unwrap()["date"], current.as_str());
        assert_eq!(balances[0]["total"].as_i64(), Some(1000));
        assert_eq!(balances[0]["byAccount"]["a2"].as_i64(), Some(300));

        let predictions = body["predictions"].as_array().unwrap();
        assert_eq!(predictions.len(), 40);
        assert_eq!(predictions[0]["5"].as_i64(), Some(1050));
        assert_eq!(predictions[0]["10"].as_i64(), Some(1100));
    }

    #[tokio::test]
    async fn user_without_balances_gets_empty_series() {
        let data = StoreData {
            accounts: vec![account("a1", "u1", true)],
            ..Default::default()
        };
        let (status, body) = get_json(
            app(data, ChartSettings::new(vec![5.0], 0)),
            "/api/v1/charts?userId=u1",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["balances"].as_array().unwrap().len(), 0);
        assert_eq!(body["predictions"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let (status, body) = get_json(
            app(sample(), ChartSettings::default()),
            "/api/v1/charts?userId=nobody",
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("nobody"));
    }

    #[tokio::test]
    async fn missing_user_param_is_rejected() {
        let (status, _) = get_json(app(sample(), ChartSettings::default()), "/api/v1/charts").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn predictions_endpoint_starts_next_year() {
        let settings = ChartSettings::new(vec![5.0, 10.0], 0);
        let (status, body) = get_json(
            app(sample(), settings),
            "/api/v1/charts/predictions?total=1000",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["year"], Local::now().year() + 1);
        assert_eq!(body[0]["5"].as_i64(), Some(1050));
        assert_eq!(body[39]["year"], Local::now().year() + 40);
    }

    #[tokio::test]
    async fn legend_lists_user_accounts() {
        let (status, body) = get_json(
            app(sample(), ChartSettings::default()),
            "/api/v1/charts/legend?userId=u1",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["accounts"].as_array().unwrap().len(), 2);
        assert_eq!(body["accounts"][0]["name"], "A1");
    }
}
