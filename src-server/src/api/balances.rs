use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use wealthtrack_core::balances::BalanceSnapshot;
use wealthtrack_core::charts::MonthKey;

use crate::{api::charts::UserQuery, error::ApiResult, main_lib::AppState};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MonthQuery {
    user_id: String,
    /// YYYY-MM
    month: MonthKey,
}

/// Current balance of every account of the user
async fn get_latest_balances(
    Query(query): Query<UserQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<BalanceSnapshot>>> {
    state.ensure_user(&query.user_id)?;
    let balances = state.balance_service.latest_balances(&query.user_id).await?;
    Ok(Json(balances))
}

async fn get_balances_for_month(
    Query(query): Query<MonthQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<BalanceSnapshot>>> {
    state.ensure_user(&query.user_id)?;
    let balances = state
        .balance_service
        .balances_for_month(&query.user_id, query.month)
        .await?;
    Ok(Json(balances))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/balances/latest", get(get_latest_balances))
        .route("/balances/month", get(get_balances_for_month))
}
