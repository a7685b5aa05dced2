use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use wealthtrack_core::balances::{BalanceService, BalanceServiceTrait};
use wealthtrack_core::{ChartService, ChartServiceTrait, ChartSettings};

use crate::{api, config::Config, error::ApiError, store::JsonStore};

pub struct AppState {
    pub chart_service: Arc<dyn ChartServiceTrait>,
    pub balance_service: Arc<dyn BalanceServiceTrait>,
    pub store: Arc<JsonStore>,
}

impl AppState {
    pub fn new(store: Arc<JsonStore>, chart_settings: ChartSettings) -> Self {
        let chart_service = ChartService::new(store.clone(), store.clone(), chart_settings);
        let balance_service = BalanceService::new(store.clone());
        AppState {
            chart_service: Arc::new(chart_service),
            balance_service: Arc::new(balance_service),
            store,
        }
    }

    /// Rejects ids that do not belong to any known user.
    pub fn ensure_user(&self, user_id: &str) -> Result<(), ApiError> {
        if self.store.has_user(user_id) {
            Ok(())
        } else {
            Err(ApiError::NotFound(format!("User '{}'", user_id)))
        }
    }
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wealthtrack_server=info,tower_http=info".into()),
        )
        .init();
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let store = Arc::new(JsonStore::load(&config.data_path)?);
    tracing::info!(
        "Chart settings: percentages {:?}, removing first {} entries",
        config.chart_settings.prediction_percentages,
        config.chart_settings.remove_first_x_entries
    );
    Ok(Arc::new(AppState::new(store, config.chart_settings.clone())))
}

pub fn app_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api/v1", api::router())
        .with_state(state)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
