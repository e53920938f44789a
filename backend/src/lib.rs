//! Farm Advisor Platform - Backend
//!
//! Plant disease prediction and sell/hold advice for farmers, built from
//! mandi prices, current weather and a small set of rules.

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;

use external::OnnxModel;
use services::{AdviceService, DiseaseClassifier, PriceTable, PriceTableError, WeatherService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub advice: AdviceService,
    /// `None` when the disease model failed to load at startup
    pub classifier: Option<DiseaseClassifier>,
    pub price_records: usize,
}

impl AppState {
    /// Build state from configuration, loading the price table and model.
    ///
    /// A missing price file or model degrades the affected endpoint. A price
    /// file that exists but cannot be read or parsed is returned as an error.
    pub fn initialize(config: Config) -> Result<Self, PriceTableError> {
        let prices = match PriceTable::load(&config.prices.csv_path) {
            Ok(table) => {
                tracing::info!(
                    path = %config.prices.csv_path,
                    records = table.len(),
                    "Price table loaded"
                );
                Some(Arc::new(table))
            }
            Err(PriceTableError::NotFound(path)) => {
                tracing::error!("Price table not found: {}", path);
                None
            }
            Err(e) => {
                tracing::error!("Error loading price table: {}", e);
                return Err(e);
            }
        };

        let classifier = match OnnxModel::load(&config.model.path, config.model.input_size) {
            Ok(model) => {
                tracing::info!(path = %config.model.path, "Plant disease model loaded");
                let input_size = model.input_size();
                Some(DiseaseClassifier::new(Arc::new(model), input_size))
            }
            Err(e) => {
                tracing::error!("Error loading disease model: {}", e);
                None
            }
        };

        if config.weather.api_key.trim().is_empty() {
            tracing::warn!("Weather API key not configured; advice will omit weather");
        }

        Ok(Self::from_parts(config, prices, classifier))
    }

    /// Assemble state from already-built components
    pub fn from_parts(
        config: Config,
        prices: Option<Arc<PriceTable>>,
        classifier: Option<DiseaseClassifier>,
    ) -> Self {
        let weather = WeatherService::new(&config.weather);
        Self::with_weather(config, prices, classifier, weather)
    }

    pub fn with_weather(
        config: Config,
        prices: Option<Arc<PriceTable>>,
        classifier: Option<DiseaseClassifier>,
        weather: WeatherService,
    ) -> Self {
        let price_records = prices.as_ref().map_or(0, |p| p.len());
        let advice = AdviceService::new(prices, config.prices.file_name(), weather);

        Self {
            config: Arc::new(config),
            advice,
            classifier,
            price_records,
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = state.config.body_limit_bytes();

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .merge(routes::api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(state)
}
