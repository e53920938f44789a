//! Route definitions for the Farm Advisor backend

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Disease classification
        .route("/predict-disease", post(handlers::predict_disease))
        // Sell/hold advice (JSON body)
        .route("/get-advice", post(handlers::get_advice))
        // Sell/hold advice (query string, used by the web client)
        .route("/price-advice", get(handlers::get_price_advice))
}
