//! HTTP handlers for sell/hold advice endpoints

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    Json,
};
use shared::{AdviceRequest, AdviceResponse};

use crate::error::{AppError, AppResult};
use crate::AppState;

/// Generate advice from a JSON body
pub async fn get_advice(
    State(state): State<AppState>,
    body: Result<Json<AdviceRequest>, JsonRejection>,
) -> AppResult<Json<AdviceResponse>> {
    let Json(request) = body.map_err(|e| {
        tracing::debug!("Unreadable advice body: {}", e);
        AppError::MissingAdviceFields
    })?;
    advise(&state, request).await
}

/// Generate advice from query parameters
pub async fn get_price_advice(
    State(state): State<AppState>,
    query: Result<Query<AdviceRequest>, QueryRejection>,
) -> AppResult<Json<AdviceResponse>> {
    let Query(request) = query.map_err(|e| {
        tracing::debug!("Unreadable advice query: {}", e);
        AppError::MissingAdviceFields
    })?;
    advise(&state, request).await
}

async fn advise(state: &AppState, request: AdviceRequest) -> AppResult<Json<AdviceResponse>> {
    let query = request.into_query().ok_or(AppError::MissingAdviceFields)?;
    Ok(Json(state.advice.advise(&query).await))
}
