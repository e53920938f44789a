//! HTTP handler for plant disease prediction

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use shared::PredictionResponse;

use crate::error::{AppError, AppResult};
use crate::AppState;

const IMAGE_FIELD: &str = "image";
const NO_IMAGE_PROVIDED: &str = "No image file provided.";
const NO_IMAGE_SELECTED: &str = "No image file selected.";

/// Classify an uploaded plant image
pub async fn predict_disease(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<PredictionResponse>> {
    let classifier = state.classifier.as_ref().ok_or(AppError::ModelUnavailable)?;

    let mut multipart =
        multipart.map_err(|_| AppError::MissingInput(NO_IMAGE_PROVIDED.to_string()))?;

    let image = read_image_field(&mut multipart).await?;

    let result = classifier
        .classify_async(image)
        .await
        .map_err(|e| AppError::ProcessingFailure(e.to_string()))?;

    tracing::info!(
        label = %result.label,
        diseased = result.label.is_diseased(),
        confidence = result.confidence,
        "Disease prediction"
    );

    Ok(Json(result.into()))
}

/// Pull the bytes of the `image` file field out of the form
async fn read_image_field(multipart: &mut Multipart) -> AppResult<Vec<u8>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| {
            tracing::debug!("Unreadable multipart body: {}", e);
            AppError::MissingInput(NO_IMAGE_PROVIDED.to_string())
        })?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        // Plain text fields carry no file name
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        if file_name.is_empty() {
            return Err(AppError::MissingInput(NO_IMAGE_SELECTED.to_string()));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::ProcessingFailure(e.to_string()))?;
        if bytes.is_empty() {
            return Err(AppError::MissingInput(NO_IMAGE_SELECTED.to_string()));
        }
        return Ok(bytes.to_vec());
    }

    Err(AppError::MissingInput(NO_IMAGE_PROVIDED.to_string()))
}
