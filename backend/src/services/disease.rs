//! Disease classifier adapter
//!
//! Decodes uploaded images, shapes them for the model and maps the model
//! output to a labelled prediction.

use std::sync::Arc;

use image::imageops::FilterType;
use shared::ClassificationResult;

use crate::external::disease_model::{ClassifierError, InferenceBackend, ModelInput};

/// Adapter between raw image bytes and the disease model
#[derive(Clone)]
pub struct DiseaseClassifier {
    backend: Arc<dyn InferenceBackend>,
    input_size: u32,
}

impl DiseaseClassifier {
    pub fn new(backend: Arc<dyn InferenceBackend>, input_size: u32) -> Self {
        Self {
            backend,
            input_size,
        }
    }

    /// Decode an image and lay it out as an NHWC tensor of raw 0..=255 values.
    /// Resizing uses nearest-neighbour sampling to match training.
    pub fn preprocess(&self, image_bytes: &[u8]) -> Result<ModelInput, ClassifierError> {
        let rgb = image::load_from_memory(image_bytes)?.to_rgb8();
        let resized = image::imageops::resize(
            &rgb,
            self.input_size,
            self.input_size,
            FilterType::Nearest,
        );

        let pixels = resized
            .into_raw()
            .into_iter()
            .map(f32::from)
            .collect();

        Ok(ModelInput {
            size: self.input_size,
            pixels,
        })
    }

    /// Classify an image, returning the top-1 class. Blocking.
    pub fn classify(&self, image_bytes: &[u8]) -> Result<ClassificationResult, ClassifierError> {
        let input = self.preprocess(image_bytes)?;
        let scores = self.backend.run(input)?;
        ClassificationResult::from_scores(&scores)
            .ok_or(ClassifierError::UnexpectedOutput(scores.len()))
    }

    /// Classify on the blocking thread pool
    pub async fn classify_async(
        &self,
        image_bytes: Vec<u8>,
    ) -> Result<ClassificationResult, ClassifierError> {
        let classifier = self.clone();
        tokio::task::spawn_blocking(move || classifier.classify(&image_bytes))
            .await
            .map_err(|e| ClassifierError::Task(e.to_string()))?
    }
}
