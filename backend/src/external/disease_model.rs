//! Plant disease model runtime
//!
//! The trained network is exported to ONNX and executed with tract. The
//! model is treated as a black box: an NHWC image tensor goes in, one score
//! per class comes out.

use std::path::Path;

use thiserror::Error;
use tract_onnx::prelude::*;

/// Errors raised while loading or running the disease model
#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Failed to load disease model: {0}")]
    ModelLoad(String),

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Model returned {0} scores, which do not map to the known classes")]
    UnexpectedOutput(usize),

    #[error("Inference task failed: {0}")]
    Task(String),
}

/// Preprocessed model input: `[1, size, size, 3]` pixels in NHWC order, 0..=255
#[derive(Debug, Clone)]
pub struct ModelInput {
    pub size: u32,
    pub pixels: Vec<f32>,
}

/// Anything that turns a model input into class scores
pub trait InferenceBackend: Send + Sync {
    fn run(&self, input: ModelInput) -> Result<Vec<f32>, ClassifierError>;
}

/// ONNX disease model executed by tract
pub struct OnnxModel {
    plan: TypedRunnableModel<TypedModel>,
    input_size: u32,
}

impl OnnxModel {
    /// Load and optimize the model for a fixed square input size
    pub fn load(path: impl AsRef<Path>, input_size: u32) -> Result<Self, ClassifierError> {
        let edge = input_size as usize;
        let plan = tract_onnx::onnx()
            .model_for_path(path.as_ref())
            .and_then(|model| {
                model.with_input_fact(
                    0,
                    InferenceFact::dt_shape(f32::datum_type(), tvec!(1, edge, edge, 3)),
                )
            })
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| ClassifierError::ModelLoad(e.to_string()))?;

        Ok(Self { plan, input_size })
    }

    pub fn input_size(&self) -> u32 {
        self.input_size
    }
}

impl InferenceBackend for OnnxModel {
    fn run(&self, input: ModelInput) -> Result<Vec<f32>, ClassifierError> {
        let edge = input.size as usize;
        let tensor = tract_ndarray::Array4::from_shape_vec((1, edge, edge, 3), input.pixels)
            .map_err(|e| ClassifierError::Inference(e.to_string()))?;

        let outputs = self
            .plan
            .run(tvec!(tensor.into_tensor().into()))
            .map_err(|e| ClassifierError::Inference(e.to_string()))?;

        let scores = outputs
            .first()
            .ok_or(ClassifierError::UnexpectedOutput(0))?
            .to_array_view::<f32>()
            .map_err(|e| ClassifierError::Inference(e.to_string()))?
            .iter()
            .copied()
            .collect();

        Ok(scores)
    }
}
