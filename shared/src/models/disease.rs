//! Plant disease classification models

use serde::{Deserialize, Serialize};

/// Classes predicted by the disease model, in model output order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DiseaseLabel {
    DiseasedLeaf,
    DiseasedPlant,
    FreshLeaf,
    FreshPlant,
}

impl DiseaseLabel {
    /// All labels indexed by model output position
    pub const ALL: [DiseaseLabel; 4] = [
        DiseaseLabel::DiseasedLeaf,
        DiseaseLabel::DiseasedPlant,
        DiseaseLabel::FreshLeaf,
        DiseaseLabel::FreshPlant,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn is_diseased(&self) -> bool {
        matches!(self, DiseaseLabel::DiseasedLeaf | DiseaseLabel::DiseasedPlant)
    }
}

impl std::fmt::Display for DiseaseLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiseaseLabel::DiseasedLeaf => write!(f, "Diseased Cotton Leaf"),
            DiseaseLabel::DiseasedPlant => write!(f, "Diseased Cotton Plant"),
            DiseaseLabel::FreshLeaf => write!(f, "Fresh Cotton Leaf"),
            DiseaseLabel::FreshPlant => write!(f, "Fresh Cotton Plant"),
        }
    }
}

/// Top-1 prediction of the disease model
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ClassificationResult {
    pub label: DiseaseLabel,
    /// Score of the winning class, in [0, 1]
    pub confidence: f32,
}

impl ClassificationResult {
    /// Pick the highest-scoring class. Ties keep the first class.
    /// Returns `None` when `scores` is empty or wider than the label set.
    pub fn from_scores(scores: &[f32]) -> Option<Self> {
        if scores.len() > DiseaseLabel::ALL.len() {
            return None;
        }
        let (index, confidence) = scores
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best: Option<(usize, f32)>, (i, s)| match best {
                Some((_, b)) if b >= s => best,
                _ => Some((i, s)),
            })?;

        Some(Self {
            label: DiseaseLabel::from_index(index)?,
            confidence,
        })
    }

    /// Confidence as a percentage with two decimals, e.g. `97.53%`
    pub fn confidence_percent(&self) -> String {
        format!("{:.2}%", f64::from(self.confidence) * 100.0)
    }
}

/// Body of a successful disease prediction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PredictionResponse {
    pub prediction: String,
    pub confidence: String,
}

impl From<ClassificationResult> for PredictionResponse {
    fn from(result: ClassificationResult) -> Self {
        Self {
            prediction: result.label.to_string(),
            confidence: result.confidence_percent(),
        }
    }
}
