use serde::{Deserialize, Serialize};

use crate::rank::ClassificationResult;

#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
    pub service: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopPrediction {
    pub class_name: String,
    pub confidence: f32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub predicted_class: String,
    pub confidence: f32,
    pub class_index: usize,
    pub top_predictions: Vec<TopPrediction>,
}

impl From<ClassificationResult> for PredictionResponse {
    fn from(result: ClassificationResult) -> Self {
        Self {
            predicted_class: result.best.label,
            confidence: result.best.confidence,
            class_index: result.best.class_index,
            top_predictions: result
                .ranked
                .into_iter()
                .map(|prediction| TopPrediction {
                    class_name: prediction.label,
                    confidence: prediction.confidence,
                })
                .collect(),
        }
    }
}
