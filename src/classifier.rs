use std::path::Path;

use ndarray::Array4;
use tract_onnx::prelude::*;

use crate::errors::PredictError;
use crate::preprocess::{INPUT_HEIGHT, INPUT_WIDTH};

/// The classification capability the request pipeline depends on.
///
/// Implementations take the preprocessed `(1, 224, 224, 3)` tensor and
/// return one score per class, exactly as the model produces them. The
/// production implementation wraps an ONNX model; tests inject mocks.
pub trait ImageClassifier: Send + Sync {
    fn classify(&self, input: &Array4<f32>) -> Result<Vec<f32>, PredictError>;
}

type RunnableOnnx = RunnableModel<TypedFact, Box<dyn TypedOp>, TypedModel>;

/// tract-backed classifier. The plan is immutable after load and runs via
/// `&self`, so one instance serves all workers without locking.
pub struct OnnxClassifier {
    model: RunnableOnnx,
}

impl OnnxClassifier {
    pub fn load(path: &Path) -> TractResult<Self> {
        let model = tract_onnx::onnx()
            .model_for_path(path)?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(
                    f32::datum_type(),
                    tvec!(1, INPUT_HEIGHT as usize, INPUT_WIDTH as usize, 3),
                ),
            )?
            .into_optimized()?
            .into_runnable()?;
        Ok(Self { model })
    }
}

impl ImageClassifier for OnnxClassifier {
    fn classify(&self, input: &Array4<f32>) -> Result<Vec<f32>, PredictError> {
        let tensor = tract_ndarray::Array4::from_shape_vec(
            (1, INPUT_HEIGHT as usize, INPUT_WIDTH as usize, 3),
            input.iter().copied().collect(),
        )
        .map_err(|err| PredictError::InferenceFailure(err.to_string()))?
        .into_tensor();

        let outputs = self
            .model
            .run(tvec!(tensor.into()))
            .map_err(|err| PredictError::InferenceFailure(err.to_string()))?;

        let scores = outputs[0]
            .to_array_view::<f32>()
            .map_err(|err| PredictError::InferenceFailure(err.to_string()))?;
        Ok(scores.iter().copied().collect())
    }
}
