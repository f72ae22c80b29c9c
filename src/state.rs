use std::path::Path;
use std::sync::Arc;

use log::{error, info};
use thiserror::Error;

use crate::classifier::{ImageClassifier, OnnxClassifier};
use crate::config::Config;
use crate::labels::LabelVocabulary;

#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("could not load model: {0}")]
    Model(String),
    #[error("could not read label vocabulary: {0}")]
    Labels(#[from] std::io::Error),
    #[error("label vocabulary is empty")]
    EmptyVocabulary,
}

/// Process-wide read-only inference context: the loaded classifier and the
/// label vocabulary aligned with its output indices. Built once at startup,
/// shared across all requests for the process lifetime.
pub struct ModelContext {
    pub classifier: Arc<dyn ImageClassifier>,
    pub labels: Arc<LabelVocabulary>,
}

impl ModelContext {
    pub fn load(model_path: &Path, labels_path: &Path) -> Result<Self, ModelLoadError> {
        let classifier =
            OnnxClassifier::load(model_path).map_err(|err| ModelLoadError::Model(err.to_string()))?;
        let labels = LabelVocabulary::from_file(labels_path)?;
        if labels.is_empty() {
            return Err(ModelLoadError::EmptyVocabulary);
        }
        Ok(Self {
            classifier: Arc::new(classifier),
            labels: Arc::new(labels),
        })
    }
}

pub struct AppState {
    /// `None` when the startup load failed; `/health` reports the gap and
    /// `/predict` answers 500 until the process is restarted with a model.
    pub model: Option<ModelContext>,
    pub top_k: usize,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn initialize(config: &Config) -> Self {
        let model = match ModelContext::load(&config.model_path, &config.labels_path) {
            Ok(context) => {
                info!(
                    "classifier ready, {} classes from {}",
                    context.labels.len(),
                    config.labels_path.display()
                );
                Some(context)
            }
            Err(err) => {
                error!("classifier unavailable: {err}");
                None
            }
        };
        Self {
            model,
            top_k: config.top_k,
            max_upload_bytes: config.max_upload_bytes,
        }
    }
}
