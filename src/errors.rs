use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::{error, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON error body, `{"detail": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

/// Everything that can go wrong while serving a prediction request.
///
/// Each variant maps to exactly one HTTP response; the `Display` string is
/// the user-visible `detail` and never carries internal error text.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("Must supply an image file")]
    MissingInput,
    #[error("File must be an image")]
    InvalidInputKind,
    #[error("Error processing image")]
    DecodeFailure(#[source] image::ImageError),
    #[error("Error processing image")]
    PreprocessFailure(String),
    #[error("Uploaded image is too large")]
    PayloadTooLarge { limit: usize },
    #[error("Model not loaded")]
    ModelUnavailable,
    #[error("Error processing image")]
    InferenceFailure(String),
}

impl ResponseError for PredictError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingInput
            | Self::InvalidInputKind
            | Self::DecodeFailure(_)
            | Self::PreprocessFailure(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::ModelUnavailable | Self::InferenceFailure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::DecodeFailure(err) => warn!("image decode failed: {err}"),
            Self::PreprocessFailure(detail) => warn!("preprocessing failed: {detail}"),
            Self::PayloadTooLarge { limit } => warn!("upload rejected, exceeds {limit} bytes"),
            Self::ModelUnavailable => error!("prediction requested but model is not loaded"),
            Self::InferenceFailure(detail) => error!("inference failed: {detail}"),
            _ => warn!("{self}"),
        }
        HttpResponse::build(self.status_code()).json(ErrorDetail {
            detail: self.to_string(),
        })
    }
}
