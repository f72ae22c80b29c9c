use actix_multipart::Multipart;
use actix_web::{web, Error, HttpResponse, Result};
use futures_util::StreamExt;
use log::warn;

use crate::decode::decode;
use crate::errors::PredictError;
use crate::models::{HealthResponse, PredictionResponse, RootResponse};
use crate::preprocess::preprocess;
use crate::rank::rank;
use crate::state::AppState;

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(root)))
        .service(web::resource("/health").route(web::get().to(health)))
        .service(web::resource("/predict").route(web::post().to(predict)));
}

pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(RootResponse {
        message: "Image Classification Service is running".to_string(),
        status: "healthy".to_string(),
    })
}

/// Readiness probe; never touches the prediction pipeline.
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        model_loaded: state.model.is_some(),
        service: "Image Classification API".to_string(),
    })
}

/// Runs one upload through decode -> preprocess -> classify -> rank.
/// Any stage failure short-circuits into its mapped error response.
pub async fn predict(
    mut payload: Multipart,
    state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let model = state.model.as_ref().ok_or(PredictError::ModelUnavailable)?;

    let upload = read_upload(&mut payload, state.max_upload_bytes).await?;
    let (bytes, declared_type) = upload.ok_or(PredictError::MissingInput)?;

    let image = decode(&bytes, &declared_type)?;
    let tensor = preprocess(&image)?;
    let probabilities = model.classifier.classify(&tensor)?;
    let result = rank(&probabilities, &model.labels, state.top_k)
        .ok_or_else(|| PredictError::InferenceFailure("empty probability vector".to_string()))?;

    Ok(HttpResponse::Ok().json(PredictionResponse::from(result)))
}

/// Collects the first uploaded part, enforcing the configured size cap.
/// Returns `None` when the request carries no part at all.
async fn read_upload(
    payload: &mut Multipart,
    limit: usize,
) -> Result<Option<(web::BytesMut, String)>, PredictError> {
    while let Some(item) = payload.next().await {
        let mut field = match item {
            Ok(field) => field,
            Err(err) => {
                warn!("invalid multipart payload: {err}");
                return Err(PredictError::MissingInput);
            }
        };

        let declared_type = field.content_type().essence_str().to_string();
        let mut bytes = web::BytesMut::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|err| {
                warn!("upload interrupted: {err}");
                PredictError::MissingInput
            })?;
            if bytes.len() + chunk.len() > limit {
                return Err(PredictError::PayloadTooLarge { limit });
            }
            bytes.extend_from_slice(&chunk);
        }
        return Ok(Some((bytes, declared_type)));
    }
    Ok(None)
}
