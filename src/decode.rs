use image::RgbImage;

use crate::errors::PredictError;

/// Turns uploaded bytes into an RGB image.
///
/// The declared content type gates the attempt; the actual format is
/// detected from the bytes, not trusted from the header. Grayscale,
/// palette and alpha sources all come out as plain RGB.
pub fn decode(bytes: &[u8], declared_content_type: &str) -> Result<RgbImage, PredictError> {
    if !declared_content_type.starts_with("image/") {
        return Err(PredictError::InvalidInputKind);
    }
    let image = image::load_from_memory(bytes).map_err(PredictError::DecodeFailure)?;
    Ok(image.to_rgb8())
}
