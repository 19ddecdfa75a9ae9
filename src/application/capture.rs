//! Image capture: turn a file or data URI into an entry image payload

use crate::error::{Result, WonderError};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fs;
use std::path::Path;

/// Guess an image MIME type from a file extension
fn mime_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "svg" => Some("image/svg+xml"),
        "heic" => Some("image/heic"),
        _ => None,
    }
}

/// Resolve an `--image` argument to a data URI.
///
/// Data URIs pass through unchanged; anything else is read as an image file
/// and base64-encoded.
pub fn image_data_uri(input: &str) -> Result<String> {
    if input.starts_with("data:") {
        if !input.contains(',') {
            return Err(WonderError::Image(
                "Data URI is missing its payload".to_string(),
            ));
        }
        return Ok(input.to_string());
    }

    let path = Path::new(input);
    let mime = mime_for(path).ok_or_else(|| {
        WonderError::Image(format!(
            "Unsupported image type: {} (expected png, jpg, gif, webp, bmp, svg or heic)",
            path.display()
        ))
    })?;

    let bytes = fs::read(path).map_err(|e| {
        WonderError::Image(format!("Cannot read image {}: {}", path.display(), e))
    })?;
    if bytes.is_empty() {
        return Err(WonderError::Image(format!(
            "Image file is empty: {}",
            path.display()
        )));
    }

    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}
