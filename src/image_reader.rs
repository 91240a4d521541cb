use crate::ocr::TextRecognizer;
use anyhow::{Context, Result};
use image::ImageReader;
use std::path::Path;
use tracing::debug;

/// Decode a raster image and run OCR on it directly.
///
/// The decoder is picked from the file contents, not the extension, so a PNG
/// saved as `.jpg` still decodes. The recognized text is returned untouched,
/// so a blank image yields `""`.
pub fn extract_text(path: &Path, recognizer: &dyn TextRecognizer) -> Result<String> {
    let image = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .with_context(|| format!("Failed to open image: {}", path.display()))?
        .decode()
        .with_context(|| format!("Failed to decode image: {}", path.display()))?;
    debug!(width = image.width(), height = image.height(), "running OCR on image");

    recognizer.recognize(&image)
}
