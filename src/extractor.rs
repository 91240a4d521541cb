//! The extraction entry point: classify a path, run the matching extractor,
//! and turn any failure into an [`ExtractError`].

use crate::docx_reader::DocxData;
use crate::epub_reader::EpubData;
use crate::error::ExtractError;
use crate::format::{extension_of, Document, FormatTag};
use crate::image_reader;
use crate::ocr::{PageRasterizer, Pdftoppm, Tesseract, TextRecognizer, DEFAULT_DPI};
use crate::pdf_reader::PdfExtractor;
use crate::reader::read_text;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Locations of the external OCR programs and the rendering resolution.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    pub tesseract_cmd: PathBuf,
    pub pdftoppm_cmd: PathBuf,
    pub dpi: u32,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            tesseract_cmd: PathBuf::from("tesseract"),
            pdftoppm_cmd: PathBuf::from("pdftoppm"),
            dpi: DEFAULT_DPI,
        }
    }
}

pub struct TextExtractor {
    rasterizer: Box<dyn PageRasterizer>,
    recognizer: Box<dyn TextRecognizer>,
    dpi: u32,
}

impl TextExtractor {
    /// Build an extractor that shells out to `pdftoppm` and `tesseract`.
    pub fn new(config: &ExtractorConfig) -> Self {
        Self::with_backends(
            Box::new(Pdftoppm::new(&config.pdftoppm_cmd)),
            Box::new(Tesseract::new(&config.tesseract_cmd)),
            config.dpi,
        )
    }

    pub fn with_backends(
        rasterizer: Box<dyn PageRasterizer>,
        recognizer: Box<dyn TextRecognizer>,
        dpi: u32,
    ) -> Self {
        Self {
            rasterizer,
            recognizer,
            dpi,
        }
    }

    /// Extract plain text from the file at `path`.
    ///
    /// The file is not checked before classification: a missing or unreadable
    /// file with a known extension surfaces as
    /// [`ExtractError::ExtractionFailure`].
    pub fn extract_text(&self, path: impl AsRef<Path>) -> Result<String, ExtractError> {
        self.extract(&Document::classify(path.as_ref()))
    }

    pub fn extract(&self, document: &Document) -> Result<String, ExtractError> {
        let path = document.path();
        let format = document.format();
        debug!(path = %path.display(), %format, "classified document");

        let result = match format {
            FormatTag::Pdf => {
                PdfExtractor::new(self.rasterizer.as_ref(), self.recognizer.as_ref(), self.dpi)
                    .extract(path)
            }
            FormatTag::Word => read_text::<DocxData>(path),
            FormatTag::Epub => read_text::<EpubData>(path),
            FormatTag::Image => image_reader::extract_text(path, self.recognizer.as_ref()),
            FormatTag::Unsupported => {
                let extension = extension_of(path);
                warn!(path = %path.display(), %extension, "unsupported file extension");
                return Err(ExtractError::UnsupportedFormat { extension });
            }
        };

        match result {
            Ok(text) => {
                info!(path = %path.display(), %format, chars = text.len(), "extracted text");
                Ok(text)
            }
            Err(e) => {
                let cause = format!("{e:#}");
                warn!(path = %path.display(), %format, error = %cause, "extraction failed");
                Err(ExtractError::ExtractionFailure(cause))
            }
        }
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new(&ExtractorConfig::default())
    }
}
