//! PDF text extraction with an OCR fallback for scanned documents.
//!
//! The text layer is tried first. Only when it yields nothing but whitespace
//! is every page rasterized and recognized. The decision is made once for the
//! whole document, so a PDF mixing text pages and scanned pages keeps just
//! its text layer.

use crate::ocr::{PageRasterizer, TextRecognizer};
use anyhow::{Context, Result};
use lopdf::Document;
use std::path::Path;
use tracing::{debug, info, warn};

pub struct PdfData {
    doc: Document,
}

impl PdfData {
    pub fn open(path: &Path) -> Result<Self> {
        let doc = Document::load(path)
            .with_context(|| format!("Failed to open PDF: {}", path.display()))?;
        Ok(Self { doc })
    }

    /// 1-based page numbers in document order.
    pub fn page_numbers(&self) -> Vec<u32> {
        self.doc.get_pages().keys().copied().collect()
    }

    /// Text layer of every page, each non-empty page followed by a newline.
    pub fn text_layer(&self) -> String {
        let mut text = String::new();

        for page in self.page_numbers() {
            let page_text = match self.doc.extract_text(&[page]) {
                Ok(t) => t,
                Err(e) => {
                    // Unreadable text layers are treated like scanned pages
                    warn!(page, error = %e, "could not read PDF text layer");
                    continue;
                }
            };

            // lopdf ends each text object with a newline; the page adds its own
            let page_text = page_text.trim_end_matches('\n');
            if !page_text.is_empty() {
                text.push_str(page_text);
                text.push('\n');
            }
        }

        text
    }
}

/// True when structured extraction produced nothing worth returning.
pub fn needs_ocr(structured: &str) -> bool {
    structured.trim().is_empty()
}

pub struct PdfExtractor<'a> {
    rasterizer: &'a dyn PageRasterizer,
    recognizer: &'a dyn TextRecognizer,
    dpi: u32,
}

impl<'a> PdfExtractor<'a> {
    pub fn new(
        rasterizer: &'a dyn PageRasterizer,
        recognizer: &'a dyn TextRecognizer,
        dpi: u32,
    ) -> Self {
        Self {
            rasterizer,
            recognizer,
            dpi,
        }
    }

    pub fn extract(&self, path: &Path) -> Result<String> {
        let (text, pages) = {
            let pdf = PdfData::open(path)?;
            (pdf.text_layer(), pdf.page_numbers())
        };

        if !needs_ocr(&text) {
            debug!(pages = pages.len(), chars = text.len(), "using PDF text layer");
            return Ok(text);
        }

        info!(
            pages = pages.len(),
            "PDF has no text layer, falling back to OCR"
        );
        self.ocr_pages(path, &pages)
    }

    fn ocr_pages(&self, path: &Path, pages: &[u32]) -> Result<String> {
        let mut text = String::new();

        for &page in pages {
            let image = self
                .rasterizer
                .rasterize_page(path, page, self.dpi)
                .with_context(|| format!("Failed to rasterize page {}", page))?;
            let page_text = self
                .recognizer
                .recognize(&image)
                .with_context(|| format!("OCR failed on page {}", page))?;
            text.push_str(&page_text);
            text.push('\n');
        }

        Ok(text)
    }
}
