//! OCR capabilities.
//!
//! Rendering and recognition are external programs (`pdftoppm` from
//! poppler-utils and `tesseract`). Both sit behind small traits so the
//! extractors can be driven by fakes in tests.

use anyhow::{bail, Context, Result};
use image::{DynamicImage, ImageFormat};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

/// Rendering resolution used when no other value is configured.
pub const DEFAULT_DPI: u32 = 300;

/// Renders a single PDF page to a bitmap.
pub trait PageRasterizer {
    /// Render 1-based `page` of `pdf` at `dpi` dots per inch.
    fn rasterize_page(&self, pdf: &Path, page: u32, dpi: u32) -> Result<DynamicImage>;
}

/// Turns a bitmap into text.
pub trait TextRecognizer {
    fn recognize(&self, image: &DynamicImage) -> Result<String>;
}

/// [`PageRasterizer`] backed by poppler's `pdftoppm`.
pub struct Pdftoppm {
    command: PathBuf,
}

impl Pdftoppm {
    pub fn new(command: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl Default for Pdftoppm {
    fn default() -> Self {
        Self::new("pdftoppm")
    }
}

impl PageRasterizer for Pdftoppm {
    fn rasterize_page(&self, pdf: &Path, page: u32, dpi: u32) -> Result<DynamicImage> {
        // Scratch dir is removed when `scratch` drops, on every return path
        let scratch = tempfile::tempdir().context("Failed to create scratch directory")?;
        let prefix = scratch.path().join("page");
        let page_arg = page.to_string();

        debug!(page, dpi, "rasterizing PDF page");
        let output = Command::new(&self.command)
            .args(["-f", page_arg.as_str(), "-l", page_arg.as_str()])
            .arg("-r")
            .arg(dpi.to_string())
            .args(["-png", "-singlefile"])
            .arg(pdf)
            .arg(&prefix)
            .output()
            .with_context(|| format!("Failed to run {}", self.command.display()))?;

        if !output.status.success() {
            bail!(
                "{} failed on page {}: {}",
                self.command.display(),
                page,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let rendered = prefix.with_extension("png");
        image::open(&rendered)
            .with_context(|| format!("Failed to load rendered page {}", page))
    }
}

/// [`TextRecognizer`] backed by the `tesseract` command-line program.
pub struct Tesseract {
    command: PathBuf,
}

impl Tesseract {
    pub fn new(command: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl Default for Tesseract {
    fn default() -> Self {
        Self::new("tesseract")
    }
}

impl TextRecognizer for Tesseract {
    fn recognize(&self, image: &DynamicImage) -> Result<String> {
        let input = tempfile::Builder::new()
            .prefix("docprompt-ocr-")
            .suffix(".png")
            .tempfile()
            .context("Failed to create temporary image file")?;
        image
            .save_with_format(input.path(), ImageFormat::Png)
            .context("Failed to write image for OCR")?;

        let output = Command::new(&self.command)
            .arg(input.path())
            .arg("stdout")
            .output()
            .with_context(|| format!("Failed to run {}", self.command.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(status = %output.status, "tesseract exited with an error");
            bail!("{} failed: {}", self.command.display(), stderr.trim());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
