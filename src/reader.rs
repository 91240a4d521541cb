use anyhow::Result;
use std::path::Path;

/// Shared interface for formats whose text is read straight from the
/// container, without any OCR capability (EPUB, DOCX).
pub trait DocumentReader: Sized {
    /// Open the document. The handle lives only as long as the reader.
    fn open(path: &Path) -> Result<Self>;
    /// Extract the full plain text, sections joined by newlines
    fn text(&self) -> Result<String>;
}

/// Open `path` with `R` and return its text; the reader is dropped on return.
pub fn read_text<R: DocumentReader>(path: &Path) -> Result<String> {
    R::open(path)?.text()
}
