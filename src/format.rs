use std::fmt;
use std::path::{Path, PathBuf};

/// Which extractor handles a document, decided from its file extension alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatTag {
    Pdf,
    /// Both `.docx` and legacy `.doc`
    Word,
    Epub,
    Image,
    Unsupported,
}

impl FormatTag {
    pub fn from_path(path: &Path) -> Self {
        match extension_of(path).as_str() {
            ".pdf" => FormatTag::Pdf,
            ".doc" | ".docx" => FormatTag::Word,
            ".epub" => FormatTag::Epub,
            ".jpg" | ".jpeg" | ".png" | ".bmp" | ".tiff" => FormatTag::Image,
            _ => FormatTag::Unsupported,
        }
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormatTag::Pdf => "PDF",
            FormatTag::Word => "Word",
            FormatTag::Epub => "EPUB",
            FormatTag::Image => "image",
            FormatTag::Unsupported => "unsupported",
        };
        f.write_str(name)
    }
}

/// Lower-cased extension including the leading dot, or an empty string.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// A path paired with the format it was classified as.
///
/// The tag is computed once in [`Document::classify`] and never changes.
#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
    format: FormatTag,
}

impl Document {
    pub fn classify(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = FormatTag::from_path(&path);
        Self { path, format }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> FormatTag {
        self.format
    }
}
