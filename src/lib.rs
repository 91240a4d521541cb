//! Extract plain text from PDF, Word, EPUB and image files, falling back to
//! OCR for scanned PDFs, and pass it to a locally hosted language model.

pub mod cli;
pub mod docx_reader;
pub mod epub_reader;
pub mod error;
pub mod extractor;
pub mod format;
pub mod image_reader;
pub mod llm;
pub mod ocr;
pub mod pdf_reader;
pub mod reader;
pub mod session;

pub use error::{ErrorKind, ExtractError, InferenceError};
pub use extractor::{ExtractorConfig, TextExtractor};
pub use format::{Document, FormatTag};
