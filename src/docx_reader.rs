use crate::reader::DocumentReader;
use anyhow::{Context, Result};
use docx_rust::document::{BodyContent, Paragraph, ParagraphContent, Run, RunContent};
use docx_rust::DocxFile;
use std::path::Path;

pub struct DocxData {
    /// DocxFile owns the raw data; Docx borrows from it.
    /// We store the file so it lives long enough, then parse on demand.
    file: DocxFile,
}

impl DocxData {
    /// Text of every top-level body paragraph, in source order.
    pub fn paragraphs(&self) -> Result<Vec<String>> {
        let docx = self
            .file
            .parse()
            .map_err(|e| anyhow::anyhow!("{}", e))
            .context("Failed to parse DOCX content")?;

        Ok(docx
            .document
            .body
            .content
            .iter()
            .filter_map(|content| match content {
                BodyContent::Paragraph(para) => Some(paragraph_text(para)),
                _ => None,
            })
            .collect())
    }
}

impl DocumentReader for DocxData {
    fn open(path: &Path) -> Result<Self> {
        let file = DocxFile::from_file(path)
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("Failed to open DOCX: {}", path.display()))?;
        Ok(Self { file })
    }

    fn text(&self) -> Result<String> {
        Ok(self.paragraphs()?.join("\n"))
    }
}

fn paragraph_text(para: &Paragraph) -> String {
    let mut text = String::new();

    for pc in &para.content {
        match pc {
            ParagraphContent::Run(run) => push_run_text(&mut text, run),
            ParagraphContent::Link(link) => {
                if let Some(ref run) = link.content {
                    push_run_text(&mut text, run);
                }
            }
            _ => {}
        }
    }

    text
}

fn push_run_text(text: &mut String, run: &Run) {
    for rc in &run.content {
        match rc {
            RunContent::Text(t) => text.push_str(&t.text),
            RunContent::Break(_) => text.push('\n'),
            RunContent::Tab(_) => text.push('\t'),
            _ => {}
        }
    }
}
