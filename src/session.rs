//! The interactive flow: read a path, show the extracted text, read a
//! prompt, show the model's answer.

use crate::extractor::TextExtractor;
use crate::llm::LanguageModel;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

pub struct SessionOptions {
    /// File given on the command line; prompted for when `None`
    pub input: Option<PathBuf>,
    /// Prepend the extracted text to the user's prompt
    pub include_context: bool,
}

pub fn run<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    extractor: &TextExtractor,
    model: &dyn LanguageModel,
    options: &SessionOptions,
) -> Result<()> {
    let path = match options.input {
        Some(ref path) => path.clone(),
        None => PathBuf::from(ask(input, output, "Enter the path to the file: ")?),
    };

    let context = match extractor.extract_text(&path) {
        Ok(text) => {
            writeln!(output, "\n--- Extracted Text ---")?;
            writeln!(output, "{}", text)?;
            text
        }
        Err(e) => {
            writeln!(output, "\n--- Extracted Text ---")?;
            writeln!(output, "{}", e)?;
            String::new()
        }
    };

    let prompt = ask(input, output, "\nEnter the prompt for the LLM: ")?;
    let full_prompt = if options.include_context {
        compose_prompt(&context, &prompt)
    } else {
        prompt
    };

    let response = model
        .generate(&full_prompt)
        .context("Failed to get a response from the model")?;

    writeln!(output, "\n--- LLM Response ---")?;
    writeln!(output, "{}", response)?;
    output.flush()?;

    Ok(())
}

/// Place the document text ahead of the question; empty context is dropped.
pub fn compose_prompt(context: &str, prompt: &str) -> String {
    let context = context.trim();
    if context.is_empty() {
        prompt.to_string()
    } else {
        format!("{}\n\n{}", context, prompt)
    }
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<String> {
    write!(output, "{}", question)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line).context("Failed to read from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
