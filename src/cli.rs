use crate::extractor::ExtractorConfig;
use crate::llm::{LlmConfig, DEFAULT_MODEL, DEFAULT_URL};
use crate::ocr::DEFAULT_DPI;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Extract text from a document and ask a local LLM about it
#[derive(Parser, Debug)]
#[command(name = "docprompt", version, about)]
pub struct Cli {
    /// Path to a PDF, Word, EPUB or image file.
    /// Asked for interactively when omitted.
    pub input: Option<PathBuf>,

    /// Model name passed to the inference server
    #[arg(short, long, env = "DOCPROMPT_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Generate endpoint of the inference server
    #[arg(long, env = "DOCPROMPT_URL", default_value = DEFAULT_URL)]
    pub url: String,

    /// Tesseract executable used for OCR
    #[arg(long, env = "DOCPROMPT_TESSERACT", default_value = "tesseract")]
    pub tesseract: PathBuf,

    /// pdftoppm executable used to render scanned PDF pages
    #[arg(long, env = "DOCPROMPT_PDFTOPPM", default_value = "pdftoppm")]
    pub pdftoppm: PathBuf,

    /// Resolution for rendering PDF pages before OCR
    #[arg(
        long,
        env = "DOCPROMPT_DPI",
        default_value_t = DEFAULT_DPI,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub dpi: u32,

    /// Send only the prompt, without the extracted text as context
    #[arg(long, default_value_t = false)]
    pub no_context: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn extractor_config(&self) -> ExtractorConfig {
        ExtractorConfig {
            tesseract_cmd: self.tesseract.clone(),
            pdftoppm_cmd: self.pdftoppm.clone(),
            dpi: self.dpi,
        }
    }

    pub fn llm_config(&self) -> LlmConfig {
        LlmConfig {
            model: self.model.clone(),
            url: self.url.clone(),
            ..LlmConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    /// Declared default of a flag, independent of any `DOCPROMPT_*` variable
    /// set in the environment running the tests.
    fn declared_default(id: &str) -> String {
        let command = Cli::command();
        let arg = command
            .get_arguments()
            .find(|arg| arg.get_id() == id)
            .unwrap();
        arg.get_default_values()[0].to_string_lossy().into_owned()
    }

    #[test]
    fn defaults_match_library_defaults() {
        let defaults = ExtractorConfig::default();
        assert_eq!(
            PathBuf::from(declared_default("tesseract")),
            defaults.tesseract_cmd
        );
        assert_eq!(
            PathBuf::from(declared_default("pdftoppm")),
            defaults.pdftoppm_cmd
        );
        assert_eq!(declared_default("dpi"), defaults.dpi.to_string());

        let llm = LlmConfig::default();
        assert_eq!(declared_default("model"), llm.model);
        assert_eq!(declared_default("url"), llm.url);
        assert!(llm.timeout.is_none());
    }

    #[test]
    fn config_builders_copy_parsed_values() {
        let cli = Cli::try_parse_from(["docprompt"]).unwrap();
        assert!(cli.input.is_none());
        assert!(!cli.no_context);

        let extractor = cli.extractor_config();
        assert_eq!(extractor.tesseract_cmd, cli.tesseract);
        assert_eq!(extractor.pdftoppm_cmd, cli.pdftoppm);
        assert_eq!(extractor.dpi, cli.dpi);

        let llm = cli.llm_config();
        assert_eq!(llm.model, cli.model);
        assert_eq!(llm.url, cli.url);
        assert!(llm.timeout.is_none());
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "docprompt",
            "scan.pdf",
            "--model",
            "llama3",
            "--tesseract",
            "/opt/tesseract/bin/tesseract",
            "--dpi",
            "200",
            "--no-context",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.input, Some(PathBuf::from("scan.pdf")));
        assert_eq!(cli.llm_config().model, "llama3");
        assert_eq!(
            cli.extractor_config().tesseract_cmd,
            PathBuf::from("/opt/tesseract/bin/tesseract")
        );
        assert_eq!(cli.extractor_config().dpi, 200);
        assert!(cli.no_context);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn zero_dpi_is_rejected() {
        let err = Cli::try_parse_from(["docprompt", "--dpi", "0"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(Cli::try_parse_from(["docprompt", "--dpi", "1"]).is_ok());
    }
}
