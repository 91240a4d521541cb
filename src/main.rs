use anyhow::Result;
use clap::Parser;
use docprompt::cli::Cli;
use docprompt::extractor::TextExtractor;
use docprompt::llm::LocalLlm;
use docprompt::session::{self, SessionOptions};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let extractor = TextExtractor::new(&cli.extractor_config());
    let llm = LocalLlm::new(cli.llm_config())?;
    tracing::debug!(model = llm.model(), "ready");

    let options = SessionOptions {
        input: cli.input.clone(),
        include_context: !cli.no_context,
    };

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    session::run(&mut stdin.lock(), &mut stdout.lock(), &extractor, &llm, &options)
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
