use std::process::ExitCode;

use clap::Parser;
use rol_procedimentos::config::Config;
use rol_procedimentos::error::PipelineError;
use rol_procedimentos::pipeline;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "rol_procedimentos=info,rol_pdf_tables=warn";
const VERBOSE_LOG_FILTER: &str = "rol_procedimentos=debug,rol_pdf_tables=debug";

#[derive(Debug, Parser)]
#[command(
    name = "rol-procedimentos",
    version,
    about = "Download the ANS procedure list annex and publish its tables as a zipped CSV"
)]
struct Cli {
    /// Log every pipeline step, retry and extraction warning.
    #[arg(short, long)]
    verbose: bool,
}

fn execute(config: &Config) -> Result<std::path::PathBuf, PipelineError> {
    let client = pipeline::http_client(config)?;
    pipeline::run(config, &client)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    match execute(&Config::default()) {
        Ok(archive) => {
            let archive = std::path::absolute(&archive).unwrap_or(archive);
            println!("Process completed successfully!");
            println!("Output file: {}", archive.display());
            ExitCode::SUCCESS
        }
        Err(error) => {
            tracing::debug!(kind = error.kind(), "pipeline aborted");
            eprintln!("Error during execution: {error}");
            ExitCode::from(1)
        }
    }
}
