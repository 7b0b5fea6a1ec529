use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};
use rol_pdf_tables::{
    ExtractError, ExtractOptions, ExtractionReport, PageSelection, extract_tables, write_csv,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "pdf2csv",
    version,
    about = "Extract the tables of a text PDF into one indexed CSV"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract tables and write the concatenated CSV.
    Extract(ExtractArgs),
}

#[derive(Debug, Args)]
struct ExtractArgs {
    /// Input PDF path.
    #[arg(short, long)]
    input: PathBuf,

    /// Output CSV path.
    #[arg(short, long)]
    output: PathBuf,

    /// Page selection like 1-3,5.
    #[arg(long)]
    pages: Option<String>,

    /// Minimum cells required per candidate table row.
    #[arg(long, default_value_t = 2)]
    min_cols: usize,

    /// Print every extraction warning.
    #[arg(short, long)]
    verbose: bool,
}

fn parse_options(args: &ExtractArgs) -> Result<ExtractOptions, ExtractError> {
    let pages = args
        .pages
        .as_deref()
        .map(PageSelection::from_str)
        .transpose()?;
    if let Some(selection) = &pages {
        let selected = selection.iter().map(|page| page.to_string()).collect::<Vec<_>>();
        tracing::info!(pages = %selected.join(","), "restricting extraction to selected pages");
    }

    Ok(ExtractOptions {
        pages,
        min_cols: args.min_cols,
    })
}

fn log_report(report: &ExtractionReport, verbose: bool) {
    eprintln!(
        "{} row(s) from {} table(s), {} header-only table(s) skipped",
        report.row_count, report.table_count, report.discarded_tables
    );
    if report.warnings.is_empty() {
        return;
    }

    eprintln!("warning: {} issue(s) detected", report.warnings.len());
    if verbose {
        for warning in &report.warnings {
            eprintln!("  - {warning}");
        }
    }
}

fn run_extract(args: &ExtractArgs) -> Result<ExtractionReport, ExtractError> {
    let options = parse_options(args)?;
    let (dataset, report) = extract_tables(&args.input, &options)?;
    write_csv(&args.output, &dataset)?;
    Ok(report)
}

fn main() -> ExitCode {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rol_pdf_tables=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Extract(args) => match run_extract(&args) {
            Ok(report) => {
                log_report(&report, args.verbose);
                ExitCode::SUCCESS
            }
            Err(ExtractError::NoTablesFound) => {
                eprintln!("error: no tables found in '{}'", args.input.display());
                ExitCode::from(2)
            }
            Err(error) => {
                let error = anyhow::Error::new(error).context(format!(
                    "failed to extract tables from '{}'",
                    args.input.display()
                ));
                eprintln!("error: {error:#}");
                ExitCode::from(1)
            }
        },
    }
}
