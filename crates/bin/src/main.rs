#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use testdata::{
    DataError, ExportError, FmpProvider, StatementProvider, Universe, YahooProvider, run_all,
    run_universe,
};
use testdata_doc::{DocError, FontSource, PdfRenderer, deal_memo, page_count, write_document};
use thiserror::Error;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Cli, Command, ProviderKind, SourceArgs};

/// Errors that end a command with a non-zero exit code.
#[derive(Debug, Error)]
enum CliError {
    /// `--provider fmp` without an API key.
    #[error("FMP_API_KEY is not set; pass --fmp-api-key or export FMP_API_KEY")]
    MissingApiKey,

    /// A provider could not be constructed.
    #[error(transparent)]
    Data(#[from] DataError),

    /// Writing a CSV file failed.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Rendering or writing the PDF failed.
    #[error(transparent)]
    Doc(#[from] DocError),
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Builds the statement provider. FMP is asked for at most `window` periods.
fn provider(
    kind: ProviderKind,
    fmp_api_key: Option<&str>,
    window: usize,
) -> Result<Arc<dyn StatementProvider>, CliError> {
    let provider: Arc<dyn StatementProvider> = match kind {
        ProviderKind::Yahoo => Arc::new(YahooProvider::new()?),
        ProviderKind::Fmp => {
            let key = fmp_api_key
                .filter(|k| !k.trim().is_empty())
                .ok_or(CliError::MissingApiKey)?;
            Arc::new(FmpProvider::new(key).with_limit(window))
        }
    };
    Ok(provider)
}

fn with_window(universe: Universe, source: &SourceArgs) -> Universe {
    match source.window {
        Some(window) => universe.with_window(usize::from(window)),
        None => universe,
    }
}

async fn financials(
    source: &SourceArgs,
    output: &Path,
    fmp_api_key: Option<&str>,
) -> Result<(), CliError> {
    let universe = with_window(Universe::sp500(), source);
    let provider = provider(source.provider, fmp_api_key, universe.window)?;

    let run = run_universe(provider, &universe, output).await?;

    println!("Saved {} records to {}", run.records(), run.path.display());
    println!("{}", run.summary);
    Ok(())
}

async fn sectors(
    source: &SourceArgs,
    output_dir: &Path,
    fmp_api_key: Option<&str>,
) -> Result<(), CliError> {
    let universes: Vec<Universe> = Universe::sectors()
        .into_iter()
        .map(|u| with_window(u, source))
        .collect();
    let window = universes.iter().map(|u| u.window).max().unwrap_or_default();
    let provider = provider(source.provider, fmp_api_key, window)?;

    let runs = run_all(provider, &universes, output_dir).await?;

    println!("Sector datasets written to {}", output_dir.display());
    let mut total = 0;
    for run in &runs {
        println!("  {:<16} {:>4} records  {}", run.universe, run.records(), run.path.display());
        total += run.records();
    }
    println!("  {:<16} {:>4} records", "Total", total);
    Ok(())
}

fn fonts(dir: Option<&Path>, family: Option<&str>) -> Result<FontSource, DocError> {
    match (dir, family) {
        (Some(dir), Some(family)) => Ok(FontSource::new(dir, family)),
        (Some(dir), None) => FontSource::find_in(dir).ok_or_else(|| DocError::FontNotFound {
            dir: dir.to_path_buf(),
            family: testdata_doc::FAMILIES.join("|"),
        }),
        (None, _) => FontSource::discover(),
    }
}

fn memo(output: &Path, fonts: FontSource) -> Result<(), CliError> {
    let bytes = write_document(&PdfRenderer::new(fonts), &deal_memo(), output)?;
    let pages = page_count(&std::fs::read(output).map_err(DocError::from)?)?;
    println!("Created PDF: {}", output.display());
    println!("  Size: {bytes} bytes");
    println!("  Pages: {pages}");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let key = cli.fmp_api_key.as_deref();

    let result = match &cli.command {
        Command::Financials { source, output } => financials(source, output, key).await,
        Command::Sectors { source, output_dir } => sectors(source, output_dir, key).await,
        Command::DealMemo {
            output,
            font_dir,
            font_family,
        } => fonts(font_dir.as_deref(), font_family.as_deref())
            .map_err(CliError::from)
            .and_then(|fonts| memo(output, fonts)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            ExitCode::FAILURE
        }
    }
}
