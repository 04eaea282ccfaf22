//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Generate financial statement fixtures and sample documents.
#[derive(Debug, Parser)]
#[command(name = "testdata", version, about)]
pub(crate) struct Cli {
    /// Financial Modeling Prep API key, required with `--provider fmp`.
    #[arg(long, env = "FMP_API_KEY", global = true, hide_env_values = true)]
    pub(crate) fmp_api_key: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub(crate) verbose: u8,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Extract the broad ten-company sample to one CSV file.
    Financials {
        #[command(flatten)]
        source: SourceArgs,

        /// Output file.
        #[arg(long, default_value = "test-data/real-sp500-financials.csv")]
        output: PathBuf,
    },

    /// Extract the five sector universes, one CSV file each.
    Sectors {
        #[command(flatten)]
        source: SourceArgs,

        /// Directory the sector files are written to.
        #[arg(long, default_value = "data/demo")]
        output_dir: PathBuf,
    },

    /// Render the sample deal memorandum PDF.
    DealMemo {
        /// Output file.
        #[arg(long, default_value = "test-data/sample-deal-memo.pdf")]
        output: PathBuf,

        /// Directory holding the TrueType font files. Searched in the usual
        /// system font directories when omitted.
        #[arg(long, env = "TESTDATA_FONT_DIR")]
        font_dir: Option<PathBuf>,

        /// Font file name stem, e.g. `LiberationSans` for
        /// `LiberationSans-Regular.ttf`.
        #[arg(long, requires = "font_dir")]
        font_family: Option<String>,
    },
}

#[derive(Debug, Args)]
pub(crate) struct SourceArgs {
    /// Statement provider.
    #[arg(long, value_enum, default_value_t = ProviderKind::Yahoo)]
    pub(crate) provider: ProviderKind,

    /// Override the number of recent quarters kept per company.
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub(crate) window: Option<u16>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum ProviderKind {
    /// Yahoo Finance fundamentals timeseries.
    Yahoo,
    /// Financial Modeling Prep.
    Fmp,
}
