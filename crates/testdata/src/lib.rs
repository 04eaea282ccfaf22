#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/testdata/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Quarterly financial fixtures.
//!
//! # Features
//!
//! - `yahoo` - Yahoo Finance statement provider (default)
//! - `fmp` - Financial Modeling Prep statement provider
//!
//! # Example
//!
//! ```rust,ignore
//! use std::{path::Path, sync::Arc};
//! use testdata::{Universe, YahooProvider, run_universe};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = Arc::new(YahooProvider::new()?);
//!     let output = run_universe(
//!         provider,
//!         &Universe::sp500(),
//!         Path::new("test-data/real-sp500-financials.csv"),
//!     )
//!     .await?;
//!     println!("{}", output.summary);
//!     Ok(())
//! }
//! ```

// Core types and traits
pub use testdata_core::*;

// Providers
#[cfg(feature = "fmp")]
pub use testdata_fmp::FmpProvider;
#[cfg(feature = "yahoo")]
pub use testdata_yahoo::YahooProvider;

mod export;
pub use export::{ExportError, Field, Layout, to_csv_string, write_csv, write_records};

mod extract;
pub use extract::{Extraction, ExtractionStats, Extractor, extract_period, parse_period};

mod pipeline;
pub use pipeline::{RunOutput, run_all, run_universe};

mod summary;
pub use summary::DatasetSummary;

mod universe;
pub use universe::{BROAD_WINDOW, SECTOR_WINDOW, Universe};
