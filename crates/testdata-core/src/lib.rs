#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/testdata/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for financial statement test data.
//!
//! This crate provides the foundational abstractions shared by the providers
//! and the extraction pipeline:
//!
//! - [`StatementProvider`](provider::StatementProvider) - Quarterly statement tables per ticker
//! - [`StatementTable`](statement::StatementTable) - One statement keyed by line item and period
//! - [`FinancialRecord`](record::FinancialRecord) - One flat row per company and period

/// Error types for data operations.
pub mod error;
/// Provider traits for fetching financial statements.
pub mod provider;
/// Flat per-period financial records and ratio arithmetic.
pub mod record;
/// Statement tables and line items.
pub mod statement;
/// Core identity types (Symbol, Company, Quarter).
pub mod types;

// Re-export commonly used items at crate root
pub use error::{DataError, Result};
pub use provider::{DataProvider, PeriodType, StatementProvider};
pub use record::{FinancialRecord, ratio};
pub use statement::{FinancialStatements, LineItem, PERIOD_COLUMN, StatementKind, StatementTable};
pub use types::{Company, Quarter, Symbol};
