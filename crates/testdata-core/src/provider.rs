//! Provider traits for fetching financial statements.
//!
//! - [`DataProvider`] - Base trait for all data providers
//! - [`StatementProvider`] - Income statement, balance sheet and cash flow per ticker

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::{error::Result, statement::FinancialStatements, types::Symbol};

/// Period type for fundamental financial data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodType {
    /// Annual reporting period.
    Annual,
    /// Quarterly reporting period.
    #[default]
    Quarterly,
}

/// Base trait for all data providers.
pub trait DataProvider: Send + Sync + Debug {
    /// Returns the name of this provider (e.g., "Yahoo Finance").
    fn name(&self) -> &str;

    /// Returns a description of this provider.
    fn description(&self) -> &str;
}

/// Provider of financial statement tables.
#[async_trait]
pub trait StatementProvider: DataProvider {
    /// Fetches the income statement, balance sheet and cash-flow statement
    /// for a symbol.
    ///
    /// Tables list their periods newest first. A statement the provider does
    /// not have is `None`; an unknown symbol or a transport failure is an
    /// error.
    async fn fetch_statements(
        &self,
        symbol: &Symbol,
        period_type: PeriodType,
    ) -> Result<FinancialStatements>;
}
