#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/testdata/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Financial Modeling Prep (FMP) statement provider.
//!
//! This crate implements [`StatementProvider`] for the
//! [Financial Modeling Prep](https://financialmodelingprep.com/) stable API.
//!
//! # Usage
//!
//! ```rust,ignore
//! use testdata_fmp::FmpProvider;
//! use testdata_core::{PeriodType, StatementProvider, Symbol};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = FmpProvider::new("your_api_key").with_limit(8);
//!     let statements = provider
//!         .fetch_statements(&Symbol::new("AAPL"), PeriodType::Quarterly)
//!         .await?;
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use testdata_core::{
    DataError, DataProvider, FinancialStatements, LineItem, PeriodType, Result, StatementKind,
    StatementProvider, StatementTable, Symbol,
};
use tracing::warn;

/// Base URL for the FMP stable API.
const FMP_BASE_URL: &str = "https://financialmodelingprep.com/stable";

/// Financial Modeling Prep statement provider.
#[derive(Clone)]
pub struct FmpProvider {
    client: Client,
    api_key: String,
    limit: Option<usize>,
}

impl fmt::Debug for FmpProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FmpProvider")
            .field("api_key", &"[REDACTED]")
            .field("limit", &self.limit)
            .finish()
    }
}

impl FmpProvider {
    /// Create a new FMP provider with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_client(Client::new(), api_key)
    }

    /// Create a new FMP provider with a custom HTTP client.
    #[must_use]
    pub fn with_client(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            limit: None,
        }
    }

    /// Ask FMP for at most `limit` periods per statement.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Build a URL with the API key appended.
    fn url(&self, endpoint: &str) -> String {
        if endpoint.contains('?') {
            format!("{FMP_BASE_URL}/{endpoint}&apikey={}", self.api_key)
        } else {
            format!("{FMP_BASE_URL}/{endpoint}?apikey={}", self.api_key)
        }
    }

    /// Endpoint path for one statement of a symbol.
    fn statement_endpoint(&self, path: &str, symbol: &Symbol, period_type: PeriodType) -> String {
        let period = match period_type {
            PeriodType::Annual => "annual",
            PeriodType::Quarterly => "quarter",
        };
        let limit_param = self
            .limit
            .map(|l| format!("&limit={l}"))
            .unwrap_or_default();
        format!(
            "{path}?symbol={}&period={period}{limit_param}",
            symbol.as_str()
        )
    }

    /// Make a GET request and parse the JSON response.
    async fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = self.url(endpoint);
        tracing::debug!("FMP request: {}", endpoint);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DataError::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DataError::RateLimited {
                provider: "FMP".to_string(),
            });
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(DataError::AuthenticationFailed("FMP".to_string()));
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(DataError::Network(format!("HTTP {status}: {text}")));
        }

        let text = response
            .text()
            .await
            .map_err(|e| DataError::Network(e.to_string()))?;

        // FMP reports some failures with a 200 and an error object
        if text.contains("\"Error Message\"") || text.contains("\"error\"") {
            return Err(DataError::Network(text));
        }

        serde_json::from_str(&text).map_err(|e| DataError::Parse(format!("{e}: {text}")))
    }

    async fn fetch_income_statements(
        &self,
        symbol: &Symbol,
        period_type: PeriodType,
    ) -> Result<Vec<FmpIncomeStatement>> {
        let endpoint = self.statement_endpoint("income-statement", symbol, period_type);
        self.get(&endpoint).await
    }

    async fn fetch_balance_sheets(
        &self,
        symbol: &Symbol,
        period_type: PeriodType,
    ) -> Result<Vec<FmpBalanceSheet>> {
        let endpoint = self.statement_endpoint("balance-sheet-statement", symbol, period_type);
        self.get(&endpoint).await
    }

    async fn fetch_cash_flows(
        &self,
        symbol: &Symbol,
        period_type: PeriodType,
    ) -> Result<Vec<FmpCashFlow>> {
        let endpoint = self.statement_endpoint("cash-flow-statement", symbol, period_type);
        self.get(&endpoint).await
    }
}

impl DataProvider for FmpProvider {
    fn name(&self) -> &str {
        "FMP"
    }

    fn description(&self) -> &str {
        "Financial Modeling Prep - Financial data and stock market API"
    }
}

#[async_trait]
impl StatementProvider for FmpProvider {
    async fn fetch_statements(
        &self,
        symbol: &Symbol,
        period_type: PeriodType,
    ) -> Result<FinancialStatements> {
        let income = self.fetch_income_statements(symbol, period_type).await?;
        if income.is_empty() {
            return Err(DataError::SymbolNotFound(symbol.to_string()));
        }

        let balance = self
            .fetch_balance_sheets(symbol, period_type)
            .await
            .unwrap_or_else(|e| {
                warn!(symbol = %symbol, error = %e, "FMP balance sheet unavailable");
                Vec::new()
            });

        let cash = self
            .fetch_cash_flows(symbol, period_type)
            .await
            .unwrap_or_else(|e| {
                warn!(symbol = %symbol, error = %e, "FMP cash flow unavailable");
                Vec::new()
            });

        Ok(FinancialStatements {
            income: build_table(StatementKind::Income, &income)?,
            balance_sheet: build_table(StatementKind::BalanceSheet, &balance)?,
            cash_flow: build_table(StatementKind::CashFlow, &cash)?,
        })
    }
}

/// A row of an FMP statement response.
trait StatementRow {
    /// Period end marker.
    fn date(&self) -> &str;

    /// Reported value of `item`, if this statement carries it.
    fn value(&self, item: LineItem) -> Option<f64>;
}

/// Convert FMP rows (newest first) into a statement table.
///
/// Line items never reported in any period get no row.
fn build_table<T: StatementRow>(kind: StatementKind, entries: &[T]) -> Result<Option<StatementTable>> {
    if entries.is_empty() {
        return Ok(None);
    }

    let periods = entries.iter().map(|e| e.date().to_string()).collect();
    let rows = LineItem::ALL
        .iter()
        .filter(|item| item.statement() == kind)
        .map(|item| {
            let values: Vec<Option<f64>> = entries.iter().map(|e| e.value(*item)).collect();
            (item, values)
        })
        .filter(|(_, values)| values.iter().any(Option::is_some))
        .map(|(item, values)| (item.label().to_string(), values))
        .collect();

    StatementTable::new(periods, rows).map(Some)
}

// ============================================================================
// FMP API Response Types
// ============================================================================

/// FMP Income Statement response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FmpIncomeStatement {
    date: String,
    revenue: Option<f64>,
    gross_profit: Option<f64>,
    operating_income: Option<f64>,
    net_income: Option<f64>,
    research_and_development_expenses: Option<f64>,
    ebitda: Option<f64>,
}

impl StatementRow for FmpIncomeStatement {
    fn date(&self) -> &str {
        &self.date
    }

    fn value(&self, item: LineItem) -> Option<f64> {
        match item {
            LineItem::TotalRevenue => self.revenue,
            LineItem::GrossProfit => self.gross_profit,
            LineItem::OperatingIncome => self.operating_income,
            LineItem::NetIncome => self.net_income,
            LineItem::ResearchAndDevelopment => self.research_and_development_expenses,
            LineItem::Ebitda => self.ebitda,
            _ => None,
        }
    }
}

/// FMP Balance Sheet response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FmpBalanceSheet {
    date: String,
    total_assets: Option<f64>,
    total_debt: Option<f64>,
}

impl StatementRow for FmpBalanceSheet {
    fn date(&self) -> &str {
        &self.date
    }

    fn value(&self, item: LineItem) -> Option<f64> {
        match item {
            LineItem::TotalAssets => self.total_assets,
            LineItem::TotalDebt => self.total_debt,
            _ => None,
        }
    }
}

/// FMP Cash Flow Statement response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FmpCashFlow {
    date: String,
    operating_cash_flow: Option<f64>,
    free_cash_flow: Option<f64>,
}

impl StatementRow for FmpCashFlow {
    fn date(&self) -> &str {
        &self.date
    }

    fn value(&self, item: LineItem) -> Option<f64> {
        match item {
            LineItem::OperatingCashFlow => self.operating_cash_flow,
            LineItem::FreeCashFlow => self.free_cash_flow,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let provider = FmpProvider::new("test_key");
        assert_eq!(
            provider.url("quote?symbol=AAPL"),
            "https://financialmodelingprep.com/stable/quote?symbol=AAPL&apikey=test_key"
        );
        assert_eq!(
            provider.url("profile"),
            "https://financialmodelingprep.com/stable/profile?apikey=test_key"
        );
    }

    #[test]
    fn test_statement_endpoint() {
        let provider = FmpProvider::new("test_key");
        let symbol = Symbol::new("msft");
        assert_eq!(
            provider.statement_endpoint("income-statement", &symbol, PeriodType::Quarterly),
            "income-statement?symbol=MSFT&period=quarter"
        );

        let provider = provider.with_limit(8);
        assert_eq!(
            provider.statement_endpoint("cash-flow-statement", &symbol, PeriodType::Annual),
            "cash-flow-statement?symbol=MSFT&period=annual&limit=8"
        );
    }

    #[test]
    fn test_provider_metadata() {
        let provider = FmpProvider::new("test_key");
        assert_eq!(provider.name(), "FMP");
        assert!(!provider.description().is_empty());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let provider = FmpProvider::new("secret_key_12345");
        let debug_str = format!("{:?}", provider);
        assert!(!debug_str.contains("secret_key_12345"));
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn test_income_table_keeps_absent_fields_absent() {
        let json = r#"[
            {"date": "2024-06-29", "symbol": "AAPL", "revenue": 85777000000, "grossProfit": 39678000000,
             "operatingIncome": 25352000000, "netIncome": 21448000000,
             "researchAndDevelopmentExpenses": 8006000000, "ebitda": 28202000000},
            {"date": "2024-03-30", "symbol": "AAPL", "revenue": 90753000000, "grossProfit": 42271000000,
             "operatingIncome": 27900000000, "netIncome": null, "ebitda": 30736000000}
        ]"#;
        let rows: Vec<FmpIncomeStatement> = serde_json::from_str(json).unwrap();
        let table = build_table(StatementKind::Income, &rows).unwrap().unwrap();

        assert_eq!(table.num_periods(), 2);
        assert_eq!(table.period(0), Some("2024-06-29"));
        assert_eq!(table.value("Total Revenue", 1).unwrap(), Some(90_753_000_000.0));
        assert_eq!(table.value("Net Income", 1).unwrap(), None);
        assert_eq!(table.value("Research And Development", 1).unwrap(), None);
        assert_eq!(table.value("EBITDA", 0).unwrap(), Some(28_202_000_000.0));
    }

    #[test]
    fn test_unreported_rows_are_dropped() {
        let json = r#"[{"date": "2024-06-29", "totalAssets": 331612000000}]"#;
        let rows: Vec<FmpBalanceSheet> = serde_json::from_str(json).unwrap();
        let table = build_table(StatementKind::BalanceSheet, &rows).unwrap().unwrap();

        assert!(table.has_row("Total Assets"));
        assert!(!table.has_row("Total Debt"));

        let empty: Vec<FmpCashFlow> = Vec::new();
        assert!(build_table(StatementKind::CashFlow, &empty).unwrap().is_none());
    }
}
