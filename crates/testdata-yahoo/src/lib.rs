#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/testdata/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Yahoo Finance statement provider.
//!
//! This crate implements [`StatementProvider`] from `testdata-core` on top of
//! Yahoo Finance's fundamentals-timeseries API. One request per ticker asks
//! for every line item as a separate series; the series are then regrouped
//! into income statement, balance sheet and cash-flow tables.
//!
//! # Example
//!
//! ```no_run
//! use testdata_yahoo::YahooProvider;
//! use testdata_core::{PeriodType, StatementProvider, Symbol};
//!
//! # async fn example() -> testdata_core::Result<()> {
//! let provider = YahooProvider::new()?;
//! let statements = provider
//!     .fetch_statements(&Symbol::new("AAPL"), PeriodType::Quarterly)
//!     .await?;
//! println!("income periods: {:?}", statements.income.map(|t| t.num_periods()));
//! # Ok(())
//! # }
//! ```

use std::collections::{BTreeMap, HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use testdata_core::{
    DataError, DataProvider, FinancialStatements, LineItem, PeriodType, Result, StatementKind,
    StatementProvider, StatementTable, Symbol,
};
use tracing::debug;

/// Yahoo Finance fundamentals-timeseries base URL.
const TIMESERIES_API_URL: &str =
    "https://query2.finance.yahoo.com/ws/fundamentals-timeseries/v1/finance/timeseries";

/// User agent for HTTP requests.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

/// Earliest period end requested from the API.
const HISTORY_START: (i32, u32, u32) = (2016, 12, 31);

/// Yahoo Finance statement provider.
#[derive(Debug)]
pub struct YahooProvider {
    client: reqwest::Client,
    base_url: String,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider with default settings.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| DataError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self::with_client(client))
    }

    /// Create a new Yahoo Finance provider with a custom HTTP client.
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: TIMESERIES_API_URL.to_string(),
        }
    }

    /// Point the provider at a different timeseries endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build the timeseries URL for a symbol, requesting every line item.
    fn build_timeseries_url(&self, symbol: &Symbol, period_type: PeriodType, end: i64) -> String {
        let prefix = series_prefix(period_type);
        let types = LineItem::ALL
            .iter()
            .map(|item| format!("{prefix}{}", series_name(*item)))
            .collect::<Vec<_>>()
            .join(",");

        let (year, month, day) = HISTORY_START;
        let start = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc().timestamp())
            .unwrap_or(0);

        format!(
            "{}/{symbol}?symbol={symbol}&type={types}&period1={start}&period2={end}",
            self.base_url,
            symbol = symbol.as_str(),
        )
    }
}

impl DataProvider for YahooProvider {
    fn name(&self) -> &str {
        "Yahoo Finance"
    }

    fn description(&self) -> &str {
        "Yahoo Finance fundamentals-timeseries provider for financial statements"
    }
}

#[async_trait]
impl StatementProvider for YahooProvider {
    async fn fetch_statements(
        &self,
        symbol: &Symbol,
        period_type: PeriodType,
    ) -> Result<FinancialStatements> {
        let url = self.build_timeseries_url(symbol, period_type, Utc::now().timestamp());
        debug!("Fetching statements: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DataError::Network(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DataError::RateLimited {
                provider: "Yahoo Finance".to_string(),
            });
        }

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(DataError::SymbolNotFound(symbol.to_string()));
        }

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(DataError::AuthenticationFailed("Yahoo Finance".to_string()));
        }

        if !response.status().is_success() {
            return Err(DataError::Network(format!(
                "HTTP {} for {}",
                response.status(),
                symbol
            )));
        }

        let body: TimeseriesResponse = response
            .json()
            .await
            .map_err(|e| DataError::Parse(e.to_string()))?;

        if let Some(error) = body.timeseries.error {
            if error.code == "Not Found" {
                return Err(DataError::SymbolNotFound(symbol.to_string()));
            }
            return Err(DataError::Other(format!(
                "{}: {}",
                error.code, error.description
            )));
        }

        assemble_statements(period_type, body.timeseries.result)
    }
}

/// Series prefix Yahoo uses for each period type.
const fn series_prefix(period_type: PeriodType) -> &'static str {
    match period_type {
        PeriodType::Annual => "annual",
        PeriodType::Quarterly => "quarterly",
    }
}

/// Yahoo series name of a line item, without the period prefix.
const fn series_name(item: LineItem) -> &'static str {
    match item {
        LineItem::TotalRevenue => "TotalRevenue",
        LineItem::GrossProfit => "GrossProfit",
        LineItem::OperatingIncome => "OperatingIncome",
        LineItem::NetIncome => "NetIncome",
        LineItem::ResearchAndDevelopment => "ResearchAndDevelopment",
        LineItem::Ebitda => "EBITDA",
        LineItem::TotalAssets => "TotalAssets",
        LineItem::TotalDebt => "TotalDebt",
        LineItem::OperatingCashFlow => "OperatingCashFlow",
        LineItem::FreeCashFlow => "FreeCashFlow",
    }
}

/// Line item for a full series type such as `quarterlyTotalRevenue`.
fn line_item_for(series_type: &str, period_type: PeriodType) -> Option<LineItem> {
    let name = series_type.strip_prefix(series_prefix(period_type))?;
    LineItem::ALL
        .into_iter()
        .find(|item| series_name(*item) == name)
}

/// Regroup per-line-item series into the three statement tables.
///
/// Periods are sorted newest first. A line item without a single reported
/// value gets no row, and a statement without any periods is `None`.
fn assemble_statements(
    period_type: PeriodType,
    series: Vec<TimeseriesSeries>,
) -> Result<FinancialStatements> {
    let mut cells: HashMap<StatementKind, BTreeMap<String, HashMap<LineItem, f64>>> =
        HashMap::new();
    let mut reported: HashSet<LineItem> = HashSet::new();

    for mut entry in series {
        let Some(series_type) = entry.meta.kind.first().cloned() else {
            continue;
        };
        let Some(item) = line_item_for(&series_type, period_type) else {
            debug!("Ignoring unexpected series {}", series_type);
            continue;
        };
        let Some(raw_points) = entry.values.remove(&series_type) else {
            continue;
        };

        let points: Vec<Option<DataPoint>> =
            serde_json::from_value(raw_points).map_err(|e| DataError::Parse(e.to_string()))?;

        let kind = item.statement();
        for point in points.into_iter().flatten() {
            let periods = cells.entry(kind).or_default();
            let row = periods.entry(point.as_of_date).or_default();
            if let Some(value) = point.reported_value.and_then(|v| v.raw) {
                row.insert(item, value);
                reported.insert(item);
            }
        }
    }

    let mut build = |kind: StatementKind| -> Result<Option<StatementTable>> {
        let Some(periods) = cells.remove(&kind) else {
            return Ok(None);
        };
        let markers: Vec<String> = periods.keys().rev().cloned().collect();
        let rows = LineItem::ALL
            .iter()
            .filter(|item| item.statement() == kind && reported.contains(*item))
            .map(|item| {
                let values = periods
                    .values()
                    .rev()
                    .map(|row| row.get(item).copied())
                    .collect();
                (item.label().to_string(), values)
            })
            .collect();

        StatementTable::new(markers, rows).map(Some)
    };

    Ok(FinancialStatements {
        income: build(StatementKind::Income)?,
        balance_sheet: build(StatementKind::BalanceSheet)?,
        cash_flow: build(StatementKind::CashFlow)?,
    })
}

// ============================================================================
// Yahoo Finance API Response Types
// ============================================================================

/// Timeseries API response.
#[derive(Debug, Deserialize)]
struct TimeseriesResponse {
    timeseries: TimeseriesResult,
}

#[derive(Debug, Deserialize)]
struct TimeseriesResult {
    #[serde(default)]
    result: Vec<TimeseriesSeries>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    description: String,
}

/// One line item; the data points live under a key equal to the series type.
#[derive(Debug, Deserialize)]
struct TimeseriesSeries {
    meta: SeriesMeta,
    #[serde(flatten)]
    values: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct SeriesMeta {
    #[serde(rename = "type", default)]
    kind: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DataPoint {
    as_of_date: String,
    reported_value: Option<ReportedValue>,
}

#[derive(Debug, Deserialize)]
struct ReportedValue {
    raw: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"{
        "timeseries": {
            "result": [
                {
                    "meta": {"symbol": ["AAPL"], "type": ["quarterlyTotalRevenue"]},
                    "timestamp": [1703980800, 1711843200],
                    "quarterlyTotalRevenue": [
                        {"asOfDate": "2023-12-31", "periodType": "3M", "reportedValue": {"raw": 119575000000, "fmt": "119.58B"}},
                        {"asOfDate": "2024-03-31", "periodType": "3M", "reportedValue": {"raw": 90753000000, "fmt": "90.75B"}}
                    ]
                },
                {
                    "meta": {"symbol": ["AAPL"], "type": ["quarterlyNetIncome"]},
                    "timestamp": [1711843200],
                    "quarterlyNetIncome": [
                        null,
                        {"asOfDate": "2024-03-31", "periodType": "3M", "reportedValue": {"raw": 23636000000, "fmt": "23.64B"}}
                    ]
                },
                {
                    "meta": {"symbol": ["AAPL"], "type": ["quarterlyEBITDA"]}
                },
                {
                    "meta": {"symbol": ["AAPL"], "type": ["quarterlyTotalAssets"]},
                    "timestamp": [1711843200],
                    "quarterlyTotalAssets": [
                        {"asOfDate": "2024-03-31", "periodType": "3M", "reportedValue": {"raw": 337411000000, "fmt": "337.41B"}}
                    ]
                }
            ],
            "error": null
        }
    }"#;

    #[test]
    fn test_build_timeseries_url() {
        let provider = YahooProvider::new().unwrap();
        let symbol = Symbol::new("AAPL");

        let url = provider.build_timeseries_url(&symbol, PeriodType::Quarterly, 1_700_000_000);

        assert!(url.starts_with(TIMESERIES_API_URL));
        assert!(url.contains("/AAPL?symbol=AAPL"));
        assert!(url.contains("quarterlyTotalRevenue"));
        assert!(url.contains("quarterlyEBITDA"));
        assert!(url.contains("quarterlyFreeCashFlow"));
        assert!(url.contains("period2=1700000000"));
        assert!(!url.contains("annual"));
    }

    #[test]
    fn test_line_item_for() {
        assert_eq!(
            line_item_for("quarterlyGrossProfit", PeriodType::Quarterly),
            Some(LineItem::GrossProfit)
        );
        assert_eq!(
            line_item_for("annualTotalDebt", PeriodType::Annual),
            Some(LineItem::TotalDebt)
        );
        assert_eq!(line_item_for("annualTotalDebt", PeriodType::Quarterly), None);
        assert_eq!(line_item_for("quarterlyDilutedEPS", PeriodType::Quarterly), None);
    }

    #[test]
    fn test_assemble_statements() {
        let body: TimeseriesResponse = serde_json::from_str(RESPONSE).unwrap();
        let statements = assemble_statements(PeriodType::Quarterly, body.timeseries.result).unwrap();

        let income = statements.income.unwrap();
        assert_eq!(income.num_periods(), 2);
        assert_eq!(income.period(0), Some("2024-03-31"));
        assert_eq!(income.period(1), Some("2023-12-31"));
        assert_eq!(income.labels(), vec!["Total Revenue", "Net Income"]);
        assert_eq!(income.value("Total Revenue", 0).unwrap(), Some(90_753_000_000.0));
        assert_eq!(income.value("Net Income", 0).unwrap(), Some(23_636_000_000.0));
        assert_eq!(income.value("Net Income", 1).unwrap(), None);
        assert!(!income.has_row("EBITDA"));

        let balance = statements.balance_sheet.unwrap();
        assert_eq!(balance.position("2024-03-31"), Some(0));
        assert!(statements.cash_flow.is_none());
    }

    #[test]
    fn test_assemble_empty_result() {
        let statements = assemble_statements(PeriodType::Quarterly, Vec::new()).unwrap();
        assert!(!statements.has_income());
    }

    #[test]
    fn test_provider_info() {
        let provider = YahooProvider::new().unwrap();
        assert_eq!(provider.name(), "Yahoo Finance");
        assert!(!provider.description().is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let provider = YahooProvider::new()
            .unwrap()
            .with_base_url("http://127.0.0.1:9/timeseries");

        let result = provider
            .fetch_statements(&Symbol::new("AAPL"), PeriodType::Quarterly)
            .await;

        assert!(matches!(result, Err(DataError::Network(_))));
    }
}
