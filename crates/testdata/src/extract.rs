//! Statement extraction into flat records.
//!
//! [`Extractor`] walks a company list one ticker at a time. Failures are
//! contained at the smallest unit they affect: an absent line item leaves one
//! field empty, a malformed period drops that period, and a provider error
//! drops the ticker. None of them stop the run.

use std::sync::Arc;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use testdata_core::{
    Company, DataError, FinancialRecord, FinancialStatements, LineItem, PeriodType, Quarter,
    Result, StatementKind, StatementProvider, StatementTable,
};
use tracing::{debug, info, warn};

/// Counters describing one extraction run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    /// Tickers attempted.
    pub tickers: usize,
    /// Tickers that produced no records because of a provider failure or
    /// missing income statement.
    pub skipped_tickers: usize,
    /// Periods dropped because they could not be parsed.
    pub skipped_periods: usize,
    /// Records produced.
    pub records: usize,
}

/// Records of one run, sorted by company, year and quarter.
#[derive(Clone, Debug, Default)]
pub struct Extraction {
    /// Extracted records.
    pub records: Vec<FinancialRecord>,
    /// Run counters.
    pub stats: ExtractionStats,
}

/// Sequential per-ticker statement extractor.
#[derive(Debug, Clone)]
pub struct Extractor {
    provider: Arc<dyn StatementProvider>,
    window: usize,
    period_type: PeriodType,
}

impl Extractor {
    /// Creates an extractor keeping the `window` most recent periods.
    #[must_use]
    pub fn new(provider: Arc<dyn StatementProvider>, window: usize) -> Self {
        Self {
            provider,
            window,
            period_type: PeriodType::Quarterly,
        }
    }

    /// Most recent periods kept per ticker.
    #[must_use]
    pub const fn window(&self) -> usize {
        self.window
    }

    /// Extracts every company in order and sorts the result.
    pub async fn run(&self, companies: &[Company]) -> Extraction {
        let mut extraction = Extraction::default();

        for company in companies {
            extraction.stats.tickers += 1;
            self.extract_company(company, &mut extraction).await;
        }

        extraction
            .records
            .sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        extraction.stats.records = extraction.records.len();

        info!(
            provider = self.provider.name(),
            tickers = extraction.stats.tickers,
            skipped_tickers = extraction.stats.skipped_tickers,
            skipped_periods = extraction.stats.skipped_periods,
            records = extraction.stats.records,
            "Extraction finished"
        );

        extraction
    }

    async fn extract_company(&self, company: &Company, extraction: &mut Extraction) {
        info!(ticker = %company.symbol, company = %company.name, "Fetching statements");

        let statements = match self
            .provider
            .fetch_statements(&company.symbol, self.period_type)
            .await
        {
            Ok(statements) => statements,
            Err(e) => {
                warn!(ticker = %company.symbol, error = %e, "Error fetching statements, skipping ticker");
                extraction.stats.skipped_tickers += 1;
                return;
            }
        };

        let Some(income) = statements.income.as_ref().filter(|t| !t.is_empty()) else {
            warn!(ticker = %company.symbol, "No income statement data available, skipping ticker");
            extraction.stats.skipped_tickers += 1;
            return;
        };

        for index in 0..income.num_periods().min(self.window) {
            match extract_period(company, &statements, income, index) {
                Ok(record) => {
                    match record.revenue {
                        Some(revenue) => info!(
                            ticker = %company.symbol,
                            "{} {}: Revenue ${:.2}B",
                            record.quarter,
                            record.year,
                            revenue / 1e9
                        ),
                        None => warn!(
                            ticker = %company.symbol,
                            "{} {}: missing revenue",
                            record.quarter,
                            record.year
                        ),
                    }
                    extraction.records.push(record);
                }
                Err(e) => {
                    warn!(
                        ticker = %company.symbol,
                        period = income.period(index).unwrap_or("<null>"),
                        error = %e,
                        "Error processing period, skipping"
                    );
                    extraction.stats.skipped_periods += 1;
                }
            }
        }
    }
}

/// Parses a provider period marker into a date.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` and RFC 3339 timestamps.
pub fn parse_period(marker: &str) -> Result<NaiveDate> {
    let marker = marker.trim();
    NaiveDate::parse_from_str(marker, "%Y-%m-%d")
        .or_else(|_| NaiveDateTime::parse_from_str(marker, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .or_else(|_| DateTime::parse_from_rfc3339(marker).map(|dt| dt.date_naive()))
        .map_err(|e| DataError::Parse(format!("invalid period '{marker}': {e}")))
}

/// Builds the record for income-statement period `index`.
///
/// Balance-sheet and cash-flow values are matched by period marker; a marker
/// the other table lacks leaves those fields absent.
pub fn extract_period(
    company: &Company,
    statements: &FinancialStatements,
    income: &StatementTable,
    index: usize,
) -> Result<FinancialRecord> {
    let marker = income
        .period(index)
        .ok_or_else(|| DataError::Parse(format!("missing period marker at column {index}")))?;
    let date = parse_period(marker)?;

    let lookup = |item: LineItem| -> Result<Option<f64>> {
        if item.statement() == StatementKind::Income {
            return income.line_item(item, index);
        }
        match statements.table(item.statement()) {
            Some(table) => match table.position(marker) {
                Some(position) => table.line_item(item, position),
                None => Ok(None),
            },
            None => Ok(None),
        }
    };

    let mut record = FinancialRecord::new(company, Quarter::from_date(date), date.year(), date);
    record.revenue = lookup(LineItem::TotalRevenue)?;
    record.gross_profit = lookup(LineItem::GrossProfit)?;
    record.operating_income = lookup(LineItem::OperatingIncome)?;
    record.net_income = lookup(LineItem::NetIncome)?;
    record.rd_expense = lookup(LineItem::ResearchAndDevelopment)?;
    // Operating income stands in only when the statement has no EBITDA row.
    record.ebitda = if income.has_row(LineItem::Ebitda.label()) {
        lookup(LineItem::Ebitda)?
    } else {
        record.operating_income
    };
    record.total_assets = lookup(LineItem::TotalAssets)?;
    record.total_debt = lookup(LineItem::TotalDebt)?;
    record.operating_cash_flow = lookup(LineItem::OperatingCashFlow)?;
    record.free_cash_flow = lookup(LineItem::FreeCashFlow)?;

    debug!(ticker = %company.symbol, period = marker, "Extracted period");
    Ok(record.with_ratios())
}
