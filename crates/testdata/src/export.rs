//! CSV export of financial records.
//!
//! A [`Layout`] picks which [`Field`]s are written and in what order. Absent
//! values are written as empty cells; amounts are written as whole numbers and
//! ratios as plain fractions.

use std::fs;
use std::io;
use std::path::Path;

use testdata_core::FinancialRecord;
use thiserror::Error;

/// Errors that can occur while writing output files.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Output was not valid UTF-8.
    #[error("Invalid output encoding: {0}")]
    Encoding(String),
}

/// One output column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    /// Company display name.
    Company,
    /// Ticker symbol.
    Ticker,
    /// Quarter label.
    Quarter,
    /// Calendar year.
    Year,
    /// Period end date.
    Date,
    /// Total revenue.
    Revenue,
    /// Gross profit.
    GrossProfit,
    /// EBITDA.
    Ebitda,
    /// Operating income.
    OperatingIncome,
    /// Net income.
    NetIncome,
    /// R&D expense.
    RdExpense,
    /// Total assets.
    TotalAssets,
    /// Total debt.
    TotalDebt,
    /// Operating cash flow.
    OperatingCashflow,
    /// Free cash flow.
    FreeCashflow,
    /// Gross margin.
    GrossMargin,
    /// Operating margin.
    OperatingMargin,
    /// Net margin.
    NetMargin,
    /// R&D intensity.
    RdIntensity,
}

impl Field {
    /// Header cell for this column.
    #[must_use]
    pub const fn header(&self) -> &'static str {
        match self {
            Self::Company => "Company",
            Self::Ticker => "Ticker",
            Self::Quarter => "Quarter",
            Self::Year => "Year",
            Self::Date => "Date",
            Self::Revenue => "Revenue",
            Self::GrossProfit => "Gross_Profit",
            Self::Ebitda => "EBITDA",
            Self::OperatingIncome => "Operating_Income",
            Self::NetIncome => "Net_Income",
            Self::RdExpense => "RD_Expense",
            Self::TotalAssets => "Total_Assets",
            Self::TotalDebt => "Total_Debt",
            Self::OperatingCashflow => "Operating_Cashflow",
            Self::FreeCashflow => "Free_Cashflow",
            Self::GrossMargin => "Gross_Margin",
            Self::OperatingMargin => "Operating_Margin",
            Self::NetMargin => "Net_Margin",
            Self::RdIntensity => "RD_Intensity",
        }
    }

    /// Amount carried by this column, if it is an amount column.
    const fn amount(&self, record: &FinancialRecord) -> Option<Option<f64>> {
        match self {
            Self::Revenue => Some(record.revenue),
            Self::GrossProfit => Some(record.gross_profit),
            Self::Ebitda => Some(record.ebitda),
            Self::OperatingIncome => Some(record.operating_income),
            Self::NetIncome => Some(record.net_income),
            Self::RdExpense => Some(record.rd_expense),
            Self::TotalAssets => Some(record.total_assets),
            Self::TotalDebt => Some(record.total_debt),
            Self::OperatingCashflow => Some(record.operating_cash_flow),
            Self::FreeCashflow => Some(record.free_cash_flow),
            _ => None,
        }
    }

    /// Ratio carried by this column, if it is a ratio column.
    const fn fraction(&self, record: &FinancialRecord) -> Option<Option<f64>> {
        match self {
            Self::GrossMargin => Some(record.gross_margin),
            Self::OperatingMargin => Some(record.operating_margin),
            Self::NetMargin => Some(record.net_margin),
            Self::RdIntensity => Some(record.rd_intensity),
            _ => None,
        }
    }

    /// True when `record` has a value for this column.
    #[must_use]
    pub fn is_present(&self, record: &FinancialRecord) -> bool {
        match (self.amount(record), self.fraction(record)) {
            (Some(value), _) | (_, Some(value)) => value.is_some(),
            (None, None) => true,
        }
    }

    /// Cell text for `record`; empty when the value is absent.
    #[must_use]
    pub fn render(&self, record: &FinancialRecord) -> String {
        if let Some(amount) = self.amount(record) {
            return amount.map(|v| (v.trunc() as i64).to_string()).unwrap_or_default();
        }
        if let Some(fraction) = self.fraction(record) {
            return fraction.map(|v| v.to_string()).unwrap_or_default();
        }
        match self {
            Self::Company => record.company.clone(),
            Self::Ticker => record.ticker.to_string(),
            Self::Quarter => record.quarter.to_string(),
            Self::Year => record.year.to_string(),
            Self::Date => record.date.format("%Y-%m-%d").to_string(),
            _ => String::new(),
        }
    }
}

/// Identity columns every layout starts with.
const IDENTITY: [Field; 5] = [
    Field::Company,
    Field::Ticker,
    Field::Quarter,
    Field::Year,
    Field::Date,
];

/// Ordered set of output columns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    fields: Vec<Field>,
}

impl Layout {
    /// Identity columns followed by `figures`.
    #[must_use]
    pub fn with_figures(figures: &[Field]) -> Self {
        let mut fields = IDENTITY.to_vec();
        fields.extend(figures.iter().copied().filter(|f| !IDENTITY.contains(f)));
        Self { fields }
    }

    /// Every field of [`FinancialRecord`].
    #[must_use]
    pub fn full() -> Self {
        Self::with_figures(&[
            Field::Revenue,
            Field::GrossProfit,
            Field::Ebitda,
            Field::OperatingIncome,
            Field::NetIncome,
            Field::RdExpense,
            Field::TotalAssets,
            Field::TotalDebt,
            Field::OperatingCashflow,
            Field::FreeCashflow,
            Field::GrossMargin,
            Field::OperatingMargin,
            Field::NetMargin,
            Field::RdIntensity,
        ])
    }

    /// Columns of the broad multi-sector sample.
    #[must_use]
    pub fn broad() -> Self {
        Self::with_figures(&[
            Field::Revenue,
            Field::GrossProfit,
            Field::Ebitda,
            Field::OperatingIncome,
            Field::NetIncome,
            Field::TotalAssets,
            Field::TotalDebt,
            Field::OperatingCashflow,
            Field::FreeCashflow,
            Field::GrossMargin,
            Field::OperatingMargin,
            Field::NetMargin,
        ])
    }

    /// Columns in output order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the layout has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Header row.
    #[must_use]
    pub fn headers(&self) -> Vec<&'static str> {
        self.fields.iter().map(Field::header).collect()
    }

    /// Cells of one record.
    #[must_use]
    pub fn row(&self, record: &FinancialRecord) -> Vec<String> {
        self.fields.iter().map(|f| f.render(record)).collect()
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::full()
    }
}

/// Write a header row and one row per record to `writer`.
pub fn write_records<W: io::Write>(
    writer: W,
    layout: &Layout,
    records: &[FinancialRecord],
) -> Result<W, ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(layout.headers())?;
    for record in records {
        wtr.write_record(layout.row(record))?;
    }
    wtr.flush()?;
    wtr.into_inner().map_err(|e| ExportError::Io(e.into_error()))
}

/// Render records as a CSV string.
pub fn to_csv_string(layout: &Layout, records: &[FinancialRecord]) -> Result<String, ExportError> {
    let bytes = write_records(Vec::new(), layout, records)?;
    String::from_utf8(bytes).map_err(|e| ExportError::Encoding(e.to_string()))
}

/// Write records to `path`, creating parent directories as needed.
pub fn write_csv(
    path: &Path,
    layout: &Layout,
    records: &[FinancialRecord],
) -> Result<(), ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(path)?;
    write_records(io::BufWriter::new(file), layout, records)?;
    Ok(())
}
