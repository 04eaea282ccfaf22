//! Statement tables and line items.
//!
//! A [`StatementTable`] holds one financial statement for one company as a
//! polars [`DataFrame`]: a [`PERIOD_COLUMN`] with the raw period markers in
//! provider order (newest first) and one numeric column per line-item label.
//! Looking up `(label, period)` therefore reads column `label` at the row of
//! that period.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DataError, Result};

/// Name of the column carrying period markers.
pub const PERIOD_COLUMN: &str = "period";

/// The three quarterly statements a provider exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatementKind {
    /// Income statement.
    Income,
    /// Balance sheet.
    BalanceSheet,
    /// Cash-flow statement.
    CashFlow,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Income => "income statement",
            Self::BalanceSheet => "balance sheet",
            Self::CashFlow => "cash-flow statement",
        };
        f.write_str(name)
    }
}

/// A named statement row the extractor reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineItem {
    /// Total revenue.
    TotalRevenue,
    /// Gross profit.
    GrossProfit,
    /// Operating income.
    OperatingIncome,
    /// Net income.
    NetIncome,
    /// Research and development expense.
    ResearchAndDevelopment,
    /// Explicitly reported EBITDA.
    Ebitda,
    /// Total assets.
    TotalAssets,
    /// Total debt.
    TotalDebt,
    /// Operating cash flow.
    OperatingCashFlow,
    /// Free cash flow.
    FreeCashFlow,
}

impl LineItem {
    /// Every line item, income statement first.
    pub const ALL: [Self; 10] = [
        Self::TotalRevenue,
        Self::GrossProfit,
        Self::OperatingIncome,
        Self::NetIncome,
        Self::ResearchAndDevelopment,
        Self::Ebitda,
        Self::TotalAssets,
        Self::TotalDebt,
        Self::OperatingCashFlow,
        Self::FreeCashFlow,
    ];

    /// Exact row label used by statement tables.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::TotalRevenue => "Total Revenue",
            Self::GrossProfit => "Gross Profit",
            Self::OperatingIncome => "Operating Income",
            Self::NetIncome => "Net Income",
            Self::ResearchAndDevelopment => "Research And Development",
            Self::Ebitda => "EBITDA",
            Self::TotalAssets => "Total Assets",
            Self::TotalDebt => "Total Debt",
            Self::OperatingCashFlow => "Operating Cash Flow",
            Self::FreeCashFlow => "Free Cash Flow",
        }
    }

    /// Statement the line item is reported on.
    #[must_use]
    pub const fn statement(&self) -> StatementKind {
        match self {
            Self::TotalRevenue
            | Self::GrossProfit
            | Self::OperatingIncome
            | Self::NetIncome
            | Self::ResearchAndDevelopment
            | Self::Ebitda => StatementKind::Income,
            Self::TotalAssets | Self::TotalDebt => StatementKind::BalanceSheet,
            Self::OperatingCashFlow | Self::FreeCashFlow => StatementKind::CashFlow,
        }
    }
}

/// One financial statement: line items by reporting period.
#[derive(Clone, Debug)]
pub struct StatementTable {
    frame: DataFrame,
}

impl StatementTable {
    /// Builds a table from period markers and `(label, values)` rows.
    ///
    /// Row values are positional against `periods`; a short row is padded
    /// with nulls and a long one is truncated.
    pub fn new(periods: Vec<String>, rows: Vec<(String, Vec<Option<f64>>)>) -> Result<Self> {
        let height = periods.len();
        let mut columns = Vec::with_capacity(rows.len() + 1);
        columns.push(Column::new(PERIOD_COLUMN.into(), periods));

        for (label, mut values) in rows {
            if label == PERIOD_COLUMN {
                return Err(DataError::InvalidParameter(format!(
                    "'{PERIOD_COLUMN}' is reserved and cannot be used as a row label"
                )));
            }
            values.resize(height, None);
            columns.push(Column::new(label.as_str().into(), values));
        }

        let frame = DataFrame::new(columns).map_err(|e| DataError::Parse(e.to_string()))?;
        Ok(Self { frame })
    }

    /// Wraps an existing frame. The frame must have a string [`PERIOD_COLUMN`].
    pub fn from_frame(frame: DataFrame) -> Result<Self> {
        let period = frame
            .column(PERIOD_COLUMN)
            .map_err(|_| DataError::Parse(format!("missing '{PERIOD_COLUMN}' column")))?;

        if period.dtype() != &DataType::String {
            return Err(DataError::Parse(format!(
                "'{PERIOD_COLUMN}' column must hold strings, found {}",
                period.dtype()
            )));
        }

        Ok(Self { frame })
    }

    /// Returns the underlying frame.
    #[must_use]
    pub const fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Number of period columns.
    #[must_use]
    pub fn num_periods(&self) -> usize {
        self.frame.height()
    }

    /// True when the table has no periods.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.num_periods() == 0
    }

    /// Raw period marker at `index`, if present and non-null.
    #[must_use]
    pub fn period(&self, index: usize) -> Option<&str> {
        if index >= self.num_periods() {
            return None;
        }
        self.frame
            .column(PERIOD_COLUMN)
            .ok()?
            .as_materialized_series()
            .str()
            .ok()?
            .get(index)
    }

    /// Index of the period whose marker equals `marker`.
    #[must_use]
    pub fn position(&self, marker: &str) -> Option<usize> {
        (0..self.num_periods()).find(|&index| self.period(index) == Some(marker))
    }

    /// True when `label` is a row of this table.
    #[must_use]
    pub fn has_row(&self, label: &str) -> bool {
        label != PERIOD_COLUMN && self.frame.column(label).is_ok()
    }

    /// Row labels in column order.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .filter(|name| name.as_str() != PERIOD_COLUMN)
            .map(|name| name.to_string())
            .collect()
    }

    /// Value of row `label` at period `index`.
    ///
    /// A missing label, an out-of-range index, a null cell and a non-finite
    /// number all read as `Ok(None)`. A row that does not hold numbers is a
    /// [`DataError::Parse`].
    pub fn value(&self, label: &str, index: usize) -> Result<Option<f64>> {
        if !self.has_row(label) || index >= self.num_periods() {
            return Ok(None);
        }
        let column = self
            .frame
            .column(label)
            .map_err(|e| DataError::Other(e.to_string()))?;

        match column.dtype() {
            DataType::Float64
            | DataType::Float32
            | DataType::Int64
            | DataType::Int32
            | DataType::UInt64
            | DataType::UInt32 => {}
            DataType::Null => return Ok(None),
            other => {
                return Err(DataError::Parse(format!(
                    "row '{label}' holds {other} values, expected numbers"
                )));
            }
        }

        let values = column
            .cast(&DataType::Float64)
            .map_err(|e| DataError::Parse(e.to_string()))?;
        let value = values
            .as_materialized_series()
            .f64()
            .map_err(|e| DataError::Parse(e.to_string()))?
            .get(index);

        Ok(value.filter(|v| v.is_finite()))
    }

    /// Value of `item` at period `index`.
    pub fn line_item(&self, item: LineItem, index: usize) -> Result<Option<f64>> {
        self.value(item.label(), index)
    }
}

/// The quarterly statements of one company as returned by a provider.
#[derive(Clone, Debug, Default)]
pub struct FinancialStatements {
    /// Income statement, absent when the provider had none.
    pub income: Option<StatementTable>,
    /// Balance sheet.
    pub balance_sheet: Option<StatementTable>,
    /// Cash-flow statement.
    pub cash_flow: Option<StatementTable>,
}

impl FinancialStatements {
    /// Returns the table for `kind`.
    #[must_use]
    pub const fn table(&self, kind: StatementKind) -> Option<&StatementTable> {
        match kind {
            StatementKind::Income => self.income.as_ref(),
            StatementKind::BalanceSheet => self.balance_sheet.as_ref(),
            StatementKind::CashFlow => self.cash_flow.as_ref(),
        }
    }

    /// True when an income statement with at least one period is present.
    #[must_use]
    pub fn has_income(&self) -> bool {
        self.income.as_ref().is_some_and(|t| !t.is_empty())
    }
}
