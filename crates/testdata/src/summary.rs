//! Dataset summaries printed after a run.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use testdata_core::FinancialRecord;

use crate::export::Layout;

/// Shape and coverage of one written dataset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatasetSummary {
    /// Distinct tickers.
    pub companies: usize,
    /// Rows written.
    pub records: usize,
    /// Earliest period end date.
    pub first_date: Option<NaiveDate>,
    /// Latest period end date.
    pub last_date: Option<NaiveDate>,
    /// Columns per row.
    pub columns: usize,
    /// Empty cells across all rows.
    pub missing_cells: usize,
}

impl DatasetSummary {
    /// Summarizes `records` as written with `layout`.
    #[must_use]
    pub fn new(layout: &Layout, records: &[FinancialRecord]) -> Self {
        let companies: BTreeSet<&str> = records.iter().map(|r| r.ticker.as_str()).collect();
        let missing_cells = records
            .iter()
            .map(|r| layout.fields().iter().filter(|f| !f.is_present(r)).count())
            .sum();

        Self {
            companies: companies.len(),
            records: records.len(),
            first_date: records.iter().map(|r| r.date).min(),
            last_date: records.iter().map(|r| r.date).max(),
            columns: layout.len(),
            missing_cells,
        }
    }

    /// Share of non-empty cells, in `[0, 1]`. An empty dataset is complete.
    #[must_use]
    pub fn completeness(&self) -> f64 {
        let cells = self.records * self.columns;
        if cells == 0 {
            return 1.0;
        }
        1.0 - self.missing_cells as f64 / cells as f64
    }
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} records, {} companies, {} columns",
            self.records, self.companies, self.columns
        )?;
        if let (Some(first), Some(last)) = (self.first_date, self.last_date) {
            write!(f, ", {first} to {last}")?;
        }
        write!(f, ", {:.1}% complete", self.completeness() * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::Field;
    use testdata_core::{Company, Quarter};

    fn record(symbol: &str, month: u32, revenue: Option<f64>) -> FinancialRecord {
        let date = NaiveDate::from_ymd_opt(2024, month, 28).unwrap();
        let mut record = FinancialRecord::new(
            &Company::new(symbol, symbol),
            Quarter::from_date(date),
            2024,
            date,
        );
        record.revenue = revenue;
        record
    }

    #[test]
    fn test_summary_counts() {
        let layout = Layout::with_figures(&[Field::Revenue, Field::NetIncome]);
        let records = vec![
            record("AAPL", 3, Some(1.0)),
            record("AAPL", 6, None),
            record("MSFT", 9, Some(2.0)),
        ];

        let summary = DatasetSummary::new(&layout, &records);
        assert_eq!(summary.companies, 2);
        assert_eq!(summary.records, 3);
        assert_eq!(summary.columns, 7);
        assert_eq!(summary.missing_cells, 4);
        assert_eq!(summary.first_date, NaiveDate::from_ymd_opt(2024, 3, 28));
        assert_eq!(summary.last_date, NaiveDate::from_ymd_opt(2024, 9, 28));
        assert!((summary.completeness() - (1.0 - 4.0 / 21.0)).abs() < 1e-12);

        let text = summary.to_string();
        assert!(text.starts_with("3 records, 2 companies, 7 columns, 2024-03-28 to 2024-09-28"));
    }

    #[test]
    fn test_empty_summary() {
        let summary = DatasetSummary::new(&Layout::full(), &[]);
        assert_eq!(summary.records, 0);
        assert_eq!(summary.first_date, None);
        assert_eq!(summary.completeness(), 1.0);
        assert_eq!(summary.to_string(), "0 records, 0 companies, 19 columns, 100.0% complete");
    }
}
