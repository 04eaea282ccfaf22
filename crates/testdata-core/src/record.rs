//! Flat per-period financial records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{Company, Quarter, Symbol};

/// Divides `numerator` by `denominator` when both are usable.
///
/// Returns `None` when either operand is absent or non-finite, when the
/// denominator is zero, or when the quotient is not finite.
#[must_use]
pub fn ratio(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    let (numerator, denominator) = (numerator?, denominator?);
    if !numerator.is_finite() || !denominator.is_finite() || denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator).filter(|r| r.is_finite())
}

/// One row of output: a company's figures for one reporting period.
///
/// Every amount is independently optional. Ratios are fractions, not
/// percentages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FinancialRecord {
    /// Company display name.
    pub company: String,
    /// Ticker symbol.
    pub ticker: Symbol,
    /// Fiscal quarter derived from the period end month.
    pub quarter: Quarter,
    /// Calendar year of the period end.
    pub year: i32,
    /// Period end date.
    pub date: NaiveDate,

    /// Total revenue.
    pub revenue: Option<f64>,
    /// Gross profit.
    pub gross_profit: Option<f64>,
    /// Operating income.
    pub operating_income: Option<f64>,
    /// Net income.
    pub net_income: Option<f64>,
    /// Research and development expense.
    pub rd_expense: Option<f64>,
    /// EBITDA, or operating income when no EBITDA is reported.
    pub ebitda: Option<f64>,
    /// Total assets.
    pub total_assets: Option<f64>,
    /// Total debt.
    pub total_debt: Option<f64>,
    /// Operating cash flow.
    pub operating_cash_flow: Option<f64>,
    /// Free cash flow.
    pub free_cash_flow: Option<f64>,

    /// Gross profit / revenue.
    pub gross_margin: Option<f64>,
    /// Operating income / revenue.
    pub operating_margin: Option<f64>,
    /// Net income / revenue.
    pub net_margin: Option<f64>,
    /// R&D expense / revenue.
    pub rd_intensity: Option<f64>,
}

impl FinancialRecord {
    /// Creates a record with identity fields set and every figure absent.
    #[must_use]
    pub fn new(company: &Company, quarter: Quarter, year: i32, date: NaiveDate) -> Self {
        Self {
            company: company.name.clone(),
            ticker: company.symbol.clone(),
            quarter,
            year,
            date,
            revenue: None,
            gross_profit: None,
            operating_income: None,
            net_income: None,
            rd_expense: None,
            ebitda: None,
            total_assets: None,
            total_debt: None,
            operating_cash_flow: None,
            free_cash_flow: None,
            gross_margin: None,
            operating_margin: None,
            net_margin: None,
            rd_intensity: None,
        }
    }

    /// Fills the four ratio fields from the amounts already set.
    #[must_use]
    pub fn with_ratios(mut self) -> Self {
        self.gross_margin = ratio(self.gross_profit, self.revenue);
        self.operating_margin = ratio(self.operating_income, self.revenue);
        self.net_margin = ratio(self.net_income, self.revenue);
        self.rd_intensity = ratio(self.rd_expense, self.revenue);
        self
    }

    /// Sort key: company name, then year, then quarter.
    #[must_use]
    pub fn sort_key(&self) -> (&str, i32, Quarter) {
        (&self.company, self.year, self.quarter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_requires_both_operands() {
        assert_eq!(ratio(Some(40.0), Some(100.0)), Some(0.4));
        assert_eq!(ratio(None, Some(100.0)), None);
        assert_eq!(ratio(Some(40.0), None), None);
        assert_eq!(ratio(None, None), None);
    }

    #[test]
    fn test_ratio_never_divides_by_zero() {
        assert_eq!(ratio(Some(40.0), Some(0.0)), None);
        assert_eq!(ratio(Some(40.0), Some(-0.0)), None);
        assert_eq!(ratio(Some(f64::NAN), Some(10.0)), None);
        assert_eq!(ratio(Some(1.0), Some(f64::INFINITY)), None);
    }

    #[test]
    fn test_ratio_allows_zero_and_negative_numerators() {
        assert_eq!(ratio(Some(0.0), Some(50.0)), Some(0.0));
        assert_eq!(ratio(Some(-5.0), Some(50.0)), Some(-0.1));
    }

    #[test]
    fn test_with_ratios() {
        let company = Company::new("AAPL", "Apple Inc");
        let date = NaiveDate::from_ymd_opt(2024, 6, 29).unwrap();
        let mut record = FinancialRecord::new(&company, Quarter::Q2, 2024, date);
        record.revenue = Some(200.0);
        record.gross_profit = Some(90.0);
        record.rd_expense = Some(20.0);
        let record = record.with_ratios();

        assert_eq!(record.ticker.as_str(), "AAPL");
        assert_eq!(record.gross_margin, Some(0.45));
        assert_eq!(record.rd_intensity, Some(0.1));
        assert_eq!(record.operating_margin, None);
        assert_eq!(record.net_margin, None);
        assert_eq!(record.sort_key(), ("Apple Inc", 2024, Quarter::Q2));
    }
}
