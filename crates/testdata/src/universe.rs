//! Built-in company universes.
//!
//! Each universe is a fixed, ordered ticker-to-name mapping together with the
//! number of recent periods to keep, the output file name and the column
//! layout written for it.

use testdata_core::Company;

use crate::export::{Field, Layout};

/// Periods kept per company in the broad sample.
pub const BROAD_WINDOW: usize = 8;

/// Periods kept per company in each sector sample.
pub const SECTOR_WINDOW: usize = 6;

/// A named list of companies and how to extract and write them.
#[derive(Clone, Debug, PartialEq)]
pub struct Universe {
    /// Human-readable name used in logs.
    pub name: String,
    /// Output file name, relative to the output directory.
    pub file_name: String,
    /// Companies in extraction order.
    pub companies: Vec<Company>,
    /// Most recent periods kept per company.
    pub window: usize,
    /// Output columns.
    pub layout: Layout,
}

impl Universe {
    /// Creates a universe with the full layout and the sector window.
    #[must_use]
    pub fn new(name: impl Into<String>, file_name: impl Into<String>, companies: Vec<Company>) -> Self {
        Self {
            name: name.into(),
            file_name: file_name.into(),
            companies,
            window: SECTOR_WINDOW,
            layout: Layout::full(),
        }
    }

    /// Overrides the period window.
    #[must_use]
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Overrides the output layout.
    #[must_use]
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Upper bound on the records a run over this universe can produce.
    #[must_use]
    pub fn max_records(&self) -> usize {
        self.companies.len() * self.window
    }

    /// Ten large caps across sectors, eight quarters each.
    #[must_use]
    pub fn sp500() -> Self {
        Self::new(
            "S&P 500 sample",
            "real-sp500-financials.csv",
            companies(&[
                ("AAPL", "Apple Inc"),
                ("MSFT", "Microsoft Corporation"),
                ("GOOGL", "Alphabet Inc"),
                ("AMZN", "Amazon.com Inc"),
                ("TSLA", "Tesla Inc"),
                ("JPM", "JPMorgan Chase"),
                ("JNJ", "Johnson & Johnson"),
                ("V", "Visa Inc"),
                ("WMT", "Walmart Inc"),
                ("PG", "Procter & Gamble"),
            ]),
        )
        .with_window(BROAD_WINDOW)
        .with_layout(Layout::broad())
    }

    /// Technology sector.
    #[must_use]
    pub fn technology() -> Self {
        Self::new(
            "Technology",
            "tech-sector-financials.csv",
            companies(&[
                ("AAPL", "Apple Inc"),
                ("MSFT", "Microsoft Corporation"),
                ("GOOGL", "Alphabet Inc"),
                ("META", "Meta Platforms"),
                ("NVDA", "NVIDIA Corporation"),
                ("ORCL", "Oracle Corporation"),
                ("ADBE", "Adobe Inc"),
                ("CRM", "Salesforce Inc"),
                ("INTC", "Intel Corporation"),
                ("AMD", "Advanced Micro Devices"),
            ]),
        )
        .with_layout(Layout::with_figures(&[
            Field::Revenue,
            Field::GrossProfit,
            Field::OperatingIncome,
            Field::NetIncome,
            Field::RdExpense,
            Field::GrossMargin,
            Field::OperatingMargin,
            Field::NetMargin,
            Field::RdIntensity,
        ]))
    }

    /// Healthcare sector.
    #[must_use]
    pub fn healthcare() -> Self {
        Self::new(
            "Healthcare",
            "healthcare-sector-financials.csv",
            companies(&[
                ("JNJ", "Johnson & Johnson"),
                ("UNH", "UnitedHealth Group"),
                ("PFE", "Pfizer Inc"),
                ("ABBV", "AbbVie Inc"),
                ("TMO", "Thermo Fisher Scientific"),
                ("ABT", "Abbott Laboratories"),
                ("MRK", "Merck & Co"),
                ("LLY", "Eli Lilly"),
            ]),
        )
        .with_layout(Layout::with_figures(&[
            Field::Revenue,
            Field::GrossProfit,
            Field::NetIncome,
            Field::RdExpense,
            Field::GrossMargin,
            Field::NetMargin,
        ]))
    }

    /// Financial sector.
    #[must_use]
    pub fn financial() -> Self {
        Self::new(
            "Financial",
            "financial-sector.csv",
            companies(&[
                ("JPM", "JPMorgan Chase"),
                ("BAC", "Bank of America"),
                ("WFC", "Wells Fargo"),
                ("GS", "Goldman Sachs"),
                ("MS", "Morgan Stanley"),
                ("C", "Citigroup"),
                ("BLK", "BlackRock"),
                ("AXP", "American Express"),
            ]),
        )
        .with_layout(Layout::with_figures(&[
            Field::Revenue,
            Field::OperatingIncome,
            Field::NetIncome,
            Field::OperatingMargin,
            Field::NetMargin,
        ]))
    }

    /// Consumer and retail sector.
    #[must_use]
    pub fn consumer() -> Self {
        Self::new(
            "Consumer/Retail",
            "consumer-retail-financials.csv",
            companies(&[
                ("AMZN", "Amazon.com Inc"),
                ("WMT", "Walmart Inc"),
                ("HD", "Home Depot"),
                ("NKE", "Nike Inc"),
                ("MCD", "McDonalds Corporation"),
                ("SBUX", "Starbucks Corporation"),
                ("TGT", "Target Corporation"),
                ("COST", "Costco Wholesale"),
            ]),
        )
        .with_layout(Layout::with_figures(&[
            Field::Revenue,
            Field::GrossProfit,
            Field::OperatingIncome,
            Field::NetIncome,
            Field::GrossMargin,
            Field::OperatingMargin,
            Field::NetMargin,
        ]))
    }

    /// Energy sector.
    #[must_use]
    pub fn energy() -> Self {
        Self::new(
            "Energy",
            "energy-sector-financials.csv",
            companies(&[
                ("XOM", "Exxon Mobil"),
                ("CVX", "Chevron Corporation"),
                ("COP", "ConocoPhillips"),
                ("SLB", "Schlumberger"),
                ("EOG", "EOG Resources"),
            ]),
        )
        .with_layout(Layout::with_figures(&[
            Field::Revenue,
            Field::GrossProfit,
            Field::NetIncome,
            Field::GrossMargin,
            Field::NetMargin,
        ]))
    }

    /// The five sector universes in run order.
    #[must_use]
    pub fn sectors() -> Vec<Self> {
        vec![
            Self::technology(),
            Self::healthcare(),
            Self::financial(),
            Self::consumer(),
            Self::energy(),
        ]
    }
}

fn companies(pairs: &[(&str, &str)]) -> Vec<Company> {
    pairs
        .iter()
        .map(|(symbol, name)| Company::new(*symbol, *name))
        .collect()
}
