//! Extraction runs against an in-memory statement provider.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use rstest::rstest;
use testdata::{
    Company, DataError, DataProvider, Extractor, Field, FinancialStatements, Layout, PeriodType,
    Quarter, StatementProvider, StatementTable, Symbol, Universe, run_all, run_universe,
    to_csv_string,
};

#[derive(Debug, Default)]
struct MemoryProvider {
    statements: HashMap<Symbol, FinancialStatements>,
}

impl MemoryProvider {
    fn with(mut self, symbol: &str, statements: FinancialStatements) -> Self {
        self.statements.insert(Symbol::new(symbol), statements);
        self
    }
}

impl DataProvider for MemoryProvider {
    fn name(&self) -> &str {
        "Memory"
    }

    fn description(&self) -> &str {
        "Fixed statements held in memory"
    }
}

#[async_trait]
impl StatementProvider for MemoryProvider {
    async fn fetch_statements(
        &self,
        symbol: &Symbol,
        _period_type: PeriodType,
    ) -> testdata::Result<FinancialStatements> {
        self.statements
            .get(symbol)
            .cloned()
            .ok_or_else(|| DataError::SymbolNotFound(symbol.to_string()))
    }
}

fn table(periods: &[&str], rows: &[(&str, Vec<Option<f64>>)]) -> StatementTable {
    StatementTable::new(
        periods.iter().map(|p| p.to_string()).collect(),
        rows.iter()
            .map(|(label, values)| (label.to_string(), values.clone()))
            .collect(),
    )
    .unwrap()
}

fn income_only(periods: &[&str], rows: &[(&str, Vec<Option<f64>>)]) -> FinancialStatements {
    FinancialStatements {
        income: Some(table(periods, rows)),
        ..Default::default()
    }
}

/// Three quarters ending in February, May and November 2024, with net
/// income reported for two of them.
fn three_quarters() -> FinancialStatements {
    let periods = ["2024-11-30", "2024-05-31", "2024-02-29"];
    FinancialStatements {
        income: Some(table(
            &periods,
            &[
                ("Total Revenue", vec![Some(120e9), Some(100e9), Some(90e9)]),
                ("Gross Profit", vec![Some(54e9), Some(45e9), Some(36e9)]),
                ("Operating Income", vec![Some(30e9), Some(25e9), None]),
                ("Net Income", vec![Some(24e9), None, Some(18e9)]),
            ],
        )),
        balance_sheet: Some(table(
            &periods,
            &[("Total Assets", vec![Some(350e9), Some(340e9), Some(330e9)])],
        )),
        cash_flow: Some(table(
            &periods[..2],
            &[("Free Cash Flow", vec![Some(20e9), Some(19e9)])],
        )),
    }
}

fn extractor(provider: MemoryProvider, window: usize) -> Extractor {
    Extractor::new(Arc::new(provider), window)
}

#[tokio::test]
async fn test_three_quarter_ticker() {
    let provider = MemoryProvider::default().with("AAPL", three_quarters());
    let extraction = extractor(provider, 8)
        .run(&[Company::new("AAPL", "Apple Inc")])
        .await;

    let records = &extraction.records;
    assert_eq!(records.len(), 3);
    assert_eq!(
        records.iter().map(|r| r.quarter).collect::<Vec<_>>(),
        vec![Quarter::Q1, Quarter::Q2, Quarter::Q4]
    );
    assert!(records.iter().all(|r| r.year == 2024));
    assert!(records.iter().all(|r| r.gross_margin.is_some()));
    assert_eq!(records.iter().filter(|r| r.net_margin.is_some()).count(), 2);

    let q1 = &records[0];
    assert_eq!(q1.gross_margin, Some(36e9 / 90e9));
    assert_eq!(q1.operating_income, None);
    assert_eq!(q1.ebitda, None);
    assert_eq!(q1.total_assets, Some(330e9));
    assert_eq!(q1.free_cash_flow, None);

    let q4 = &records[2];
    assert_eq!(q4.ebitda, Some(30e9));
    assert_eq!(q4.free_cash_flow, Some(20e9));

    assert_eq!(extraction.stats.records, 3);
    assert_eq!(extraction.stats.skipped_tickers, 0);
}

#[tokio::test]
async fn test_three_quarter_ticker_written_to_csv() {
    let provider = MemoryProvider::default().with("AAPL", three_quarters());
    let universe = Universe::new(
        "Single",
        "single.csv",
        vec![Company::new("AAPL", "Apple Inc")],
    );
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join(&universe.file_name);

    let output = run_universe(Arc::new(provider), &universe, &path)
        .await
        .unwrap();

    assert_eq!(output.records(), 3);
    assert_eq!(output.summary.companies, 1);

    let written = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0].split(',').count(), 19);
    assert!(lines[1].starts_with("Apple Inc,AAPL,Q1,2024,2024-02-29,90000000000,36000000000,,"));
}

#[tokio::test]
async fn test_failing_ticker_is_skipped() {
    let provider = MemoryProvider::default().with("MSFT", three_quarters());
    let extraction = extractor(provider, 8)
        .run(&[
            Company::new("ZZZZ", "Unknown Corp"),
            Company::new("MSFT", "Microsoft Corporation"),
        ])
        .await;

    assert_eq!(extraction.records.len(), 3);
    assert!(extraction.records.iter().all(|r| r.ticker.as_str() == "MSFT"));
    assert_eq!(extraction.stats.tickers, 2);
    assert_eq!(extraction.stats.skipped_tickers, 1);
}

#[tokio::test]
async fn test_missing_income_statement_yields_nothing() {
    let no_income = FinancialStatements {
        balance_sheet: Some(table(&["2024-06-30"], &[("Total Assets", vec![Some(1.0)])])),
        ..Default::default()
    };
    let empty_income = income_only(&[], &[("Total Revenue", vec![])]);
    let provider = MemoryProvider::default()
        .with("JPM", no_income)
        .with("BAC", empty_income);

    let extraction = extractor(provider, 6)
        .run(&[
            Company::new("JPM", "JPMorgan Chase"),
            Company::new("BAC", "Bank of America"),
        ])
        .await;

    assert!(extraction.records.is_empty());
    assert_eq!(extraction.stats.skipped_tickers, 2);
    assert_eq!(
        to_csv_string(&Layout::full(), &extraction.records)
            .unwrap()
            .lines()
            .count(),
        1
    );
}

#[tokio::test]
async fn test_bad_period_is_skipped() {
    let provider = MemoryProvider::default().with(
        "WMT",
        income_only(
            &["2024-10-31", "sometime", "2024-04-30"],
            &[("Total Revenue", vec![Some(169e9), Some(1.0), Some(161e9)])],
        ),
    );

    let extraction = extractor(provider, 8)
        .run(&[Company::new("WMT", "Walmart Inc")])
        .await;

    assert_eq!(extraction.records.len(), 2);
    assert_eq!(extraction.stats.skipped_periods, 1);
    assert_eq!(extraction.records[0].quarter, Quarter::Q2);
    assert_eq!(extraction.records[1].quarter, Quarter::Q4);
}

#[rstest]
#[case(1, 1)]
#[case(2, 2)]
#[case(6, 3)]
#[tokio::test]
async fn test_window_bounds_records(#[case] window: usize, #[case] expected_per_ticker: usize) {
    let provider = MemoryProvider::default()
        .with("AAPL", three_quarters())
        .with("MSFT", three_quarters());
    let companies = [
        Company::new("AAPL", "Apple Inc"),
        Company::new("MSFT", "Microsoft Corporation"),
    ];

    let extraction = extractor(provider, window).run(&companies).await;

    assert_eq!(extraction.records.len(), 2 * expected_per_ticker);
    assert!(extraction.records.len() <= companies.len() * window);
}

#[tokio::test]
async fn test_window_keeps_most_recent_periods() {
    let provider = MemoryProvider::default().with("AAPL", three_quarters());
    let extraction = extractor(provider, 2)
        .run(&[Company::new("AAPL", "Apple Inc")])
        .await;

    assert_eq!(
        extraction.records.iter().map(|r| r.quarter).collect::<Vec<_>>(),
        vec![Quarter::Q2, Quarter::Q4]
    );
}

#[rstest]
#[case(Some(40.0), Some(30.0), Some(40.0))]
#[case(None, Some(30.0), None)]
#[case(None, None, None)]
#[tokio::test]
async fn test_ebitda_row_present(
    #[case] ebitda: Option<f64>,
    #[case] operating_income: Option<f64>,
    #[case] expected: Option<f64>,
) {
    let provider = MemoryProvider::default().with(
        "XOM",
        income_only(
            &["2024-09-30"],
            &[
                ("Total Revenue", vec![Some(90.0)]),
                ("EBITDA", vec![ebitda]),
                ("Operating Income", vec![operating_income]),
            ],
        ),
    );

    let extraction = extractor(provider, 6)
        .run(&[Company::new("XOM", "Exxon Mobil")])
        .await;

    assert_eq!(extraction.records[0].ebitda, expected);
}

#[rstest]
#[case(Some(30.0), Some(30.0))]
#[case(None, None)]
#[tokio::test]
async fn test_ebitda_row_absent_falls_back_to_operating_income(
    #[case] operating_income: Option<f64>,
    #[case] expected: Option<f64>,
) {
    let provider = MemoryProvider::default().with(
        "CVX",
        income_only(
            &["2024-09-30"],
            &[
                ("Total Revenue", vec![Some(50.0)]),
                ("Operating Income", vec![operating_income]),
            ],
        ),
    );

    let extraction = extractor(provider, 6)
        .run(&[Company::new("CVX", "Chevron Corporation")])
        .await;

    assert_eq!(extraction.records[0].ebitda, expected);
}

#[tokio::test]
async fn test_null_ebitda_cell_in_later_period() {
    let provider = MemoryProvider::default().with(
        "AAPL",
        income_only(
            &["2024-09-30", "2024-06-30"],
            &[
                ("EBITDA", vec![Some(40.0), None]),
                ("Operating Income", vec![Some(30.0), Some(25.0)]),
            ],
        ),
    );

    let extraction = extractor(provider, 8)
        .run(&[Company::new("AAPL", "Apple Inc")])
        .await;

    let ebitda: Vec<_> = extraction.records.iter().map(|r| r.ebitda).collect();
    assert_eq!(ebitda, vec![None, Some(40.0)]);
}

#[tokio::test]
async fn test_run_all_writes_one_file_per_universe() {
    let provider = MemoryProvider::default()
        .with("AAPL", three_quarters())
        .with(
            "JPM",
            income_only(
                &["2024-06-30", "2024-03-31"],
                &[("Total Revenue", vec![Some(50e9), Some(42e9)])],
            ),
        )
        .with(
            "BAC",
            income_only(&["2024-06-30"], &[("Total Revenue", vec![Some(25e9)])]),
        );
    let universes = [
        Universe::new(
            "Technology",
            "tech.csv",
            vec![Company::new("AAPL", "Apple Inc")],
        ),
        Universe::new(
            "Financial",
            "financial.csv",
            vec![
                Company::new("JPM", "JPMorgan Chase"),
                Company::new("BAC", "Bank of America"),
                Company::new("ZZZZ", "Unknown Corp"),
            ],
        )
        .with_layout(Layout::with_figures(&[Field::Revenue, Field::NetMargin])),
    ];
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("demo");

    let runs = run_all(Arc::new(provider), &universes, &out).await.unwrap();

    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].universe, "Technology");
    assert_eq!(runs[0].path, out.join("tech.csv"));
    assert_eq!(runs[0].records(), 3);
    assert_eq!(runs[1].universe, "Financial");
    assert_eq!(runs[1].path, out.join("financial.csv"));
    assert_eq!(runs[1].records(), 3);
    assert_eq!(runs[1].stats.skipped_tickers, 1);

    let tech = std::fs::read_to_string(out.join("tech.csv")).unwrap();
    let tech: Vec<&str> = tech.lines().collect();
    assert_eq!(tech[0], Layout::full().headers().join(","));
    assert_eq!(tech.len(), 1 + 3);

    let financial = std::fs::read_to_string(out.join("financial.csv")).unwrap();
    let financial: Vec<&str> = financial.lines().collect();
    assert_eq!(
        financial[0],
        "Company,Ticker,Quarter,Year,Date,Revenue,Net_Margin"
    );
    assert_eq!(financial.len(), 1 + 3);
    assert!(financial[1..].iter().all(|line| line.split(',').count() == 7));

    let total: usize = runs.iter().map(|run| run.records()).sum();
    assert_eq!(total, 6);
    assert_eq!(
        total,
        runs.iter().map(|run| run.summary.records).sum::<usize>()
    );
}

#[tokio::test]
async fn test_records_sorted_by_company_year_quarter() {
    let provider = MemoryProvider::default()
        .with(
            "WMT",
            income_only(
                &["2024-01-31", "2023-10-31"],
                &[("Total Revenue", vec![Some(2.0), Some(1.0)])],
            ),
        )
        .with(
            "AAPL",
            income_only(
                &["2023-12-31", "2023-09-30"],
                &[("Total Revenue", vec![Some(2.0), Some(1.0)])],
            ),
        );

    let extraction = extractor(provider, 8)
        .run(&[
            Company::new("WMT", "Walmart Inc"),
            Company::new("AAPL", "Apple Inc"),
        ])
        .await;

    let keys: Vec<(String, i32, Quarter)> = extraction
        .records
        .iter()
        .map(|r| (r.company.clone(), r.year, r.quarter))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("Apple Inc".to_string(), 2023, Quarter::Q3),
            ("Apple Inc".to_string(), 2023, Quarter::Q4),
            ("Walmart Inc".to_string(), 2023, Quarter::Q4),
            ("Walmart Inc".to_string(), 2024, Quarter::Q1),
        ]
    );
}

#[tokio::test]
async fn test_zero_revenue_leaves_margins_absent() {
    let provider = MemoryProvider::default().with(
        "TSLA",
        income_only(
            &["2024-03-31"],
            &[
                ("Total Revenue", vec![Some(0.0)]),
                ("Gross Profit", vec![Some(5.0)]),
                ("Net Income", vec![Some(0.0)]),
            ],
        ),
    );

    let extraction = extractor(provider, 8)
        .run(&[Company::new("TSLA", "Tesla Inc")])
        .await;

    let record = &extraction.records[0];
    assert_eq!(record.revenue, Some(0.0));
    assert_eq!(record.gross_margin, None);
    assert_eq!(record.net_margin, None);
}
