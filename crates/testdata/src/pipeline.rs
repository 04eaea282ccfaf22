//! End-to-end runs: extract a universe and write it to disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use testdata_core::StatementProvider;
use tracing::info;

use crate::export::{ExportError, write_csv};
use crate::extract::{ExtractionStats, Extractor};
use crate::summary::DatasetSummary;
use crate::universe::Universe;

/// Outcome of one universe run.
#[derive(Clone, Debug)]
pub struct RunOutput {
    /// Universe name.
    pub universe: String,
    /// File the records were written to.
    pub path: PathBuf,
    /// Extraction counters.
    pub stats: ExtractionStats,
    /// Shape of the written dataset.
    pub summary: DatasetSummary,
}

impl RunOutput {
    /// Rows written.
    #[must_use]
    pub const fn records(&self) -> usize {
        self.stats.records
    }
}

/// Extracts `universe` with `provider` and writes the records to `path`.
///
/// Extraction problems are logged and skipped; only the write can fail.
pub async fn run_universe(
    provider: Arc<dyn StatementProvider>,
    universe: &Universe,
    path: &Path,
) -> Result<RunOutput, ExportError> {
    info!(
        universe = %universe.name,
        companies = universe.companies.len(),
        window = universe.window,
        "Starting extraction"
    );

    let extraction = Extractor::new(provider, universe.window)
        .run(&universe.companies)
        .await;

    write_csv(path, &universe.layout, &extraction.records)?;
    let summary = DatasetSummary::new(&universe.layout, &extraction.records);
    info!(universe = %universe.name, path = %path.display(), "Saved {summary}");

    Ok(RunOutput {
        universe: universe.name.clone(),
        path: path.to_path_buf(),
        stats: extraction.stats,
        summary,
    })
}

/// Runs every universe in order, writing each to its own file under `dir`.
///
/// Stops at the first write failure.
pub async fn run_all(
    provider: Arc<dyn StatementProvider>,
    universes: &[Universe],
    dir: &Path,
) -> Result<Vec<RunOutput>, ExportError> {
    let mut outputs = Vec::with_capacity(universes.len());
    for universe in universes {
        let path = dir.join(&universe.file_name);
        outputs.push(run_universe(Arc::clone(&provider), universe, &path).await?);
    }
    Ok(outputs)
}
