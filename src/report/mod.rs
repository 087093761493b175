//! Reports over a finished result set
//!
//! ```text
//! ResultSet ──┬──> csv   ──> <output_dir>/cpu_performance_results.csv
//!             └──> chart ──> <output_dir>/cpu_performance_chart.png ──> display (opt-in)
//! ```
//!
//! Both artifacts are written fresh on every call; existing files with the
//! same names are replaced.

pub mod chart;
pub mod csv;
pub mod display;

use crate::experiment::ResultSet;
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// File name of the tabular report
pub const CSV_FILE: &str = "cpu_performance_results.csv";

/// File name of the chart
pub const CHART_FILE: &str = "cpu_performance_chart.png";

/// Paths of the artifacts written by [`Reporter::report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    /// CSV report
    pub csv: PathBuf,
    /// PNG chart
    pub chart: PathBuf,
}

/// Writes the CSV and chart for a result set into one directory.
#[derive(Debug, Clone)]
pub struct Reporter {
    output_dir: PathBuf,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(".")
    }
}

impl Reporter {
    /// Create a reporter writing into `output_dir`.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Get the output directory.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path of the CSV report.
    #[must_use]
    pub fn csv_path(&self) -> PathBuf {
        self.output_dir.join(CSV_FILE)
    }

    /// Path of the chart.
    #[must_use]
    pub fn chart_path(&self) -> PathBuf {
        self.output_dir.join(CHART_FILE)
    }

    /// Write the CSV report.
    ///
    /// # Errors
    ///
    /// Returns error if `results` is empty or the file cannot be written.
    pub fn write_csv(&self, results: &ResultSet) -> Result<PathBuf> {
        let path = self.csv_path();
        csv::write_csv(results, &path)?;
        info!(path = %path.display(), rows = results.len(), "Wrote CSV report");
        Ok(path)
    }

    /// Render the chart.
    ///
    /// # Errors
    ///
    /// Returns error if `results` is empty or rendering fails.
    pub fn render_chart(&self, results: &ResultSet) -> Result<PathBuf> {
        let path = self.chart_path();
        chart::write_chart(results, &path)?;
        info!(path = %path.display(), "Rendered chart");
        Ok(path)
    }

    /// Write both artifacts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyResults`] before touching the filesystem if
    /// `results` is empty, otherwise the first write or render error.
    pub fn report(&self, results: &ResultSet) -> Result<ReportPaths> {
        if results.is_empty() {
            return Err(Error::EmptyResults);
        }

        std::fs::create_dir_all(&self.output_dir)?;

        Ok(ReportPaths {
            csv: self.write_csv(results)?,
            chart: self.render_chart(results)?,
        })
    }
}
