//! Report Exporter
//! Writes the report tables as CSV and JSON and the dashboard charts as PNG.

use crate::charts::{ChartData, RenderError, StaticChartRenderer};
use crate::stats::TitanicReport;
use polars::prelude::*;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to write table: {0}")]
    Table(#[from] PolarsError),
    #[error("Failed to write JSON report: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to render chart: {0}")]
    Render(#[from] RenderError),
}

pub struct ReportExporter;

impl ReportExporter {
    /// Write tables and charts into `dir`, creating it if needed.
    pub fn export(
        report: &TitanicReport,
        charts: &[ChartData],
        dir: &Path,
        width: u32,
        height: u32,
    ) -> Result<Vec<PathBuf>, ExportError> {
        let mut written = Self::write_tables(report, dir)?;
        written.push(Self::write_json(report, dir)?);
        written.extend(Self::write_charts(charts, dir, width, height)?);
        tracing::info!(dir = %dir.display(), files = written.len(), "Report exported");
        Ok(written)
    }

    /// One CSV per table, named after the table.
    pub fn write_tables(report: &TitanicReport, dir: &Path) -> Result<Vec<PathBuf>, ExportError> {
        fs::create_dir_all(dir)?;

        let mut written = Vec::new();
        for (name, mut df) in report.to_dataframes()? {
            let path = dir.join(format!("{}.csv", name));
            let mut file = File::create(&path)?;
            CsvWriter::new(&mut file)
                .include_header(true)
                .finish(&mut df)?;
            tracing::debug!(path = %path.display(), rows = df.height(), "Wrote table");
            written.push(path);
        }
        Ok(written)
    }

    /// All three tables in one `report.json`.
    pub fn write_json(report: &TitanicReport, dir: &Path) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(dir)?;

        let path = dir.join("report.json");
        let file = File::create(&path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), report)?;
        tracing::debug!(path = %path.display(), "Wrote JSON report");
        Ok(path)
    }

    /// One PNG per chart, named after the chart id.
    pub fn write_charts(
        charts: &[ChartData],
        dir: &Path,
        width: u32,
        height: u32,
    ) -> Result<Vec<PathBuf>, ExportError> {
        fs::create_dir_all(dir)?;

        let mut written = Vec::new();
        for chart in charts {
            let png = StaticChartRenderer::render_png(chart, width, height)?;
            let path = dir.join(format!("{}.png", chart.id));
            fs::write(&path, png)?;
            tracing::debug!(path = %path.display(), "Wrote chart");
            written.push(path);
        }
        Ok(written)
    }
}
