//! CSV Data Loader Module
//! Fetches the passenger manifest over HTTP or from disk and parses it with Polars.

use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use super::passenger::{passengers_from_dataframe, PassengerTable};

/// Rows sampled for schema inference.
const INFER_SCHEMA_ROWS: usize = 10000;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to parse CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Failed to download dataset: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Failed to read dataset: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Dataset is missing column '{0}'")]
    MissingColumn(String),
}

/// Loads the passenger CSV with Polars.
pub struct DataLoader;

impl DataLoader {

    /// Whether a source string names an HTTP(S) resource rather than a file.
    pub fn is_remote(source: &str) -> bool {
        let lower = source.trim().to_ascii_lowercase();
        lower.starts_with("http://") || lower.starts_with("https://")
    }

    /// Load and convert in one step. Usable from a background thread.
    pub fn load_passengers(source: &str, timeout: Duration) -> Result<PassengerTable, LoaderError> {
        let df = Self::load_source(source, timeout)?;
        passengers_from_dataframe(&df)
    }

    /// Dispatch on the source kind.
    pub fn load_source(source: &str, timeout: Duration) -> Result<DataFrame, LoaderError> {
        let source = source.trim();
        if Self::is_remote(source) {
            Self::fetch_csv(source, timeout)
        } else {
            Self::read_csv_file(Path::new(source))
        }
    }

    /// Download a CSV over HTTP and parse it in memory.
    pub fn fetch_csv(url: &str, timeout: Duration) -> Result<DataFrame, LoaderError> {
        tracing::info!(url, "Downloading dataset");

        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        let bytes = client.get(url).send()?.error_for_status()?.bytes()?;

        tracing::debug!(bytes = bytes.len(), "Download complete");
        Self::parse_csv_bytes(bytes.to_vec())
    }

    /// Read a CSV file from disk.
    pub fn read_csv_file(path: &Path) -> Result<DataFrame, LoaderError> {
        tracing::info!(path = %path.display(), "Reading dataset");

        if !path.exists() {
            return Err(LoaderError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )));
        }

        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        tracing::debug!(rows = df.height(), "Parsed dataset");
        Ok(df)
    }

    /// Parse CSV content already held in memory.
    pub fn parse_csv_bytes(bytes: Vec<u8>) -> Result<DataFrame, LoaderError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
            .with_ignore_errors(true)
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;

        tracing::debug!(rows = df.height(), "Parsed dataset");
        Ok(df)
    }
}
