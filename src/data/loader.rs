use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use super::model::{Dataset, Record};

/// Columns the header row must contain. Any other columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 4] = ["personName", "country", "category", "finalWorth"];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum DataError {
    /// The input path does not exist. Fatal to the session; never retried.
    #[error("dataset not found: {}", .0.display())]
    DataNotFound(PathBuf),

    #[error("CSV header is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

// ---------------------------------------------------------------------------
// DatasetLoader – load once per path, reuse forever
// ---------------------------------------------------------------------------

/// Memoizing loader. Each distinct path is read at most once for the
/// lifetime of the loader; later calls hand out the same `Arc`.
#[derive(Debug, Default)]
pub struct DatasetLoader {
    cache: HashMap<PathBuf, Arc<Dataset>>,
}

impl DatasetLoader {
    /// An empty loader; nothing is read until [`DatasetLoader::load`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the dataset at `path`, or return the cached copy.
    ///
    /// Failed loads are not cached.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<Arc<Dataset>, DataError> {
        let path = path.as_ref();
        if let Some(dataset) = self.cache.get(path) {
            log::debug!("Dataset cache hit for {}", path.display());
            return Ok(Arc::clone(dataset));
        }

        let dataset = Arc::new(read_csv(path)?);
        log::info!("Loaded {} records from {}", dataset.len(), path.display());
        self.cache.insert(path.to_path_buf(), Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Number of distinct paths currently cached.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Raw row as it appears in the file. Only the required columns are read.
///
/// Rows shorter than the header are padded: a cell past the end of the row
/// reads as blank. Every field is optional for that reason; a missing
/// `personName` becomes an empty name.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "personName", default)]
    person_name: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    category: Option<String>,
    /// Blank and non-numeric cells become `None` instead of failing the row.
    #[serde(rename = "finalWorth", default, deserialize_with = "csv::invalid_option")]
    final_worth: Option<f64>,
}

impl From<RawRow> for Record {
    fn from(raw: RawRow) -> Self {
        Record {
            name: raw.person_name.unwrap_or_default(),
            country: raw.country,
            category: raw.category,
            net_worth: raw.final_worth.filter(|w| !w.is_nan()),
        }
    }
}

/// Read a dataset from disk without caching.
pub fn read_csv(path: &Path) -> Result<Dataset, DataError> {
    if !path.exists() {
        log::error!("Dataset not found at {}", path.display());
        return Err(DataError::DataNotFound(path.to_path_buf()));
    }
    let file = File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_csv(file)
}

/// Parse comma-separated text with a header row into a [`Dataset`].
pub fn parse_csv<R: Read>(input: R) -> Result<Dataset, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DataError::MissingColumn(column));
        }
    }

    let mut records = Vec::new();
    for result in reader.deserialize::<RawRow>() {
        records.push(Record::from(result?));
    }

    let missing = records.iter().filter(|r| r.net_worth.is_none()).count();
    if missing > 0 {
        log::warn!("{missing} rows have no numeric finalWorth; treated as missing");
    }

    Ok(Dataset::from_records(records))
}
