//! Table sources: where raw observations come from.
//!
//! The pipeline reads through the [`ObservationSource`] seam so the core is
//! testable without filesystem side effects.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::core::{Observation, WideRecord};
use crate::error::{ForecastError, Result};

/// Supplies the normalized long-format observation table.
pub trait ObservationSource {
    /// Produce all observations, already expanded from the wide layout.
    fn observations(&self) -> Result<Vec<Observation>>;
}

/// Reads the wide survey table from a CSV file.
///
/// An unreadable file is fatal; a row that fails to parse is dropped with a
/// warning, matching the drop-don't-abort policy for incomplete data.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ObservationSource for CsvSource {
    fn observations(&self) -> Result<Vec<Observation>> {
        let mut reader =
            csv::Reader::from_path(&self.path).map_err(|e| ForecastError::Io(e.to_string()))?;

        let mut observations = Vec::new();
        for (line, row) in reader.deserialize::<WideRecord>().enumerate() {
            match row {
                Ok(record) => observations.extend(record.observations()),
                Err(err) => warn!(line = line + 2, %err, "dropping unparseable row"),
            }
        }
        Ok(observations)
    }
}

/// A source backed by observations already in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    observations: Vec<Observation>,
}

impl InMemorySource {
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }
}

impl ObservationSource for InMemorySource {
    fn observations(&self) -> Result<Vec<Observation>> {
        Ok(self.observations.clone())
    }
}
