use std::path::{Path, PathBuf};

use crate::exif_parser::Coordinates;

#[derive(Debug, Clone, PartialEq)]
pub enum RecordStatus {
    Located,
    NoGps,
    Failed(String),
}

/// One row of the report.
///
/// Coordinates are stored as a single optional pair and an address only ever
/// accompanies coordinates, so a half-populated location cannot be built.
#[derive(Debug, Clone)]
pub struct PhotoRecord {
    source_path: PathBuf,
    filename: String,
    coordinates: Option<Coordinates>,
    address: Option<String>,
    status: RecordStatus,
}

impl PhotoRecord {
    pub fn located(
        source_path: PathBuf,
        filename: String,
        coordinates: Coordinates,
        address: Option<String>,
    ) -> Self {
        Self {
            source_path,
            filename,
            coordinates: Some(coordinates),
            address,
            status: RecordStatus::Located,
        }
    }

    pub fn without_gps(source_path: PathBuf, filename: String) -> Self {
        Self {
            source_path,
            filename,
            coordinates: None,
            address: None,
            status: RecordStatus::NoGps,
        }
    }

    pub fn failed(source_path: PathBuf, filename: String, reason: impl Into<String>) -> Self {
        Self {
            source_path,
            filename,
            coordinates: None,
            address: None,
            status: RecordStatus::Failed(reason.into()),
        }
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    pub fn latitude(&self) -> Option<f64> {
        self.coordinates.map(|c| c.latitude)
    }

    pub fn longitude(&self) -> Option<f64> {
        self.coordinates.map(|c| c.longitude)
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn status(&self) -> &RecordStatus {
        &self.status
    }
}

/// Per-batch counts, reported back to the client alongside the workbook.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub located: usize,
    pub geocoded: usize,
    pub no_gps: usize,
    pub failed: usize,
}

pub fn summarize(records: &[PhotoRecord]) -> BatchSummary {
    records.iter().fold(
        BatchSummary { total: records.len(), ..Default::default() },
        |mut summary, record| {
            match record.status() {
                RecordStatus::Located => {
                    summary.located += 1;
                    if record.address().is_some() {
                        summary.geocoded += 1;
                    }
                }
                RecordStatus::NoGps => summary.no_gps += 1,
                RecordStatus::Failed(_) => summary.failed += 1,
            }
            summary
        },
    )
}
